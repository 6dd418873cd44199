use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};

use super::DOMAIN;
use crate::feature;
use crate::model::fm;
use crate::model::isis::{
    inst_path, AfItems, AfType, Dom, DomAf, DomItems, Inst, IsType, OverloadItems,
};

/// NSAP address: AFI, area, 6-byte system ID, `00` selector.
static NET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{2}(\.[0-9A-Fa-f]{4}){3,9}\.00$").expect("valid regex")
});

/// Circuit level of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IsisLevel {
    Level1,
    Level2,
    #[default]
    Level12,
}

impl TryFrom<u8> for IsisLevel {
    type Error = GnmiError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(IsisLevel::Level1),
            2 => Ok(IsisLevel::Level2),
            3 => Ok(IsisLevel::Level12),
            other => Err(GnmiError::invalid_config(
                DOMAIN,
                "level",
                format!("unsupported level {}", other),
            )),
        }
    }
}

impl From<IsisLevel> for u8 {
    fn from(level: IsisLevel) -> Self {
        match level {
            IsisLevel::Level1 => 1,
            IsisLevel::Level2 => 2,
            IsisLevel::Level12 => 3,
        }
    }
}

impl From<IsisLevel> for IsType {
    fn from(level: IsisLevel) -> Self {
        match level {
            IsisLevel::Level1 => IsType::L1,
            IsisLevel::Level2 => IsType::L2,
            IsisLevel::Level12 => IsType::L12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsisAddressFamily {
    Ipv4,
    Ipv6,
}

impl From<IsisAddressFamily> for AfType {
    fn from(af: IsisAddressFamily) -> Self {
        match af {
            IsisAddressFamily::Ipv4 => AfType::V4,
            IsisAddressFamily::Ipv6 => AfType::V6,
        }
    }
}

/// Set-overload-bit on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverloadBit {
    /// Seconds after boot before the bit is cleared.
    pub startup_time: u32,
}

fn default_vrf() -> String {
    "default".to_string()
}

/// One IS-IS routing instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsisProcess {
    pub name: String,
    pub net: String,
    #[serde(default)]
    pub level: IsisLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overload_bit: Option<OverloadBit>,
    #[serde(default)]
    pub address_families: Vec<IsisAddressFamily>,
    #[serde(default = "default_vrf")]
    pub vrf: String,
}

impl IsisProcess {
    pub fn new(name: impl Into<String>, net: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            net: net.into(),
            level: IsisLevel::default(),
            overload_bit: None,
            address_families: Vec::new(),
            vrf: default_vrf(),
        }
    }

    fn validate(&self) -> GnmiResult<()> {
        if self.name.is_empty() {
            return Err(GnmiError::invalid_config(DOMAIN, "name", "must not be empty"));
        }
        if self.net.is_empty() {
            return Err(GnmiError::invalid_config(DOMAIN, "net", "must not be empty"));
        }
        if !NET_REGEX.is_match(&self.net) {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "net",
                format!("'{}' is not a valid NET", self.net),
            ));
        }
        if self.vrf.is_empty() {
            return Err(GnmiError::invalid_config(DOMAIN, "vrf", "must not be empty"));
        }
        Ok(())
    }

    fn build(&self) -> Inst {
        let af_items = (!self.address_families.is_empty()).then(|| AfItems {
            af_list: self
                .address_families
                .iter()
                .map(|&af| {
                    let af_type = AfType::from(af);
                    (af_type, DomAf { af_type })
                })
                .collect(),
        });

        let dom = Dom {
            name: self.vrf.clone(),
            net: Some(self.net.clone()),
            is_type: Some(self.level.into()),
            overload_items: self.overload_bit.map(|bit| OverloadItems {
                admin_st: Some("bootup".to_string()),
                startup_time: Some(bit.startup_time),
            }),
            af_items,
        };

        let mut dom_list = BTreeMap::new();
        dom_list.insert(dom.name.clone(), dom);

        Inst {
            name: self.name.clone(),
            dom_items: Some(DomItems { dom_list }),
        }
    }
}

#[async_trait]
impl DeviceConf for IsisProcess {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(process = %self.name))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        self.validate()?;
        debug!(level = ?self.level, families = self.address_families.len(), "Building IS-IS process");

        Ok(vec![
            feature::enable(fm::ISIS_PATH),
            Update::replace(inst_path(&self.name), self.build()),
        ])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        if self.name.is_empty() {
            return Err(GnmiError::invalid_config(DOMAIN, "name", "must not be empty"));
        }
        Ok(vec![Update::delete(inst_path(&self.name))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxos_devconf_test::{assert_kinds, MemoryDevice};
    use nxos_gnmi::UpdateKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn underlay() -> IsisProcess {
        IsisProcess {
            level: IsisLevel::Level1,
            overload_bit: Some(OverloadBit { startup_time: 300 }),
            address_families: vec![IsisAddressFamily::Ipv6, IsisAddressFamily::Ipv4],
            ..IsisProcess::new("UNDERLAY", "49.0001.0000.0000.0001.00")
        }
    }

    #[tokio::test]
    async fn test_feature_enable_then_replace() {
        let updates = underlay().to_updates(&MemoryDevice::new()).await.unwrap();
        assert_kinds(&updates, &[UpdateKind::Editing, UpdateKind::Replacing]);
        assert_eq!(updates[0].path(), fm::ISIS_PATH);
        assert_eq!(
            updates[1].path(),
            "System/isis-items/inst-items/Inst-list[name=UNDERLAY]"
        );

        assert_eq!(
            updates[1].value().unwrap().to_json().unwrap(),
            json!({
                "name": "UNDERLAY",
                "dom-items": {"Dom-list": [{
                    "name": "default",
                    "net": "49.0001.0000.0000.0001.00",
                    "isType": "l1",
                    "overload-items": {"adminSt": "bootup", "startupTime": 300},
                    "af-items": {"DomAf-list": [{"type": "v4"}, {"type": "v6"}]}
                }]}
            })
        );
    }

    #[tokio::test]
    async fn test_required_fields() {
        let device = MemoryDevice::new();

        let mut process = underlay();
        process.name.clear();
        assert!(process.to_updates(&device).await.unwrap_err().is_validation());

        let mut process = underlay();
        process.net.clear();
        assert!(process.to_updates(&device).await.unwrap_err().is_validation());

        let mut process = underlay();
        process.net = "49.0001".to_string();
        assert!(process.to_updates(&device).await.unwrap_err().is_validation());
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(IsType::from(IsisLevel::try_from(1).unwrap()), IsType::L1);
        assert_eq!(IsType::from(IsisLevel::try_from(3).unwrap()), IsType::L12);
        assert!(IsisLevel::try_from(99).unwrap_err().is_validation());

        let parsed: Result<IsisProcess, _> =
            serde_yaml::from_str("name: UNDERLAY\nnet: 49.0001.0000.0000.0001.00\nlevel: 99\n");
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_reset_deletes_process() {
        let updates = underlay().reset(&MemoryDevice::new()).await.unwrap();
        assert_kinds(&updates, &[UpdateKind::Deleting]);
        assert_eq!(
            updates[0].path(),
            "System/isis-items/inst-items/Inst-list[name=UNDERLAY]"
        );
    }
}
