//! EVPN MAC-VRF route distinguisher and route targets.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};
use nxos_types::{RouteDistinguisher, RouteTarget};

use crate::feature;
use crate::model::evpn::{bdevi_path, encap, BdEvi, EntItems, RttEntry, RttP, RttType, RttpItems};
use crate::model::fm;

const DOMAIN: &str = "evpn";

/// Largest VXLAN network identifier.
pub const MAX_VNI: u32 = 16_777_214;

fn auto() -> String {
    "auto".to_string()
}

/// The EVPN instance of one layer-2 VNI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacVrf {
    pub vni: u32,
    /// `auto`, `asn:nn` or `ip:nn`.
    #[serde(default = "auto")]
    pub rd: String,
    #[serde(default)]
    pub import_targets: Vec<String>,
    #[serde(default)]
    pub export_targets: Vec<String>,
}

impl MacVrf {
    pub fn new(vni: u32) -> Self {
        Self {
            vni,
            rd: auto(),
            import_targets: Vec::new(),
            export_targets: Vec::new(),
        }
    }

    fn validate_vni(&self) -> GnmiResult<()> {
        if self.vni == 0 || self.vni > MAX_VNI {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "vni",
                format!("{} is outside 1-{}", self.vni, MAX_VNI),
            ));
        }
        Ok(())
    }

    fn entries(field: &str, targets: &[String]) -> GnmiResult<EntItems> {
        let mut items = EntItems::default();
        for target in targets {
            let rtt = target
                .parse::<RouteTarget>()
                .map_err(|e| GnmiError::invalid_config(DOMAIN, field, e.to_string()))?
                .encode();
            items.entry_list.insert(rtt.clone(), RttEntry { rtt });
        }
        Ok(items)
    }

    fn build(&self) -> GnmiResult<BdEvi> {
        let rd = self
            .rd
            .parse::<RouteDistinguisher>()
            .map_err(|e| GnmiError::invalid_config(DOMAIN, "rd", e.to_string()))?;

        let mut rttp_list = BTreeMap::new();
        for (rtt_type, field, targets) in [
            (RttType::Import, "importTargets", &self.import_targets),
            (RttType::Export, "exportTargets", &self.export_targets),
        ] {
            if targets.is_empty() {
                continue;
            }
            rttp_list.insert(
                rtt_type,
                RttP {
                    rtt_type,
                    ent_items: Self::entries(field, targets)?,
                },
            );
        }

        Ok(BdEvi {
            encap: encap(self.vni),
            rd: rd.encode(),
            rttp_items: (!rttp_list.is_empty()).then_some(RttpItems { rttp_list }),
        })
    }
}

#[async_trait]
impl DeviceConf for MacVrf {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(vni = self.vni))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        self.validate_vni()?;
        let row = self.build()?;
        debug!(rd = %row.rd, "Building MAC-VRF");

        Ok(vec![
            feature::enable(fm::EVPN_PATH),
            Update::replace(bdevi_path(self.vni), row),
        ])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        self.validate_vni()?;
        Ok(vec![Update::delete(bdevi_path(self.vni))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxos_devconf_test::{assert_kinds, MemoryDevice};
    use nxos_gnmi::UpdateKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_encoded_targets() {
        let macvrf = MacVrf {
            rd: "10.0.0.1:100".to_string(),
            import_targets: vec!["65000:10100".to_string(), "4200000000:100".to_string()],
            export_targets: vec!["65000:10100".to_string()],
            ..MacVrf::new(10100)
        };
        let updates = macvrf.to_updates(&MemoryDevice::new()).await.unwrap();
        assert_kinds(&updates, &[UpdateKind::Editing, UpdateKind::Replacing]);
        assert_eq!(updates[0].path(), fm::EVPN_PATH);
        assert_eq!(
            updates[1].path(),
            "System/evpn-items/bdevi-items/BDEvi-list[encap=vxlan-10100]"
        );
        assert_eq!(
            updates[1].value().unwrap().to_json().unwrap(),
            json!({
                "encap": "vxlan-10100",
                "rd": "rd:ipv4-nn2:10.0.0.1:100",
                "rttp-items": {"RttP-list": [
                    {"type": "import", "ent-items": {"RttEntry-list": [
                        {"rtt": "route-target:as2-nn2:65000:10100"},
                        {"rtt": "route-target:as4-nn2:4200000000:100"}
                    ]}},
                    {"type": "export", "ent-items": {"RttEntry-list": [
                        {"rtt": "route-target:as2-nn2:65000:10100"}
                    ]}}
                ]}
            })
        );
    }

    #[tokio::test]
    async fn test_auto_rd() {
        let updates = MacVrf::new(100).to_updates(&MemoryDevice::new()).await.unwrap();
        let value = updates[1].value().unwrap().to_json().unwrap();
        assert_eq!(value, json!({"encap": "vxlan-100", "rd": "rd:unknown:0:0"}));
    }

    #[tokio::test]
    async fn test_malformed_values_rejected() {
        let device = MemoryDevice::new();

        let macvrf = MacVrf {
            rd: "65000".to_string(),
            ..MacVrf::new(100)
        };
        assert!(macvrf.to_updates(&device).await.unwrap_err().is_validation());

        let macvrf = MacVrf {
            import_targets: vec!["65000:abc".to_string()],
            ..MacVrf::new(100)
        };
        assert!(macvrf.to_updates(&device).await.unwrap_err().is_validation());

        assert!(MacVrf::new(0).to_updates(&device).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_reset_deletes_row() {
        let updates = MacVrf::new(100).reset(&MemoryDevice::new()).await.unwrap();
        assert_kinds(&updates, &[UpdateKind::Deleting]);
    }
}
