//! Smart licensing transport and call home.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use nxos_gnmi::{defaulted, DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};

use crate::model::callhome::{
    destprof_path, DestProf, EmailItems, InstItems, VrfItems, EMAIL_PATH, INST_PATH, VRF_PATH,
};
use crate::model::license::{
    SmartLicensingItems, TransportItems, TransportMode, SMART_LICENSING_PATH,
};
use crate::model::AdminSt;

const LICENSING_DOMAIN: &str = "licensing";
const CALLHOME_DOMAIN: &str = "callhome";

/// Smart licensing transport. A `url` selects direct smart transport, a
/// `csluUrl` selects a CSLU collector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Licensing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cslu_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrf: Option<String>,
}

impl Licensing {
    fn transport_mode(&self) -> GnmiResult<TransportMode> {
        match (&self.url, &self.cslu_url) {
            (Some(_), Some(_)) => Err(GnmiError::invalid_config(
                LICENSING_DOMAIN,
                "url",
                "url and csluUrl are mutually exclusive",
            )),
            (Some(_), None) => Ok(TransportMode::Smart),
            _ => Ok(TransportMode::Cslu),
        }
    }
}

#[async_trait]
impl DeviceConf for Licensing {
    fn domain(&self) -> &'static str {
        LICENSING_DOMAIN
    }

    #[instrument(skip_all)]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        let mode = self.transport_mode()?;
        debug!(mode = ?mode, "Building smart licensing transport");

        Ok(vec![Update::edit(
            SMART_LICENSING_PATH,
            SmartLicensingItems {
                transport_items: Some(TransportItems {
                    transport_mode: Some(mode),
                    url: self.url.clone(),
                    cslu_url: self.cslu_url.clone(),
                    vrf: self.vrf.clone(),
                }),
            },
        )])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Ok(vec![Update::replace(
            SMART_LICENSING_PATH,
            defaulted::<SmartLicensingItems>(),
        )])
    }
}

/// One numbered HTTP destination profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHomeProfile {
    pub seq: u32,
    pub url: String,
}

fn enabled() -> bool {
    true
}

/// Call home settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHome {
    #[serde(default = "enabled")]
    pub enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrf: Option<String>,
    #[serde(default)]
    pub profiles: Vec<CallHomeProfile>,
}

impl Default for CallHome {
    fn default() -> Self {
        Self {
            enable: true,
            contact_email: None,
            vrf: None,
            profiles: Vec::new(),
        }
    }
}

impl CallHome {
    /// Profiles in sequence order.
    fn sorted_profiles(&self) -> GnmiResult<Vec<&CallHomeProfile>> {
        let mut seen = BTreeSet::new();
        for profile in &self.profiles {
            if !seen.insert(profile.seq) {
                return Err(GnmiError::invalid_config(
                    CALLHOME_DOMAIN,
                    "profiles.seq",
                    format!("sequence {} is used twice", profile.seq),
                ));
            }
            if profile.url.is_empty() {
                return Err(GnmiError::invalid_config(
                    CALLHOME_DOMAIN,
                    "profiles.url",
                    format!("profile {} has an empty URL", profile.seq),
                ));
            }
        }

        let mut sorted: Vec<_> = self.profiles.iter().collect();
        sorted.sort_by_key(|p| p.seq);
        Ok(sorted)
    }
}

#[async_trait]
impl DeviceConf for CallHome {
    fn domain(&self) -> &'static str {
        CALLHOME_DOMAIN
    }

    #[instrument(skip_all, fields(enable = self.enable))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        if !self.enable {
            return Ok(vec![Update::edit(
                INST_PATH,
                InstItems {
                    admin_st: Some(AdminSt::Disabled),
                },
            )]);
        }

        let profiles = self.sorted_profiles()?;

        let mut updates = vec![Update::edit(
            INST_PATH,
            InstItems {
                admin_st: Some(AdminSt::Enabled),
            },
        )];
        if let Some(email) = &self.contact_email {
            updates.push(Update::edit(
                EMAIL_PATH,
                EmailItems {
                    contact_email: Some(email.clone()),
                },
            ));
        }
        if let Some(vrf) = &self.vrf {
            updates.push(Update::edit(
                VRF_PATH,
                VrfItems {
                    vrf_name: Some(vrf.clone()),
                },
            ));
        }
        updates.extend(profiles.into_iter().map(|profile| {
            Update::edit(
                destprof_path(profile.seq),
                DestProf {
                    seq: profile.seq,
                    url: Some(profile.url.clone()),
                },
            )
        }));

        debug!(updates = updates.len(), "Building call home");
        Ok(updates)
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Ok(vec![Update::edit(INST_PATH, defaulted::<InstItems>())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxos_devconf_test::{assert_edit_at, MemoryDevice};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_smart_transport() {
        let licensing = Licensing {
            url: Some("https://smartreceiver.cisco.com/licservice/license".to_string()),
            vrf: Some("management".to_string()),
            ..Default::default()
        };
        let updates = licensing.to_updates(&MemoryDevice::new()).await.unwrap();
        assert_edit_at(
            &updates[0],
            SMART_LICENSING_PATH,
            &json!({"transport-items": {
                "transportMode": "smart",
                "url": "https://smartreceiver.cisco.com/licservice/license",
                "vrf": "management"
            }}),
        );
    }

    #[tokio::test]
    async fn test_conflicting_transport() {
        let licensing = Licensing {
            url: Some("https://a".to_string()),
            cslu_url: Some("http://b".to_string()),
            vrf: None,
        };
        let err = licensing.to_updates(&MemoryDevice::new()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_licensing_reset() {
        let updates = Licensing::default().reset(&MemoryDevice::new()).await.unwrap();
        assert_eq!(
            updates[0].value().unwrap().to_json().unwrap(),
            json!({"transport-items": {"transportMode": "cslu"}})
        );
    }

    #[tokio::test]
    async fn test_call_home_profiles_in_sequence_order() {
        let callhome = CallHome {
            contact_email: Some("noc@example.com".to_string()),
            vrf: Some("management".to_string()),
            profiles: vec![
                CallHomeProfile {
                    seq: 2,
                    url: "https://b".to_string(),
                },
                CallHomeProfile {
                    seq: 1,
                    url: "https://a".to_string(),
                },
            ],
            ..Default::default()
        };
        let updates = callhome.to_updates(&MemoryDevice::new()).await.unwrap();
        let paths: Vec<_> = updates.iter().map(|u| u.path()).collect();
        assert_eq!(
            paths,
            vec![
                INST_PATH,
                EMAIL_PATH,
                VRF_PATH,
                "System/callhome-items/inst-items/destprof-items/DestProf-list[seq=1]",
                "System/callhome-items/inst-items/destprof-items/DestProf-list[seq=2]",
            ]
        );
        assert_edit_at(&updates[0], INST_PATH, &json!({"adminSt": "enabled"}));
    }

    #[tokio::test]
    async fn test_call_home_disabled_and_reset() {
        let device = MemoryDevice::new();
        let callhome = CallHome {
            enable: false,
            profiles: vec![CallHomeProfile {
                seq: 1,
                url: String::new(),
            }],
            ..Default::default()
        };
        let updates = callhome.to_updates(&device).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_edit_at(&updates[0], INST_PATH, &json!({"adminSt": "disabled"}));

        assert_eq!(callhome.reset(&device).await.unwrap(), updates);
    }
}
