//! DNS resolver.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;
use tracing::{debug, instrument};

use nxos_gnmi::{defaulted, DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};
use nxos_types::Interface;

use crate::model::dns::{
    DnsItems, DomItems, Prof, ProfItems, ProvItems, Provider, Vrf, VrfItems, DEFAULT_PROFILE, PATH,
};
use crate::model::AdminSt;

const DOMAIN: &str = "dns";

/// One name server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsProvider {
    pub address: String,
    #[serde(default = "default_vrf")]
    pub vrf: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_interface: Option<String>,
}

fn default_vrf() -> String {
    "default".to_string()
}

fn enabled() -> bool {
    true
}

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dns {
    #[serde(default = "enabled")]
    pub enable: bool,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub providers: Vec<DnsProvider>,
}

impl Default for Dns {
    fn default() -> Self {
        Self {
            enable: true,
            domain: String::new(),
            providers: Vec::new(),
        }
    }
}

impl Dns {
    /// Groups providers by VRF, then by address, under the single profile.
    fn profile(&self) -> GnmiResult<Prof> {
        let mut vrfs: BTreeMap<String, Vrf> = BTreeMap::new();

        for provider in &self.providers {
            let addr: IpAddr = provider.address.parse().map_err(|_| {
                GnmiError::invalid_config(
                    DOMAIN,
                    "providers.address",
                    format!("'{}' is not an IP address", provider.address),
                )
            })?;
            if provider.vrf.is_empty() {
                return Err(GnmiError::invalid_config(
                    DOMAIN,
                    "providers.vrf",
                    format!("provider {} has an empty VRF", addr),
                ));
            }
            let src_if = provider
                .source_interface
                .as_deref()
                .map(|name| {
                    name.parse::<Interface>()
                        .map(|intf| intf.name().to_string())
                        .map_err(|e| {
                            GnmiError::invalid_config(
                                DOMAIN,
                                "providers.sourceInterface",
                                e.to_string(),
                            )
                        })
                })
                .transpose()?;

            let vrf = vrfs.entry(provider.vrf.clone()).or_insert_with(|| Vrf {
                name: provider.vrf.clone(),
                prov_items: ProvItems::default(),
            });
            let addr = addr.to_string();
            vrf.prov_items.provider_list.insert(
                addr.clone(),
                Provider { addr, src_if },
            );
        }

        Ok(Prof {
            name: DEFAULT_PROFILE.to_string(),
            dom_items: (!self.domain.is_empty()).then(|| DomItems {
                name: self.domain.clone(),
            }),
            vrf_items: (!vrfs.is_empty()).then_some(VrfItems { vrf_list: vrfs }),
        })
    }
}

#[async_trait]
impl DeviceConf for Dns {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(enable = self.enable))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        if !self.enable {
            // No profile: the device drops it with the disabled state
            return Ok(vec![Update::edit(
                PATH,
                DnsItems {
                    admin_st: Some(AdminSt::Disabled),
                    prof_items: None,
                },
            )]);
        }

        let profile = self.profile()?;
        debug!(providers = self.providers.len(), "Building DNS profile");

        let mut prof_list = BTreeMap::new();
        prof_list.insert(profile.name.clone(), profile);

        Ok(vec![Update::edit(
            PATH,
            DnsItems {
                admin_st: Some(AdminSt::Enabled),
                prof_items: Some(ProfItems { prof_list }),
            },
        )])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Ok(vec![Update::replace(PATH, defaulted::<DnsItems>())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxos_devconf_test::{json_at, MemoryDevice};
    use nxos_gnmi::UpdateKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn provider(address: &str, vrf: &str) -> DnsProvider {
        DnsProvider {
            address: address.to_string(),
            vrf: vrf.to_string(),
            source_interface: None,
        }
    }

    #[tokio::test]
    async fn test_providers_grouped_by_vrf() {
        let dns = Dns {
            enable: true,
            domain: "sap.corp".to_string(),
            providers: vec![
                provider("147.204.8.200", "mgmt0"),
                provider("147.204.8.201", "mgmt0"),
                provider("147.204.8.200", "lo1"),
                provider("147.204.8.201", "lo1"),
            ],
        };

        let updates = dns.to_updates(&MemoryDevice::new()).await.unwrap();
        assert_eq!(updates.len(), 1);

        let value = updates[0].value().unwrap().to_json().unwrap();
        let profile = json_at(&value, "prof-items/Prof-list[name=default]").unwrap();
        assert_eq!(profile["dom-items"], json!({"name": "sap.corp"}));

        for vrf in ["mgmt0", "lo1"] {
            let providers = json_at(
                profile,
                &format!("vrf-items/Vrf-list[name={}]/prov-items/Provider-list", vrf),
            )
            .unwrap();
            assert_eq!(
                providers,
                &json!([{"addr": "147.204.8.200"}, {"addr": "147.204.8.201"}])
            );
        }
    }

    #[tokio::test]
    async fn test_disabled_omits_profile() {
        let dns = Dns {
            enable: false,
            // not validated when disabled
            providers: vec![provider("not-an-ip", "")],
            ..Default::default()
        };

        let updates = dns.to_updates(&MemoryDevice::new()).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].kind(), UpdateKind::Editing);
        assert_eq!(
            updates[0].value().unwrap().to_json().unwrap(),
            json!({"adminSt": "disabled"})
        );
    }

    #[tokio::test]
    async fn test_invalid_provider_address() {
        let dns = Dns {
            providers: vec![provider("147.204.8", "mgmt0")],
            ..Default::default()
        };
        let err = dns.to_updates(&MemoryDevice::new()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_source_interface_normalized() {
        let dns = Dns {
            providers: vec![DnsProvider {
                source_interface: Some("mgmt0".to_string()),
                ..provider("10.0.0.53", "management")
            }],
            ..Default::default()
        };
        let updates = dns.to_updates(&MemoryDevice::new()).await.unwrap();
        let value = updates[0].value().unwrap().to_json().unwrap();
        assert_eq!(
            json_at(
                &value,
                "prof-items/Prof-list[name=default]/vrf-items/Vrf-list[name=management]/prov-items/Provider-list[addr=10.0.0.53]/srcIf"
            ),
            Some(&json!("mgmt0"))
        );
    }
}
