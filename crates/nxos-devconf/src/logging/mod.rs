//! Remote syslog and per-facility severity.
//!
//! Every facility of the allow-list is emitted at the default severity;
//! facilities named in the configuration override it. A facility outside
//! the allow-list is rejected rather than sent.

mod facility;

pub use facility::{FacilityAllowList, DEFAULT_FACILITIES};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;
use tracing::{debug, instrument};

use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};
use nxos_types::Interface;

use crate::model::logging::{
    Facility, FacilityItems, LogLevelItems, LoggingHistoryItems, LoggingItems, LoggingSystem,
    OriginIdItems, RdstItems, RemoteDest, Severity, SourceIfItems, SyslogItems, SyslogTransport,
    SYSLOG_PATH, SYSTEM_PATH,
};
use crate::model::AdminSt;

const DOMAIN: &str = "logging";

/// Default local history buffer size, in messages.
pub const DEFAULT_HISTORY_SIZE: u32 = 500;

fn default_port() -> u16 {
    514
}

fn default_vrf() -> String {
    "default".to_string()
}

fn enabled() -> bool {
    true
}

/// One remote syslog destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyslogServer {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub transport: SyslogTransport,
    #[serde(default = "default_vrf")]
    pub vrf: String,
    #[serde(default)]
    pub severity: Severity,
}

/// Local history buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingHistory {
    pub severity: Severity,
    pub size: u32,
}

/// Remote logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logging {
    #[serde(default = "enabled")]
    pub enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<LoggingHistory>,
    #[serde(default)]
    pub servers: Vec<SyslogServer>,
    #[serde(default)]
    pub default_severity: Severity,
    /// Per-facility overrides of `default_severity`.
    #[serde(default)]
    pub facilities: BTreeMap<String, Severity>,
    #[serde(skip)]
    pub allow_list: FacilityAllowList,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            origin_id: None,
            source_interface: None,
            history: None,
            servers: Vec::new(),
            default_severity: Severity::default(),
            facilities: BTreeMap::new(),
            allow_list: FacilityAllowList::default(),
        }
    }
}

impl Logging {
    pub fn with_allow_list(mut self, allow_list: FacilityAllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    fn facility_items(&self, default_severity: Severity) -> GnmiResult<FacilityItems> {
        if let Some(unknown) = self
            .facilities
            .keys()
            .find(|name| !self.allow_list.contains(name))
        {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "facilities",
                format!("facility '{}' is not supported by the device", unknown),
            ));
        }

        let facility_list = self
            .allow_list
            .iter()
            .map(|name| {
                let severity_level = self
                    .facilities
                    .get(name)
                    .copied()
                    .unwrap_or(default_severity);
                (
                    name.to_string(),
                    Facility {
                        facility_name: name.to_string(),
                        severity_level,
                    },
                )
            })
            .collect();
        Ok(FacilityItems { facility_list })
    }

    fn remote_destinations(&self) -> GnmiResult<RdstItems> {
        let mut rdst = RdstItems::default();
        for server in &self.servers {
            if server.host.is_empty() {
                return Err(GnmiError::invalid_config(
                    DOMAIN,
                    "servers.host",
                    "must not be empty",
                ));
            }
            if server.port == 0 {
                return Err(GnmiError::invalid_config(
                    DOMAIN,
                    "servers.port",
                    format!("server {} has port 0", server.host),
                ));
            }
            // Hosts may be names; addresses are normalized
            let host = server
                .host
                .parse::<IpAddr>()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| server.host.clone());
            let dest = RemoteDest {
                host: host.clone(),
                port: server.port,
                transport: server.transport,
                vrf_name: server.vrf.clone(),
                severity: server.severity,
            };
            if rdst.dest_list.insert(host, dest).is_some() {
                return Err(GnmiError::invalid_config(
                    DOMAIN,
                    "servers.host",
                    format!("server {} is listed twice", server.host),
                ));
            }
        }
        Ok(rdst)
    }

    fn syslog_items(&self) -> GnmiResult<SyslogItems> {
        let sourceif_items = self
            .source_interface
            .as_deref()
            .map(|name| {
                name.parse::<Interface>()
                    .map(|intf| SourceIfItems {
                        admin_st: AdminSt::Enabled,
                        if_name: intf.name().to_string(),
                    })
                    .map_err(|e| {
                        GnmiError::invalid_config(DOMAIN, "sourceInterface", e.to_string())
                    })
            })
            .transpose()?;

        Ok(SyslogItems {
            admin_st: Some(AdminSt::Enabled),
            originid_items: self.origin_id.as_ref().map(|id| OriginIdItems {
                id_type: "string".to_string(),
                id_value: id.clone(),
            }),
            sourceif_items,
            logginghistory_items: self.history.map(|history| LoggingHistoryItems {
                level: history.severity,
                size: history.size,
            }),
            rdst_items: (!self.servers.is_empty())
                .then(|| self.remote_destinations())
                .transpose()?,
        })
    }

    fn logging_items(facility_items: FacilityItems) -> LoggingItems {
        LoggingItems {
            loglevel_items: LogLevelItems { facility_items },
        }
    }
}

#[async_trait]
impl DeviceConf for Logging {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(enable = self.enable))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        if !self.enable {
            return Ok(vec![Update::edit(
                SYSLOG_PATH,
                SyslogItems {
                    admin_st: Some(AdminSt::Disabled),
                    ..Default::default()
                },
            )]);
        }

        let syslog_items = self.syslog_items()?;
        let facility_items = self.facility_items(self.default_severity)?;
        debug!(
            servers = self.servers.len(),
            facilities = facility_items.facility_list.len(),
            overrides = self.facilities.len(),
            "Building logging update"
        );

        Ok(vec![Update::edit(
            SYSTEM_PATH,
            LoggingSystem {
                syslog_items: Some(syslog_items),
                logging_items: Some(Self::logging_items(facility_items)),
            },
        )])
    }

    /// Drops every remote destination and returns all facilities to the
    /// device default severity.
    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        let defaults = Logging {
            allow_list: self.allow_list.clone(),
            ..Default::default()
        };
        let facility_items = defaults.facility_items(Severity::default())?;

        Ok(vec![
            Update::replace(format!("{}/rdst-items", SYSLOG_PATH), RdstItems::default()),
            Update::edit(
                SYSTEM_PATH,
                LoggingSystem {
                    syslog_items: Some(SyslogItems {
                        admin_st: Some(AdminSt::Enabled),
                        logginghistory_items: Some(LoggingHistoryItems {
                            level: Severity::default(),
                            size: DEFAULT_HISTORY_SIZE,
                        }),
                        ..Default::default()
                    }),
                    logging_items: Some(Self::logging_items(facility_items)),
                },
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxos_devconf_test::{assert_kinds, json_at, MemoryDevice};
    use nxos_gnmi::UpdateKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn logging() -> Logging {
        let mut facilities = BTreeMap::new();
        facilities.insert("bgp".to_string(), Severity::Debugging);
        Logging {
            origin_id: Some("leaf1".to_string()),
            source_interface: Some("loopback0".to_string()),
            history: Some(LoggingHistory {
                severity: Severity::Warnings,
                size: 1000,
            }),
            servers: vec![SyslogServer {
                host: "10.0.0.5".to_string(),
                port: 514,
                transport: SyslogTransport::Udp,
                vrf: "management".to_string(),
                severity: Severity::Information,
            }],
            default_severity: Severity::Errors,
            facilities,
            ..Default::default()
        }
        .with_allow_list(["bgp", "isis", "ospf"].into_iter().collect())
    }

    #[tokio::test]
    async fn test_aggregated_update() {
        let updates = logging().to_updates(&MemoryDevice::new()).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].path(), "System");

        let value = updates[0].value().unwrap().to_json().unwrap();
        assert_eq!(
            json_at(&value, "syslog-items/sourceif-items"),
            Some(&json!({"adminSt": "enabled", "ifName": "lo0"}))
        );
        assert_eq!(
            json_at(&value, "syslog-items/originid-items/idvalue"),
            Some(&json!("leaf1"))
        );
        assert_eq!(
            json_at(&value, "syslog-items/logginghistory-items"),
            Some(&json!({"level": "warnings", "size": 1000}))
        );
        assert_eq!(
            json_at(&value, "syslog-items/rdst-items/RemoteDest-list[host=10.0.0.5]"),
            Some(&json!({
                "host": "10.0.0.5",
                "port": 514,
                "transport": "udp",
                "vrfName": "management",
                "severity": "information"
            }))
        );
        assert_eq!(
            json_at(&value, "logging-items/loglevel-items/facility-items/Facility-list"),
            Some(&json!([
                {"facilityName": "bgp", "severityLevel": "debugging"},
                {"facilityName": "isis", "severityLevel": "errors"},
                {"facilityName": "ospf", "severityLevel": "errors"}
            ]))
        );
    }

    #[tokio::test]
    async fn test_unsupported_facility_rejected() {
        let mut logging = logging();
        logging
            .facilities
            .insert("kernel".to_string(), Severity::Debugging);
        let err = logging.to_updates(&MemoryDevice::new()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_default_allow_list_emitted_in_full() {
        let updates = Logging::default()
            .to_updates(&MemoryDevice::new())
            .await
            .unwrap();
        let value = updates[0].value().unwrap().to_json().unwrap();
        let facilities = json_at(
            &value,
            "logging-items/loglevel-items/facility-items/Facility-list",
        )
        .unwrap();
        assert_eq!(
            facilities.as_array().map(Vec::len),
            Some(DEFAULT_FACILITIES.len())
        );
    }

    #[tokio::test]
    async fn test_disabled() {
        let mut logging = logging();
        logging.enable = false;
        logging.source_interface = Some("bogus".to_string());

        let updates = logging.to_updates(&MemoryDevice::new()).await.unwrap();
        assert_kinds(&updates, &[UpdateKind::Editing]);
        assert_eq!(updates[0].path(), SYSLOG_PATH);
        assert_eq!(
            updates[0].value().unwrap().to_json().unwrap(),
            json!({"adminSt": "disabled"})
        );
    }

    #[tokio::test]
    async fn test_reset_clears_destinations() {
        let updates = logging().reset(&MemoryDevice::new()).await.unwrap();
        assert_kinds(&updates, &[UpdateKind::Replacing, UpdateKind::Editing]);
        assert_eq!(updates[0].path(), "System/syslog-items/rdst-items");
        assert_eq!(updates[0].value().unwrap().to_json().unwrap(), json!({"RemoteDest-list": []}));

        let value = updates[1].value().unwrap().to_json().unwrap();
        assert_eq!(
            json_at(
                &value,
                "logging-items/loglevel-items/facility-items/Facility-list[facilityName=bgp]/severityLevel"
            ),
            Some(&json!("notifications"))
        );
    }
}
