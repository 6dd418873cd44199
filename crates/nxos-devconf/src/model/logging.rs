//! Syslog and per-facility log levels.
//!
//! Both live under `System` (`syslog-items` and `logging-items`), so the
//! translator sends them as one aggregated Editing update rooted at
//! [`SYSTEM_PATH`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use nxos_gnmi::{keyed, Schema};

use super::AdminSt;

pub const SYSTEM_PATH: &str = "System";
pub const SYSLOG_PATH: &str = "System/syslog-items";

/// Device severity levels, most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Emergencies,
    Alerts,
    Critical,
    Errors,
    Warnings,
    #[default]
    Notifications,
    Information,
    Debugging,
}

/// Remote destination transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyslogTransport {
    #[default]
    Udp,
    Tcp,
    Tls,
}

/// The `System` root, carrying only the logging containers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoggingSystem {
    #[serde(rename = "syslog-items", skip_serializing_if = "Option::is_none")]
    pub syslog_items: Option<SyslogItems>,
    #[serde(rename = "logging-items", skip_serializing_if = "Option::is_none")]
    pub logging_items: Option<LoggingItems>,
}

impl Schema for LoggingSystem {}

/// `syslog-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyslogItems {
    #[serde(rename = "adminSt", skip_serializing_if = "Option::is_none")]
    pub admin_st: Option<AdminSt>,
    #[serde(rename = "originid-items", skip_serializing_if = "Option::is_none")]
    pub originid_items: Option<OriginIdItems>,
    #[serde(rename = "sourceif-items", skip_serializing_if = "Option::is_none")]
    pub sourceif_items: Option<SourceIfItems>,
    #[serde(rename = "logginghistory-items", skip_serializing_if = "Option::is_none")]
    pub logginghistory_items: Option<LoggingHistoryItems>,
    #[serde(rename = "rdst-items", skip_serializing_if = "Option::is_none")]
    pub rdst_items: Option<RdstItems>,
}

impl Schema for SyslogItems {}

/// `originid-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OriginIdItems {
    #[serde(rename = "idtype")]
    pub id_type: String,
    #[serde(rename = "idvalue")]
    pub id_value: String,
}

/// `sourceif-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceIfItems {
    #[serde(rename = "adminSt")]
    pub admin_st: AdminSt,
    #[serde(rename = "ifName")]
    pub if_name: String,
}

/// `logginghistory-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoggingHistoryItems {
    pub level: Severity,
    pub size: u32,
}

/// `rdst-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RdstItems {
    #[serde(rename = "RemoteDest-list", serialize_with = "keyed::serialize")]
    pub dest_list: BTreeMap<String, RemoteDest>,
}

impl Schema for RdstItems {}

/// `RemoteDest-list[host]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemoteDest {
    pub host: String,
    pub port: u16,
    pub transport: SyslogTransport,
    #[serde(rename = "vrfName")]
    pub vrf_name: String,
    pub severity: Severity,
}

/// `logging-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoggingItems {
    #[serde(rename = "loglevel-items")]
    pub loglevel_items: LogLevelItems,
}

/// `loglevel-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogLevelItems {
    #[serde(rename = "facility-items")]
    pub facility_items: FacilityItems,
}

/// `facility-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacilityItems {
    #[serde(rename = "Facility-list", serialize_with = "keyed::serialize")]
    pub facility_list: BTreeMap<String, Facility>,
}

/// `Facility-list[facilityName]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    #[serde(rename = "facilityName")]
    pub facility_name: String,
    #[serde(rename = "severityLevel")]
    pub severity_level: Severity,
}
