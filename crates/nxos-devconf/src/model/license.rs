//! Smart licensing (`System/licensemanager-items`).

use serde::Serialize;

use nxos_gnmi::Schema;

pub const SMART_LICENSING_PATH: &str =
    "System/licensemanager-items/inst-items/smartlicensing-items";

/// Device `transportMode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Cslu,
    Smart,
}

/// `smartlicensing-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SmartLicensingItems {
    #[serde(rename = "transport-items", skip_serializing_if = "Option::is_none")]
    pub transport_items: Option<TransportItems>,
}

impl Schema for SmartLicensingItems {
    fn populate_defaults(&mut self) {
        self.transport_items
            .get_or_insert_with(TransportItems::default)
            .transport_mode
            .get_or_insert(TransportMode::Cslu);
    }
}

/// `transport-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransportItems {
    #[serde(rename = "transportMode", skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "csluUrl", skip_serializing_if = "Option::is_none")]
    pub cslu_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrf: Option<String>,
}
