//! NX-API agent (`System/nxapi-items`).

use serde::Serialize;

use nxos_gnmi::Schema;

use super::AdminSt;

pub const PATH: &str = "System/nxapi-items";

pub const DEFAULT_HTTP_PORT: u16 = 80;
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// `nxapi-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NxapiItems {
    #[serde(rename = "httpPort", skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    #[serde(rename = "httpsPort", skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
    #[serde(rename = "useVrf", skip_serializing_if = "Option::is_none")]
    pub use_vrf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trustpoint: Option<String>,
    #[serde(rename = "certFile", skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,
    #[serde(rename = "keyFile", skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    #[serde(rename = "certEnable", skip_serializing_if = "Option::is_none")]
    pub cert_enable: Option<AdminSt>,
}

impl Schema for NxapiItems {
    fn populate_defaults(&mut self) {
        self.http_port.get_or_insert(DEFAULT_HTTP_PORT);
        self.https_port.get_or_insert(DEFAULT_HTTPS_PORT);
        self.cert_enable.get_or_insert(AdminSt::Disabled);
    }
}
