//! Call home (`System/callhome-items`).

use serde::Serialize;

use nxos_gnmi::Schema;

use super::AdminSt;

pub const INST_PATH: &str = "System/callhome-items/inst-items";
pub const EMAIL_PATH: &str = "System/callhome-items/inst-items/email-items";
pub const VRF_PATH: &str = "System/callhome-items/inst-items/vrf-items";
pub const DESTPROF_PATH: &str = "System/callhome-items/inst-items/destprof-items";

/// Path of one `DestProf-list` row.
pub fn destprof_path(seq: u32) -> String {
    format!("{}/DestProf-list[seq={}]", DESTPROF_PATH, seq)
}

/// `callhome-items/inst-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstItems {
    #[serde(rename = "adminSt", skip_serializing_if = "Option::is_none")]
    pub admin_st: Option<AdminSt>,
}

impl Schema for InstItems {
    fn populate_defaults(&mut self) {
        self.admin_st.get_or_insert(AdminSt::Disabled);
    }
}

/// `email-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmailItems {
    #[serde(rename = "contactEmail", skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl Schema for EmailItems {}

/// `vrf-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VrfItems {
    #[serde(rename = "vrfName", skip_serializing_if = "Option::is_none")]
    pub vrf_name: Option<String>,
}

impl Schema for VrfItems {}

/// `DestProf-list[seq]`: one HTTP destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DestProf {
    pub seq: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Schema for DestProf {}
