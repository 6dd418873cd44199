//! Feature manager (`System/fm-items`).

use serde::Serialize;

use nxos_gnmi::Schema;

use super::AdminSt;

pub const ISIS_PATH: &str = "System/fm-items/isis-items";
pub const GRPC_PATH: &str = "System/fm-items/grpc-items";
pub const NXAPI_PATH: &str = "System/fm-items/nxapi-items";
pub const EVPN_PATH: &str = "System/fm-items/evpn-items";

/// `System/fm-items/<feature>-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureItems {
    #[serde(rename = "adminSt", skip_serializing_if = "Option::is_none")]
    pub admin_st: Option<AdminSt>,
}

impl Schema for FeatureItems {
    fn populate_defaults(&mut self) {
        self.admin_st.get_or_insert(AdminSt::Disabled);
    }
}
