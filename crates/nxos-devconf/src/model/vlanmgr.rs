//! VLAN manager (`System/vlanmgr-items`).

use serde::Serialize;

use nxos_gnmi::Schema;

pub const INST_PATH: &str = "System/vlanmgr-items/inst-items";

/// `vlanmgr-items/inst-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstItems {
    #[serde(rename = "longName", skip_serializing_if = "Option::is_none")]
    pub long_name: Option<bool>,
}

impl Schema for InstItems {
    fn populate_defaults(&mut self) {
        self.long_name.get_or_insert(false);
    }
}
