//! EVPN MAC-VRFs (`System/evpn-items`).

use serde::Serialize;
use std::collections::BTreeMap;

use nxos_gnmi::{keyed, Schema};

pub const BDEVI_PATH: &str = "System/evpn-items/bdevi-items";

/// Device encapsulation key of a VNI.
pub fn encap(vni: u32) -> String {
    format!("vxlan-{}", vni)
}

/// Path of one `BDEvi-list` row.
pub fn bdevi_path(vni: u32) -> String {
    format!("{}/BDEvi-list[encap={}]", BDEVI_PATH, encap(vni))
}

/// Route-target direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RttType {
    Import,
    Export,
}

/// `BDEvi-list[encap]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BdEvi {
    pub encap: String,
    pub rd: String,
    #[serde(rename = "rttp-items", skip_serializing_if = "Option::is_none")]
    pub rttp_items: Option<RttpItems>,
}

impl Schema for BdEvi {}

/// `rttp-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RttpItems {
    #[serde(rename = "RttP-list", serialize_with = "keyed::serialize")]
    pub rttp_list: BTreeMap<RttType, RttP>,
}

/// `RttP-list[type]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RttP {
    #[serde(rename = "type")]
    pub rtt_type: RttType,
    #[serde(rename = "ent-items")]
    pub ent_items: EntItems,
}

/// `ent-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntItems {
    #[serde(rename = "RttEntry-list", serialize_with = "keyed::serialize")]
    pub entry_list: BTreeMap<String, RttEntry>,
}

/// `RttEntry-list[rtt]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RttEntry {
    pub rtt: String,
}
