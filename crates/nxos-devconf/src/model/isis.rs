//! IS-IS routing (`System/isis-items`).

use serde::Serialize;
use std::collections::BTreeMap;

use nxos_gnmi::{keyed, Schema};

use super::AdminSt;

pub const INST_PATH: &str = "System/isis-items/inst-items";
pub const IF_PATH: &str = "System/isis-items/if-items";

/// Path of one `Inst-list` row.
pub fn inst_path(name: &str) -> String {
    format!("{}/Inst-list[name={}]", INST_PATH, name)
}

/// Path of one `InternalIf-list` row.
pub fn if_path(id: &str) -> String {
    format!("{}/InternalIf-list[id={}]", IF_PATH, id)
}

/// Device `isType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IsType {
    #[serde(rename = "l1")]
    L1,
    #[serde(rename = "l2")]
    L2,
    #[serde(rename = "l12")]
    L12,
}

/// Device address-family `type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AfType {
    #[serde(rename = "v4")]
    V4,
    #[serde(rename = "v6")]
    V6,
}

/// `Inst-list[name]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inst {
    pub name: String,
    #[serde(rename = "dom-items", skip_serializing_if = "Option::is_none")]
    pub dom_items: Option<DomItems>,
}

impl Schema for Inst {
    fn populate_defaults(&mut self) {
        if let Some(items) = self.dom_items.as_mut() {
            items.dom_list.values_mut().for_each(Dom::fill_defaults);
        }
    }
}

/// `dom-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomItems {
    #[serde(rename = "Dom-list", serialize_with = "keyed::serialize")]
    pub dom_list: BTreeMap<String, Dom>,
}

/// `Dom-list[name]`: one VRF of the instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dom {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
    #[serde(rename = "isType", skip_serializing_if = "Option::is_none")]
    pub is_type: Option<IsType>,
    #[serde(rename = "overload-items", skip_serializing_if = "Option::is_none")]
    pub overload_items: Option<OverloadItems>,
    #[serde(rename = "af-items", skip_serializing_if = "Option::is_none")]
    pub af_items: Option<AfItems>,
}

impl Dom {
    fn fill_defaults(&mut self) {
        self.is_type.get_or_insert(IsType::L12);
    }
}

/// `overload-items`: set-overload-bit on startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverloadItems {
    #[serde(rename = "adminSt", skip_serializing_if = "Option::is_none")]
    pub admin_st: Option<String>,
    #[serde(rename = "startupTime", skip_serializing_if = "Option::is_none")]
    pub startup_time: Option<u32>,
}

/// `af-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AfItems {
    #[serde(rename = "DomAf-list", serialize_with = "keyed::serialize")]
    pub af_list: BTreeMap<AfType, DomAf>,
}

/// `DomAf-list[type]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomAf {
    #[serde(rename = "type")]
    pub af_type: AfType,
}

/// `InternalIf-list[id]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InternalIf {
    pub id: String,
    #[serde(rename = "instance", skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom: Option<String>,
    #[serde(rename = "v4enable", skip_serializing_if = "Option::is_none")]
    pub v4_enable: Option<bool>,
    #[serde(rename = "v6enable", skip_serializing_if = "Option::is_none")]
    pub v6_enable: Option<bool>,
    #[serde(rename = "networkTypeP2P", skip_serializing_if = "Option::is_none")]
    pub network_type_p2p: Option<AdminSt>,
}

impl Schema for InternalIf {
    fn populate_defaults(&mut self) {
        self.dom.get_or_insert_with(|| "default".to_string());
        self.v4_enable.get_or_insert(true);
        self.v6_enable.get_or_insert(true);
        self.network_type_p2p.get_or_insert(AdminSt::Disabled);
    }
}
