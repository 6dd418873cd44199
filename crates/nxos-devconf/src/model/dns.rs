//! DNS resolver (`System/dns-items`).

use serde::Serialize;
use std::collections::BTreeMap;

use nxos_gnmi::{keyed, Schema};

use super::AdminSt;

pub const PATH: &str = "System/dns-items";

/// The single profile that aggregates all providers.
pub const DEFAULT_PROFILE: &str = "default";

/// `dns-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DnsItems {
    #[serde(rename = "adminSt", skip_serializing_if = "Option::is_none")]
    pub admin_st: Option<AdminSt>,
    #[serde(rename = "prof-items", skip_serializing_if = "Option::is_none")]
    pub prof_items: Option<ProfItems>,
}

impl Schema for DnsItems {
    fn populate_defaults(&mut self) {
        self.admin_st.get_or_insert(AdminSt::Enabled);
    }
}

/// `prof-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfItems {
    #[serde(rename = "Prof-list", serialize_with = "keyed::serialize")]
    pub prof_list: BTreeMap<String, Prof>,
}

/// `Prof-list[name]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Prof {
    pub name: String,
    #[serde(rename = "dom-items", skip_serializing_if = "Option::is_none")]
    pub dom_items: Option<DomItems>,
    #[serde(rename = "vrf-items", skip_serializing_if = "Option::is_none")]
    pub vrf_items: Option<VrfItems>,
}

/// `dom-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomItems {
    pub name: String,
}

/// `vrf-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VrfItems {
    #[serde(rename = "Vrf-list", serialize_with = "keyed::serialize")]
    pub vrf_list: BTreeMap<String, Vrf>,
}

/// `Vrf-list[name]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Vrf {
    pub name: String,
    #[serde(rename = "prov-items")]
    pub prov_items: ProvItems,
}

/// `prov-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProvItems {
    #[serde(rename = "Provider-list", serialize_with = "keyed::serialize")]
    pub provider_list: BTreeMap<String, Provider>,
}

/// `Provider-list[addr]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Provider {
    pub addr: String,
    #[serde(rename = "srcIf", skip_serializing_if = "Option::is_none")]
    pub src_if: Option<String>,
}
