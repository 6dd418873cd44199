//! Access lists (`System/acl-items`).

use serde::Serialize;
use std::collections::BTreeMap;

use nxos_gnmi::{keyed, Schema};

pub const IPV4_PATH: &str = "System/acl-items/ipv4-items/name-items";
pub const IPV6_PATH: &str = "System/acl-items/ipv6-items/name-items";

/// Path of one `ACL-list` row in the v4 or v6 subtree.
pub fn acl_path(ipv6: bool, name: &str) -> String {
    let base = if ipv6 { IPV6_PATH } else { IPV4_PATH };
    format!("{}/ACL-list[name={}]", base, name)
}

/// Device entry actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AceAction {
    Permit,
    Deny,
}

/// `ACL-list[name]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Acl {
    pub name: String,
    #[serde(rename = "seq-items", skip_serializing_if = "Option::is_none")]
    pub seq_items: Option<SeqItems>,
}

impl Schema for Acl {}

/// `seq-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeqItems {
    #[serde(rename = "ACE-list", serialize_with = "keyed::serialize")]
    pub ace_list: BTreeMap<u32, Ace>,
}

/// `ACE-list[seqNum]`. A remark row carries only `remark`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ace {
    #[serde(rename = "seqNum")]
    pub seq_num: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AceAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(rename = "srcPrefix", skip_serializing_if = "Option::is_none")]
    pub src_prefix: Option<String>,
    #[serde(rename = "srcPrefixLength", skip_serializing_if = "Option::is_none")]
    pub src_prefix_length: Option<u8>,
    #[serde(rename = "dstPrefix", skip_serializing_if = "Option::is_none")]
    pub dst_prefix: Option<String>,
    #[serde(rename = "dstPrefixLength", skip_serializing_if = "Option::is_none")]
    pub dst_prefix_length: Option<u8>,
}
