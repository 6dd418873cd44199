//! IPv4 / IPv6 access lists.
//!
//! An ACL lives in exactly one of the two subtrees, chosen by its `ipv6`
//! flag. Entry prefixes must belong to that family.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};
use nxos_types::IpPrefix;

use crate::model::acl::{acl_path, Acl as AclRow, Ace, AceAction, SeqItems};

const DOMAIN: &str = "acl";

/// IP protocol numbers by name. `icmp` resolves per family.
fn protocol_number(protocol: &str, ipv6: bool) -> Option<u8> {
    match protocol.to_ascii_lowercase().as_str() {
        "ip" | "ipv6" | "any" => Some(0),
        "icmp" if ipv6 => Some(58),
        "icmp" => Some(1),
        "tcp" => Some(6),
        "udp" => Some(17),
        "gre" => Some(47),
        "esp" => Some(50),
        "ospf" => Some(89),
        "pim" => Some(103),
        _ => None,
    }
}

fn action(value: &str) -> GnmiResult<AceAction> {
    match value.to_ascii_lowercase().as_str() {
        "permit" => Ok(AceAction::Permit),
        "deny" => Ok(AceAction::Deny),
        other => Err(GnmiError::invalid_config(
            DOMAIN,
            "entries.action",
            format!("unsupported action '{}'", other),
        )),
    }
}

/// One access control entry. An entry with only a `remark` is a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclEntry {
    pub seq: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<IpPrefix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<IpPrefix>,
}

/// A named access list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acl {
    pub name: String,
    #[serde(default)]
    pub ipv6: bool,
    #[serde(default)]
    pub entries: Vec<AclEntry>,
}

impl Acl {
    fn check_family(&self, field: &str, prefix: &Option<IpPrefix>) -> GnmiResult<()> {
        match prefix {
            Some(p) if p.is_ipv6() != self.ipv6 => Err(GnmiError::invalid_config(
                DOMAIN,
                field,
                format!(
                    "{} does not match the {} access list {}",
                    p,
                    if self.ipv6 { "IPv6" } else { "IPv4" },
                    self.name
                ),
            )),
            _ => Ok(()),
        }
    }

    fn build_entry(&self, entry: &AclEntry) -> GnmiResult<Ace> {
        if entry.seq == 0 {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "entries.seq",
                "sequence numbers start at 1",
            ));
        }
        self.check_family("entries.source", &entry.source)?;
        self.check_family("entries.destination", &entry.destination)?;

        let action = entry.action.as_deref().map(action).transpose()?;
        if action.is_none() && entry.remark.is_none() {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "entries.action",
                format!("entry {} has neither an action nor a remark", entry.seq),
            ));
        }

        let protocol = match (&action, entry.protocol.as_deref()) {
            (None, _) => None,
            (Some(_), None) => Some(0),
            (Some(_), Some(name)) => Some(protocol_number(name, self.ipv6).unwrap_or_else(|| {
                warn!(acl = %self.name, seq = entry.seq, protocol = name, "Unknown protocol, matching any IP");
                0
            })),
        };

        Ok(Ace {
            seq_num: entry.seq,
            action,
            protocol,
            remark: entry.remark.clone(),
            src_prefix: entry.source.map(|p| p.address().to_string()),
            src_prefix_length: entry.source.map(|p| p.prefix_len()),
            dst_prefix: entry.destination.map(|p| p.address().to_string()),
            dst_prefix_length: entry.destination.map(|p| p.prefix_len()),
        })
    }

    fn build(&self) -> GnmiResult<AclRow> {
        if self.name.is_empty() {
            return Err(GnmiError::invalid_config(DOMAIN, "name", "must not be empty"));
        }

        let mut seq_items = SeqItems::default();
        for entry in &self.entries {
            let ace = self.build_entry(entry)?;
            if seq_items.ace_list.insert(entry.seq, ace).is_some() {
                return Err(GnmiError::invalid_config(
                    DOMAIN,
                    "entries.seq",
                    format!("sequence {} is used twice", entry.seq),
                ));
            }
        }

        Ok(AclRow {
            name: self.name.clone(),
            seq_items: (!seq_items.ace_list.is_empty()).then_some(seq_items),
        })
    }
}

#[async_trait]
impl DeviceConf for Acl {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(acl = %self.name, ipv6 = self.ipv6))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        let row = self.build()?;
        debug!(entries = self.entries.len(), "Building access list");
        Ok(vec![Update::replace(acl_path(self.ipv6, &self.name), row)])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        if self.name.is_empty() {
            return Err(GnmiError::invalid_config(DOMAIN, "name", "must not be empty"));
        }
        Ok(vec![Update::delete(acl_path(self.ipv6, &self.name))])
    }
}
