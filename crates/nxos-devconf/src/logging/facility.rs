use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Facilities the device accepts in `Facility-list`.
///
/// The device advertises facilities it ignores and rejects some it does not
/// advertise, so the emitted set is a curated list. It depends on the
/// firmware release and can be replaced from configuration.
pub const DEFAULT_FACILITIES: &[&str] = &[
    "aaa",
    "acllog",
    "aclmgr",
    "adjmgr",
    "arp",
    "bgp",
    "bootvar",
    "callhome",
    "capability",
    "cdp",
    "cert_enroll",
    "clis",
    "copp",
    "eth_port_channel",
    "ethpm",
    "evmc",
    "feature-mgr",
    "hsrp_engine",
    "ifmgr",
    "interface-vlan",
    "ip",
    "ipv6",
    "isis",
    "l3vm",
    "lacp",
    "licmgr",
    "lldp",
    "m2rib",
    "monitor",
    "netstack",
    "nfm",
    "ntp",
    "nxapi",
    "ospf",
    "pim",
    "platform",
    "port-profile",
    "radius",
    "routing",
    "sal",
    "securityd",
    "spanning-tree",
    "syslog",
    "tacacs",
    "u6rib",
    "udld",
    "urib",
    "vlan_mgr",
    "vmm",
    "vpc",
    "vshd",
];

/// The set of facility names that may be emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityAllowList(BTreeSet<String>);

impl Default for FacilityAllowList {
    fn default() -> Self {
        DEFAULT_FACILITIES.iter().copied().collect()
    }
}

impl FacilityAllowList {
    pub fn contains(&self, facility: &str) -> bool {
        self.0.contains(facility)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FacilityAllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
