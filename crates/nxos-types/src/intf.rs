//! Interface name normalization.
//!
//! Users write interface names in many forms (`Ethernet1/1`, `Eth1/1`,
//! `Loopback0`). The device tree keys interfaces by a short lowercase form
//! (`eth1/1`, `lo0`), which is what [`Interface`] produces.

use crate::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static PHYSICAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:ethernet|eth|e)(\d+/\d+(?:/\d+)?)$").expect("Invalid regex pattern")
});

static LOOPBACK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:loopback|lo)(\d+)$").expect("Invalid regex pattern"));

static MGMT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:management|mgmt)(\d+)$").expect("Invalid regex pattern"));

static VLAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^vlan(\d+)$").expect("Invalid regex pattern"));

static PORT_CHANNEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:port-channel|portchannel|po)(\d+)$").expect("Invalid regex pattern")
});

/// Classification of a device interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    /// Front-panel Ethernet port (`eth1/1`, breakout `eth1/1/2`).
    Physical,
    /// Loopback interface (`lo0`).
    Loopback,
    /// Out-of-band management port (`mgmt0`).
    Management,
    /// Switched virtual interface (`vlan10`).
    Vlan,
    /// Port-channel (`po1`).
    PortChannel,
}

/// An interface name normalized to the device short form.
///
/// # Examples
///
/// ```
/// use nxos_types::{Interface, InterfaceKind};
///
/// let intf: Interface = "Ethernet1/1".parse().unwrap();
/// assert_eq!(intf.name(), "eth1/1");
/// assert_eq!(intf.kind(), InterfaceKind::Physical);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interface {
    kind: InterfaceKind,
    name: String,
}

impl Interface {
    /// Returns the normalized short name (e.g. `eth1/1`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> InterfaceKind {
        self.kind
    }

    /// Returns true for physical and loopback interfaces, the only kinds a
    /// routing protocol binding may attach to.
    pub const fn is_routable_port(&self) -> bool {
        matches!(self.kind, InterfaceKind::Physical | InterfaceKind::Loopback)
    }

    /// Absolute path of this interface in the device configuration tree.
    pub fn device_path(&self) -> String {
        let (container, list) = match self.kind {
            InterfaceKind::Physical => ("System/intf-items/phys-items", "PhysIf-list"),
            InterfaceKind::Loopback => ("System/intf-items/lb-items", "LbRtdIf-list"),
            InterfaceKind::Management => ("System/mgmt-items", "MgmtIf-list"),
            InterfaceKind::Vlan => ("System/intf-items/svi-items", "If-list"),
            InterfaceKind::PortChannel => ("System/intf-items/aggr-items", "AggrIf-list"),
        };
        format!("{}/{}[id={}]", container, list, self.name)
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Interface {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let table: [(&Lazy<Regex>, InterfaceKind, &str); 5] = [
            (&PHYSICAL_RE, InterfaceKind::Physical, "eth"),
            (&LOOPBACK_RE, InterfaceKind::Loopback, "lo"),
            (&MGMT_RE, InterfaceKind::Management, "mgmt"),
            (&VLAN_RE, InterfaceKind::Vlan, "vlan"),
            (&PORT_CHANNEL_RE, InterfaceKind::PortChannel, "po"),
        ];

        for (re, kind, prefix) in table {
            if let Some(caps) = re.captures(s) {
                return Ok(Interface {
                    kind,
                    name: format!("{}{}", prefix, &caps[1]),
                });
            }
        }

        Err(ParseError::InvalidInterface(s.to_string()))
    }
}

impl TryFrom<String> for Interface {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Interface> for String {
    fn from(intf: Interface) -> String {
        intf.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_physical_forms() {
        for name in ["Ethernet1/1", "ethernet1/1", "Eth1/1", "eth1/1", "e1/1"] {
            let intf: Interface = name.parse().unwrap();
            assert_eq!(intf.name(), "eth1/1", "input {}", name);
            assert_eq!(intf.kind(), InterfaceKind::Physical);
        }

        let breakout: Interface = "Ethernet1/49/2".parse().unwrap();
        assert_eq!(breakout.name(), "eth1/49/2");
    }

    #[test]
    fn test_loopback_and_mgmt() {
        let lo: Interface = "Loopback0".parse().unwrap();
        assert_eq!(lo.name(), "lo0");
        assert!(lo.is_routable_port());

        let mgmt: Interface = "mgmt0".parse().unwrap();
        assert_eq!(mgmt.kind(), InterfaceKind::Management);
        assert!(!mgmt.is_routable_port());
    }

    #[test]
    fn test_logical_kinds() {
        let svi: Interface = "Vlan10".parse().unwrap();
        assert_eq!(svi.name(), "vlan10");

        let po: Interface = "port-channel12".parse().unwrap();
        assert_eq!(po.name(), "po12");
    }

    #[test]
    fn test_invalid_names() {
        assert!("Ethernet1".parse::<Interface>().is_err());
        assert!("tunnel5".parse::<Interface>().is_err());
        assert!("".parse::<Interface>().is_err());
    }

    #[test]
    fn test_device_path() {
        let intf: Interface = "Ethernet1/1".parse().unwrap();
        assert_eq!(
            intf.device_path(),
            "System/intf-items/phys-items/PhysIf-list[id=eth1/1]"
        );

        let lo: Interface = "lo1".parse().unwrap();
        assert_eq!(
            lo.device_path(),
            "System/intf-items/lb-items/LbRtdIf-list[id=lo1]"
        );
    }
}
