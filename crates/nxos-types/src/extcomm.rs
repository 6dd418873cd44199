//! BGP extended community encoding for route targets and distinguishers.
//!
//! Operators write route targets as `asn:nn` or `ip:nn`. The device expects
//! the typed wire string, e.g. `route-target:as2-nn2:65000:100`. The type is
//! chosen from the administrator field (IPv4 address, 2-byte or 4-byte ASN)
//! and the size of the assigned number.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Extended community layout, per RFC 4360 / RFC 5668.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtCommunityType {
    /// 2-byte ASN administrator, 4-byte assigned number.
    As2Nn4,
    /// 2-byte ASN administrator, 2-byte assigned number.
    As2Nn2,
    /// 4-byte ASN administrator, 2-byte assigned number.
    As4Nn2,
    /// IPv4 address administrator, 2-byte assigned number.
    Ipv4Nn2,
}

impl ExtCommunityType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExtCommunityType::As2Nn4 => "as2-nn4",
            ExtCommunityType::As2Nn2 => "as2-nn2",
            ExtCommunityType::As4Nn2 => "as4-nn2",
            ExtCommunityType::Ipv4Nn2 => "ipv4-nn2",
        }
    }
}

impl fmt::Display for ExtCommunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed `admin:assigned` pair with its selected community type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ExtCommunity {
    kind: ExtCommunityType,
    admin: String,
    assigned: u32,
}

impl ExtCommunity {
    /// Returns `None` when the input is malformed; callers wrap it in
    /// their own error variant.
    fn parse(s: &str) -> Option<Self> {
        let (admin, assigned) = s.trim().split_once(':')?;
        let assigned: u32 = assigned.parse().ok()?;
        let fits_nn2 = assigned <= u32::from(u16::MAX);

        if let Ok(ip) = admin.parse::<Ipv4Addr>() {
            return fits_nn2.then(|| ExtCommunity {
                kind: ExtCommunityType::Ipv4Nn2,
                admin: ip.to_string(),
                assigned,
            });
        }

        let asn: u32 = admin.parse().ok()?;
        let kind = match (asn <= u32::from(u16::MAX), fits_nn2) {
            (true, true) => ExtCommunityType::As2Nn2,
            (true, false) => ExtCommunityType::As2Nn4,
            (false, true) => ExtCommunityType::As4Nn2,
            (false, false) => return None,
        };

        Some(ExtCommunity {
            kind,
            admin: asn.to_string(),
            assigned,
        })
    }

    fn encode(&self, prefix: &str) -> String {
        format!("{}:{}:{}:{}", prefix, self.kind, self.admin, self.assigned)
    }
}

/// A route target, written `65000:100`, `10.0.0.1:100` or `auto`.
///
/// # Examples
///
/// ```
/// use nxos_types::RouteTarget;
///
/// let rt: RouteTarget = "65000:100".parse().unwrap();
/// assert_eq!(rt.encode(), "route-target:as2-nn2:65000:100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteTarget {
    raw: String,
    community: Option<ExtCommunity>,
}

impl RouteTarget {
    const PREFIX: &'static str = "route-target";

    /// Returns the device wire-format string.
    pub fn encode(&self) -> String {
        match &self.community {
            Some(c) => c.encode(Self::PREFIX),
            None => format!("{}:unknown:0:0", Self::PREFIX),
        }
    }

    pub fn is_auto(&self) -> bool {
        self.community.is_none()
    }

    /// Returns the selected community type, `None` for `auto`.
    pub fn kind(&self) -> Option<ExtCommunityType> {
        self.community.as_ref().map(|c| c.kind)
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RouteTarget {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let community = if s.trim().eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(ExtCommunity::parse(s).ok_or_else(|| ParseError::InvalidRouteTarget(s.to_string()))?)
        };
        Ok(RouteTarget {
            raw: s.trim().to_string(),
            community,
        })
    }
}

impl TryFrom<String> for RouteTarget {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RouteTarget> for String {
    fn from(rt: RouteTarget) -> String {
        rt.raw
    }
}

/// A route distinguisher, written like a route target or `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteDistinguisher {
    raw: String,
    community: Option<ExtCommunity>,
}

impl RouteDistinguisher {
    const PREFIX: &'static str = "rd";

    /// Returns the device wire-format string.
    pub fn encode(&self) -> String {
        match &self.community {
            Some(c) => c.encode(Self::PREFIX),
            None => format!("{}:unknown:0:0", Self::PREFIX),
        }
    }

    pub fn is_auto(&self) -> bool {
        self.community.is_none()
    }
}

impl Default for RouteDistinguisher {
    fn default() -> Self {
        RouteDistinguisher {
            raw: "auto".to_string(),
            community: None,
        }
    }
}

impl fmt::Display for RouteDistinguisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RouteDistinguisher {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let community = if s.trim().eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(
                ExtCommunity::parse(s)
                    .ok_or_else(|| ParseError::InvalidRouteDistinguisher(s.to_string()))?,
            )
        };
        Ok(RouteDistinguisher {
            raw: s.trim().to_string(),
            community,
        })
    }
}

impl TryFrom<String> for RouteDistinguisher {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RouteDistinguisher> for String {
    fn from(rd: RouteDistinguisher) -> String {
        rd.raw
    }
}
