//! Common types for NX-OS device configuration.
//!
//! This crate provides type-safe representations of the values shared by
//! the device configuration translators:
//!
//! - [`Interface`]: interface names normalized to the device short form
//! - [`RouteTarget`] / [`RouteDistinguisher`]: BGP extended communities in
//!   the device wire-string format
//! - [`VlanId`] / [`VlanRange`]: IEEE 802.1Q identifiers and range admission
//! - [`IpPrefix`]: IPv4 and IPv6 prefixes (CIDR notation)

mod extcomm;
mod intf;
mod ip;
mod vlan;

pub use extcomm::{ExtCommunityType, RouteDistinguisher, RouteTarget};
pub use intf::{Interface, InterfaceKind};
pub use ip::IpPrefix;
pub use vlan::{validate_reserved_ranges, VlanId, VlanRange, MAX_RESERVED_VLANS};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid interface name: {0}")]
    InvalidInterface(String),

    #[error("invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("invalid IP prefix format: {0}")]
    InvalidIpPrefix(String),

    #[error("invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVlanId(u16),

    #[error("invalid VLAN range: {0}")]
    InvalidVlanRange(String),

    #[error("overlapping VLAN ranges: {first} and {second}")]
    OverlappingVlanRanges { first: VlanRange, second: VlanRange },

    #[error("too many VLANs: {count} exceeds the limit of {limit}")]
    TooManyVlans { count: usize, limit: usize },

    #[error("invalid route target: {0}")]
    InvalidRouteTarget(String),

    #[error("invalid route distinguisher: {0}")]
    InvalidRouteDistinguisher(String),
}
