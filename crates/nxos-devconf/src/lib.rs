//! NX-OS device configuration translators.
//!
//! Each domain value implements [`nxos_gnmi::DeviceConf`] and turns itself
//! into an ordered list of tree updates:
//!
//! | Domain | Type | Updates |
//! |---|---|---|
//! | banner | [`Banner`] | Edit |
//! | dns | [`Dns`] | Edit |
//! | isis | [`IsisProcess`], [`IsisInterface`] | feature Edit, Replace row |
//! | user | [`User`], [`Users`] | Edit with ignore paths |
//! | vlan | [`VlanManager`] | Edit |
//! | grpc | [`Grpc`] | feature Edit, Edit |
//! | nxapi | [`NxApi`] | feature Edit, Edit, certificate Edit |
//! | logging | [`Logging`] | one aggregated Edit |
//! | licensing | [`Licensing`], [`CallHome`] | Edit per container |
//! | acl | [`Acl`] | Replace row |
//! | evpn | [`MacVrf`] | feature Edit, Replace row |
//!
//! [`Registry`] composes domains into a device plan; [`DeviceConfig`] builds
//! one from YAML.

pub mod acl;
pub mod banner;
pub mod config;
pub mod dns;
pub mod evpn;
pub mod feature;
pub mod grpc;
pub mod isis;
pub mod licensing;
pub mod logging;
pub mod model;
pub mod nxapi;
pub mod offline;
pub mod registry;
pub mod user;
pub mod vlan;

pub use acl::{Acl, AclEntry};
pub use banner::Banner;
pub use config::{ConfigError, DeviceConfig};
pub use dns::{Dns, DnsProvider};
pub use evpn::MacVrf;
pub use grpc::Grpc;
pub use isis::{IsisAddressFamily, IsisInterface, IsisLevel, IsisProcess, OverloadBit};
pub use licensing::{CallHome, CallHomeProfile, Licensing};
pub use logging::{FacilityAllowList, Logging, LoggingHistory, SyslogServer};
pub use model::logging::{Severity, SyslogTransport};
pub use nxapi::{NxApi, NxApiCertificate};
pub use offline::OfflineAccessor;
pub use registry::Registry;
pub use user::{User, UserRoleBinding, Users};
pub use vlan::VlanManager;
