//! Schema-typed subtrees of the NX-OS device configuration tree.
//!
//! Field names follow the device JSON encoding. Optional fields are left out
//! of the encoding when unset so Editing updates only touch what they carry.
//! Keyed lists are `BTreeMap`s encoded as arrays (see [`nxos_gnmi::keyed`]).

pub mod acl;
pub mod callhome;
pub mod dns;
pub mod evpn;
pub mod fm;
pub mod grpc;
pub mod isis;
pub mod license;
pub mod logging;
pub mod nxapi;
pub mod userext;
pub mod vlanmgr;

use serde::Serialize;

/// Administrative state leaf shared by most containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminSt {
    #[default]
    Enabled,
    Disabled,
}

impl From<bool> for AdminSt {
    fn from(enabled: bool) -> Self {
        if enabled {
            AdminSt::Enabled
        } else {
            AdminSt::Disabled
        }
    }
}
