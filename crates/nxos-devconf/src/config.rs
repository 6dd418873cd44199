//! YAML device configuration.
//!
//! A [`DeviceConfig`] carries optional values for each domain and builds an
//! explicit [`Registry`] from them in a fixed domain order.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use nxos_gnmi::{GnmiError, GnmiResult};
use nxos_types::{validate_reserved_ranges, VlanRange};

use crate::acl::Acl;
use crate::banner::Banner;
use crate::dns::Dns;
use crate::evpn::MacVrf;
use crate::grpc::Grpc;
use crate::isis::{IsisInterface, IsisProcess};
use crate::licensing::{CallHome, Licensing};
use crate::logging::{FacilityAllowList, Logging};
use crate::nxapi::NxApi;
use crate::registry::Registry;
use crate::user::{User, Users};
use crate::vlan::VlanManager;

/// Errors loading a device configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse device configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Invalid(#[from] GnmiError),
}

/// Desired state of one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeviceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_manager: Option<VlanManager>,
    /// VLANs reserved for infrastructure use.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reserved_vlans: Vec<VlanRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<Dns>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,
    /// Replaces the built-in logging facility allow-list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_facilities: Option<FacilityAllowList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licensing: Option<Licensing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_home: Option<CallHome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc: Option<Grpc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nxapi: Option<NxApi>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isis: Vec<IsisProcess>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isis_interfaces: Vec<IsisInterface>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acls: Vec<Acl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mac_vrfs: Vec<MacVrf>,
}

impl DeviceConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&yaml)?;
        info!(path = %path.display(), "Loaded device configuration");
        Ok(config)
    }

    /// Builds the registry. Feature-level domains come before the keyed
    /// rows that depend on them.
    pub fn into_registry(self) -> GnmiResult<Registry> {
        validate_reserved_ranges(&self.reserved_vlans).map_err(|e| {
            GnmiError::invalid_config("vlan", "reservedVlans", e.to_string())
        })?;

        let mut registry = Registry::new();

        if let Some(vlan_manager) = self.vlan_manager {
            registry.register("vlan", vlan_manager)?;
        }
        if let Some(banner) = self.banner {
            registry.register("banner", banner)?;
        }
        if !self.users.is_empty() {
            registry.register("users", Users(self.users))?;
        }
        if let Some(dns) = self.dns {
            registry.register("dns", dns)?;
        }
        if let Some(mut logging) = self.logging {
            if let Some(allow_list) = self.logging_facilities {
                logging = logging.with_allow_list(allow_list);
            }
            registry.register("logging", logging)?;
        }
        if let Some(licensing) = self.licensing {
            registry.register("licensing", licensing)?;
        }
        if let Some(call_home) = self.call_home {
            registry.register("callhome", call_home)?;
        }
        if let Some(grpc) = self.grpc {
            registry.register("grpc", grpc)?;
        }
        if let Some(nxapi) = self.nxapi {
            registry.register("nxapi", nxapi)?;
        }
        for process in self.isis {
            registry.register(format!("isis/{}", process.name), process)?;
        }
        for binding in self.isis_interfaces {
            registry.register(format!("isis-interface/{}", binding.interface), binding)?;
        }
        for acl in self.acls {
            registry.register(format!("acl/{}", acl.name), acl)?;
        }
        for mac_vrf in self.mac_vrfs {
            registry.register(format!("mac-vrf/{}", mac_vrf.vni), mac_vrf)?;
        }

        Ok(registry)
    }
}
