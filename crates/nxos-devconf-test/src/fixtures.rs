//! Device state fixtures
//!
//! Canned devices for translator tests: a leaf switch with its front-panel
//! and loopback interfaces, and accessors that fail or never answer.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use nxos_gnmi::{DeviceAccessor, GnmiError, GnmiResult};

use crate::MemoryDevice;

/// Interfaces present on [`leaf_device`].
pub const LEAF_INTERFACES: &[&str] = &[
    "Ethernet1/1",
    "Ethernet1/2",
    "Ethernet1/3",
    "Ethernet1/4",
    "Ethernet1/49/1",
    "loopback0",
    "loopback1",
    "mgmt0",
];

/// A leaf switch with [`LEAF_INTERFACES`] and no other configuration.
pub fn leaf_device() -> MemoryDevice {
    MemoryDevice::with_interfaces(LEAF_INTERFACES)
}

/// An accessor whose every query fails as a dropped connection would.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableDevice;

#[async_trait]
impl DeviceAccessor for UnreachableDevice {
    async fn get(&self, path: &str) -> GnmiResult<Option<Value>> {
        Err(GnmiError::accessor(
            format!("get {}", path),
            "connection reset by peer",
        ))
    }
}

/// An accessor that answers after `delay`.
#[derive(Debug, Clone, Copy)]
pub struct StalledDevice {
    pub delay: Duration,
}

impl Default for StalledDevice {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(3600),
        }
    }
}

#[async_trait]
impl DeviceAccessor for StalledDevice {
    async fn get(&self, _path: &str) -> GnmiResult<Option<Value>> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}
