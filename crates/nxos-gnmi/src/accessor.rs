//! Device accessor capability.
//!
//! Translators receive a [`DeviceAccessor`] for read-only queries against
//! live device state. It is also the seam for test doubles.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use nxos_types::Interface;

use crate::error::{GnmiError, GnmiResult};

/// Read-only queries against the device configuration tree.
#[async_trait]
pub trait DeviceAccessor: Send + Sync {
    /// Reads the subtree at `path`; `None` when nothing is configured there.
    async fn get(&self, path: &str) -> GnmiResult<Option<Value>>;

    /// Returns true if anything exists at `path`.
    async fn exists(&self, path: &str) -> GnmiResult<bool> {
        Ok(self.get(path).await?.is_some())
    }
}

/// Returns true if `interface` exists on the device.
pub async fn interface_exists(
    accessor: &dyn DeviceAccessor,
    interface: &Interface,
) -> GnmiResult<bool> {
    let exists = accessor.exists(&interface.device_path()).await?;
    debug!(interface = %interface, exists, "Checked interface existence");
    Ok(exists)
}

/// Bounds every query of the wrapped accessor by a deadline.
///
/// Dropping a translator future cancels any in-flight query; this wrapper
/// adds the deadline half of the contract.
#[derive(Debug, Clone)]
pub struct DeadlineAccessor<A> {
    inner: A,
    timeout: Duration,
}

impl<A> DeadlineAccessor<A> {
    pub fn new(inner: A, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

#[async_trait]
impl<A: DeviceAccessor> DeviceAccessor for DeadlineAccessor<A> {
    async fn get(&self, path: &str) -> GnmiResult<Option<Value>> {
        tokio::time::timeout(self.timeout, self.inner.get(path))
            .await
            .map_err(|_| GnmiError::Timeout {
                operation: format!("get {}", path),
                timeout: self.timeout,
            })?
    }

    async fn exists(&self, path: &str) -> GnmiResult<bool> {
        tokio::time::timeout(self.timeout, self.inner.exists(path))
            .await
            .map_err(|_| GnmiError::Timeout {
                operation: format!("exists {}", path),
                timeout: self.timeout,
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    struct Canned(BTreeMap<String, Value>);

    #[async_trait]
    impl DeviceAccessor for Canned {
        async fn get(&self, path: &str) -> GnmiResult<Option<Value>> {
            Ok(self.0.get(path).cloned())
        }
    }

    struct Stalled;

    #[async_trait]
    impl DeviceAccessor for Stalled {
        async fn get(&self, _path: &str) -> GnmiResult<Option<Value>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_interface_exists_uses_device_path() {
        let mut tree = BTreeMap::new();
        tree.insert(
            "System/intf-items/phys-items/PhysIf-list[id=eth1/1]".to_string(),
            json!({"id": "eth1/1"}),
        );
        let accessor = Canned(tree);

        let present: Interface = "Ethernet1/1".parse().unwrap();
        let absent: Interface = "Ethernet1/2".parse().unwrap();
        assert!(interface_exists(&accessor, &present).await.unwrap());
        assert!(!interface_exists(&accessor, &absent).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_exceeded() {
        let accessor = DeadlineAccessor::new(Stalled, Duration::from_secs(5));
        let err = accessor.exists("System/dns-items").await.unwrap_err();
        assert!(matches!(err, GnmiError::Timeout { .. }));
        assert!(err.is_retryable());
    }
}
