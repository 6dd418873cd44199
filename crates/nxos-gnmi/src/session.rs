//! Ordered application of updates over a management channel.
//!
//! [`Transport`] is the seam for the protocol client (a gNMI channel built
//! by the orchestration layer, or an in-memory device in tests). A
//! [`Session`] sends one Set per update, strictly in slice order, and stops
//! at the first failure.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::accessor::DeviceAccessor;
use crate::error::GnmiResult;
use crate::update::{SetOperation, Update};

/// A management channel to one device.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Applies one Set element.
    async fn set(&self, op: SetOperation) -> GnmiResult<()>;

    /// Reads the subtree at `path`.
    async fn get(&self, path: &str) -> GnmiResult<Option<Value>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn set(&self, op: SetOperation) -> GnmiResult<()> {
        (**self).set(op).await
    }

    async fn get(&self, path: &str) -> GnmiResult<Option<Value>> {
        (**self).get(path).await
    }
}

/// Outcome of applying an update list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Number of updates the device accepted.
    pub applied: usize,
}

/// Applies updates to one device and answers accessor queries from it.
#[derive(Debug, Clone)]
pub struct Session<T> {
    device: String,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(device: impl Into<String>, transport: T) -> Self {
        Self {
            device: device.into(),
            transport,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `updates` in order. Every update is encoded before the first
    /// one is sent, so a malformed list leaves the device untouched.
    #[instrument(skip(self, updates), fields(device = %self.device, count = updates.len()))]
    pub async fn apply(&self, updates: &[Update]) -> GnmiResult<ApplyReport> {
        let ops = updates
            .iter()
            .map(Update::to_set_operation)
            .collect::<GnmiResult<Vec<_>>>()?;

        let mut report = ApplyReport::default();
        for (idx, op) in ops.into_iter().enumerate() {
            let path = op.path().to_string();
            debug!(index = idx, path = %path, "Sending set operation");
            if let Err(e) = self.transport.set(op).await {
                warn!(
                    index = idx,
                    path = %path,
                    applied = report.applied,
                    "Set operation failed: {}",
                    e
                );
                return Err(e);
            }
            report.applied += 1;
        }

        info!(applied = report.applied, "Applied updates");
        Ok(report)
    }
}

#[async_trait]
impl<T: Transport> DeviceAccessor for Session<T> {
    async fn get(&self, path: &str) -> GnmiResult<Option<Value>> {
        self.transport.get(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GnmiError;
    use crate::node::Schema;
    use serde::Serialize;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Serialize)]
    struct Raw(Value);

    impl Schema for Raw {}

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<SetOperation>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn set(&self, op: SetOperation) -> GnmiResult<()> {
            if self.fail_on.as_deref() == Some(op.path()) {
                return Err(GnmiError::accessor("set", "rejected by device"));
            }
            self.sent.lock().unwrap().push(op);
            Ok(())
        }

        async fn get(&self, _path: &str) -> GnmiResult<Option<Value>> {
            Ok(None)
        }
    }

    fn plan() -> Vec<Update> {
        vec![
            Update::edit("System/fm-items/isis-items", Raw(json!({"adminSt": "enabled"}))),
            Update::replace(
                "System/isis-items/inst-items/Inst-list[name=UNDERLAY]",
                Raw(json!({"name": "UNDERLAY"})),
            ),
            Update::delete("System/isis-items/if-items/InternalIf-list[id=eth1/1]"),
        ]
    }

    #[tokio::test]
    async fn test_apply_in_order() {
        let session = Session::new("leaf1", Recorder::default());
        let report = session.apply(&plan()).await.unwrap();
        assert_eq!(report.applied, 3);

        let sent = session.transport().sent.lock().unwrap();
        let kinds: Vec<_> = sent
            .iter()
            .map(|op| match op {
                SetOperation::Update { .. } => "update",
                SetOperation::Replace { .. } => "replace",
                SetOperation::Delete { .. } => "delete",
            })
            .collect();
        assert_eq!(kinds, vec!["update", "replace", "delete"]);
    }

    #[tokio::test]
    async fn test_apply_stops_at_first_failure() {
        let recorder = Recorder {
            fail_on: Some("System/isis-items/inst-items/Inst-list[name=UNDERLAY]".to_string()),
            ..Default::default()
        };
        let session = Session::new("leaf1", recorder);
        assert!(session.apply(&plan()).await.is_err());
        assert_eq!(session.transport().sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_list_sends_nothing() {
        let session = Session::new("leaf1", Recorder::default());
        let mut updates = plan();
        updates.push(Update::delete(""));
        assert!(matches!(
            session.apply(&updates).await,
            Err(GnmiError::InvalidUpdate { .. })
        ));
        assert!(session.transport().sent.lock().unwrap().is_empty());
    }
}
