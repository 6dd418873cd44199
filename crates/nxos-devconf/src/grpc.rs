//! gRPC management agent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};

use crate::feature;
use crate::model::fm;
use crate::model::grpc::{GrpcItems, PATH};

const DOMAIN: &str = "grpc";

/// Lowest port the agent may listen on.
pub const MIN_PORT: u16 = 1024;

fn enabled() -> bool {
    true
}

/// gRPC agent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grpc {
    #[serde(default = "enabled")]
    pub enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrf: Option<String>,
    /// Trustpoint holding the server certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trustpoint: Option<String>,
}

impl Default for Grpc {
    fn default() -> Self {
        Self {
            enable: true,
            port: None,
            vrf: None,
            trustpoint: None,
        }
    }
}

#[async_trait]
impl DeviceConf for Grpc {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(enable = self.enable))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        if !self.enable {
            return Ok(vec![feature::disable(fm::GRPC_PATH)]);
        }

        if let Some(port) = self.port {
            if port < MIN_PORT {
                return Err(GnmiError::invalid_config(
                    DOMAIN,
                    "port",
                    format!("{} is below {}", port, MIN_PORT),
                ));
            }
        }
        if self.trustpoint.as_deref() == Some("") {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "trustpoint",
                "must not be empty",
            ));
        }

        debug!(port = ?self.port, vrf = ?self.vrf, "Building gRPC agent");
        Ok(vec![
            feature::enable(fm::GRPC_PATH),
            Update::edit(
                PATH,
                GrpcItems {
                    port: self.port,
                    use_vrf: self.vrf.clone(),
                    cert: self.trustpoint.clone(),
                },
            ),
        ])
    }

    /// Disabling the agent could strip programmatic access to the device.
    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Err(GnmiError::unsupported(
            DOMAIN,
            "reset would disable the gRPC agent",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxos_devconf_test::{assert_edit_at, assert_kinds, MemoryDevice};
    use nxos_gnmi::UpdateKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_feature_then_body() {
        let grpc = Grpc {
            port: Some(50051),
            vrf: Some("management".to_string()),
            trustpoint: Some("grpc-tp".to_string()),
            ..Default::default()
        };
        let updates = grpc.to_updates(&MemoryDevice::new()).await.unwrap();
        assert_kinds(&updates, &[UpdateKind::Editing, UpdateKind::Editing]);
        assert_edit_at(&updates[0], fm::GRPC_PATH, &json!({"adminSt": "enabled"}));
        assert_edit_at(
            &updates[1],
            PATH,
            &json!({"port": 50051, "useVrf": "management", "cert": "grpc-tp"}),
        );
    }

    #[tokio::test]
    async fn test_disabled_skips_validation() {
        let grpc = Grpc {
            enable: false,
            port: Some(22),
            ..Default::default()
        };
        let updates = grpc.to_updates(&MemoryDevice::new()).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_edit_at(&updates[0], fm::GRPC_PATH, &json!({"adminSt": "disabled"}));
    }

    #[tokio::test]
    async fn test_privileged_port_rejected() {
        let grpc = Grpc {
            port: Some(443),
            ..Default::default()
        };
        let err = grpc.to_updates(&MemoryDevice::new()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_reset_refused() {
        let err = Grpc::default().reset(&MemoryDevice::new()).await.unwrap_err();
        assert!(matches!(err, GnmiError::Unsupported { .. }));
        assert!(!err.is_retryable());
    }
}
