//! gRPC agent (`System/grpc-items`).

use serde::Serialize;

use nxos_gnmi::Schema;

pub const PATH: &str = "System/grpc-items";

pub const DEFAULT_PORT: u16 = 50051;

/// `grpc-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrpcItems {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(rename = "useVrf", skip_serializing_if = "Option::is_none")]
    pub use_vrf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
}

impl Schema for GrpcItems {
    fn populate_defaults(&mut self) {
        self.port.get_or_insert(DEFAULT_PORT);
    }
}
