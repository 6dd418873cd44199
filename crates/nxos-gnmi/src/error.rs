//! Error types for translator and update-pipeline operations.
//!
//! The variants follow the taxonomy callers act on: validation and
//! unsupported-operation errors are never retried, precondition and
//! accessor errors may succeed later.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for translator operations.
pub type GnmiResult<T> = Result<T, GnmiError>;

/// Errors that can occur while building or applying updates.
#[derive(Debug, Error)]
pub enum GnmiError {
    /// A configuration value violates a device-imposed constraint.
    #[error("{domain}: invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The translator that rejected the value.
        domain: &'static str,
        /// The offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// A referenced interface does not exist on the device.
    #[error("{domain}: interface '{interface}' does not exist on the device")]
    InterfaceNotFound {
        /// The translator that required the interface.
        domain: &'static str,
        /// The normalized interface name.
        interface: String,
    },

    /// The translator intentionally refuses this operation.
    #[error("{domain}: operation not supported: {operation}")]
    Unsupported {
        /// The refusing translator.
        domain: &'static str,
        /// Description of the refused operation.
        operation: String,
    },

    /// The device accessor or management channel failed.
    #[error("Device access failed: {operation}: {message}")]
    Accessor {
        /// The operation that failed (e.g., "get", "set").
        operation: String,
        /// Error message.
        message: String,
    },

    /// A device query exceeded its deadline.
    #[error("Device access timed out after {timeout:?}: {operation}")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// An update is malformed and cannot be sent.
    #[error("Invalid update: {message}")]
    InvalidUpdate {
        /// Error message.
        message: String,
    },

    /// A tree value could not be encoded.
    #[error("Failed to encode tree value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl GnmiError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(
        domain: &'static str,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            domain,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an interface not found error.
    pub fn interface_not_found(domain: &'static str, interface: impl Into<String>) -> Self {
        Self::InterfaceNotFound {
            domain,
            interface: interface.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(domain: &'static str, operation: impl Into<String>) -> Self {
        Self::Unsupported {
            domain,
            operation: operation.into(),
        }
    }

    /// Creates an accessor error.
    pub fn accessor(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Accessor {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a condition that may succeed on
    /// retry without changing the configuration value.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GnmiError::InterfaceNotFound { .. }
                | GnmiError::Accessor { .. }
                | GnmiError::Timeout { .. }
        )
    }

    /// Returns true for caller-correctable errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, GnmiError::InvalidConfig { .. })
    }
}
