//! Test infrastructure for NX-OS configuration translators
//!
//! Provides:
//! - An in-memory device with merge / replace / delete semantics
//! - Device state fixtures (interface sets, failing and stalled devices)
//! - Update plan verification helpers

pub mod fixtures;
mod memory;
mod verification;

pub use fixtures::*;
pub use memory::MemoryDevice;
pub use verification::*;
