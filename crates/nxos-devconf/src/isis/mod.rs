//! IS-IS process and per-interface binding translators.
//!
//! Both emit the feature-enable update first and then Replace the row they
//! own, so stale children (address families, overload timer) are cleared on
//! re-apply. Reset deletes the row.

mod interface;
mod process;

pub use interface::IsisInterface;
pub use process::{IsisAddressFamily, IsisLevel, IsisProcess, OverloadBit};

const DOMAIN: &str = "isis";
