//! Core contracts for converging NX-OS devices over gNMI.
//!
//! This crate provides the pieces shared by every configuration translator:
//!
//! - [`Update`]: one Editing / Replacing / Deleting operation on a tree path
//! - [`Schema`] / [`Node`]: the tree value model carried by updates
//! - [`DeviceAccessor`]: read-only queries against live device state
//! - [`DeviceConf`]: the translator trait (`to_updates` / `reset`)
//! - [`Session`]: ordered application of updates over a [`Transport`]
//! - [`endpoint`]: device endpoint and credential resolution
//! - [`error`]: error types for translator and transport failures
//!
//! # Architecture
//!
//! Translators follow this pattern:
//!
//! 1. Validate the configuration value (fail fast, no partial output)
//! 2. Query the device through the accessor where a precondition depends
//!    on live state (e.g. interface existence)
//! 3. Build typed subtrees and wrap them in updates, feature enablement
//!    before feature body
//! 4. Hand the ordered list to a [`Session`], which sends one Set per
//!    update in order
//!
//! # Example
//!
//! ```ignore
//! use nxos_gnmi::{DeviceConf, Session};
//!
//! async fn converge(conf: &dyn DeviceConf, session: &Session<MyTransport>) -> GnmiResult<()> {
//!     let updates = conf.to_updates(session).await?;
//!     session.apply(&updates).await?;
//!     Ok(())
//! }
//! ```

pub mod accessor;
pub mod conf;
pub mod endpoint;
pub mod error;
pub mod keyed;
pub mod node;
pub mod session;
pub mod update;

// Re-export commonly used items at crate root
pub use accessor::{interface_exists, DeadlineAccessor, DeviceAccessor};
pub use conf::DeviceConf;
pub use error::{GnmiError, GnmiResult};
pub use node::{defaulted, Node, Schema};
pub use session::{ApplyReport, Session, Transport};
pub use update::{parse_path, PathElem, SetOperation, Update, UpdateKind};
