//! Translator contract.

use async_trait::async_trait;

use crate::accessor::DeviceAccessor;
use crate::error::GnmiResult;
use crate::update::Update;

/// A configuration domain that can express itself as tree updates.
///
/// Both operations are read-only with respect to shared state: the only
/// side channel is querying `client`. On error no partial update list is
/// returned.
///
/// # Example
///
/// ```ignore
/// use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiResult, Update};
///
/// struct Motd { text: String }
///
/// #[async_trait]
/// impl DeviceConf for Motd {
///     fn domain(&self) -> &'static str { "motd" }
///
///     async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
///         Ok(vec![Update::edit("System/motd-items", MotdItems::new(&self.text))])
///     }
///
///     async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
///         Ok(vec![Update::edit("System/motd-items", defaulted::<MotdItems>())])
///     }
/// }
/// ```
#[async_trait]
pub trait DeviceConf: Send + Sync {
    /// Short domain name used in logs and error messages.
    fn domain(&self) -> &'static str;

    /// Builds the ordered updates that converge the device to this value.
    async fn to_updates(&self, client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>>;

    /// Builds the ordered updates that restore the domain's device defaults.
    async fn reset(&self, client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>>;
}
