//! Explicit registry of domain configurations.
//!
//! Callers construct a [`Registry`] and register each domain by name; the
//! combined plan is the concatenation of every domain plan in registration
//! order. [`Registry::baseline`] is the opinionated default device.

use tracing::{debug, info, instrument};

use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};

use crate::banner::Banner;
use crate::grpc::Grpc;
use crate::logging::Logging;
use crate::nxapi::NxApi;
use crate::vlan::VlanManager;

const DOMAIN: &str = "registry";

/// Named domain configurations in registration order.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, Box<dyn DeviceConf>)>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default device: login banner, long VLAN names, both management
    /// agents in the management VRF and logging at the default severity.
    pub fn baseline() -> Self {
        let mut registry = Self::new();
        registry.push("banner", Banner::default());
        registry.push("vlan", VlanManager { long_name: true });
        registry.push(
            "grpc",
            Grpc {
                vrf: Some("management".to_string()),
                ..Default::default()
            },
        );
        registry.push(
            "nxapi",
            NxApi {
                vrf: Some("management".to_string()),
                ..Default::default()
            },
        );
        registry.push("logging", Logging::default());
        registry
    }

    fn push(&mut self, name: &str, conf: impl DeviceConf + 'static) {
        self.entries.push((name.to_string(), Box::new(conf)));
    }

    /// Adds `conf` under `name`; names are unique.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        conf: impl DeviceConf + 'static,
    ) -> GnmiResult<()> {
        self.register_boxed(name.into(), Box::new(conf))
    }

    pub fn register_boxed(&mut self, name: String, conf: Box<dyn DeviceConf>) -> GnmiResult<()> {
        if self.get(&name).is_some() {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                name,
                "already registered",
            ));
        }
        debug!(name = %name, domain = conf.domain(), "Registered domain configuration");
        self.entries.push((name, conf));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn DeviceConf> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, conf)| conf.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keeps only the named entries, in registration order. Unknown names
    /// are an error.
    pub fn select(mut self, names: &[String]) -> GnmiResult<Self> {
        if let Some(unknown) = names.iter().find(|n| self.get(n).is_none()) {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                unknown.clone(),
                "not registered",
            ));
        }
        self.entries.retain(|(name, _)| names.contains(name));
        Ok(self)
    }

    /// Concatenated plan of every domain. The first failing domain aborts
    /// the whole plan.
    #[instrument(skip_all, fields(domains = self.entries.len()))]
    pub async fn to_updates(&self, client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        let mut updates = Vec::new();
        for (name, conf) in &self.entries {
            let plan = conf.to_updates(client).await?;
            debug!(name = %name, updates = plan.len(), "Built domain plan");
            updates.extend(plan);
        }
        info!(updates = updates.len(), "Built device plan");
        Ok(updates)
    }

    /// Concatenated reset plan. A domain refusing reset aborts the plan.
    #[instrument(skip_all, fields(domains = self.entries.len()))]
    pub async fn reset(&self, client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        let mut updates = Vec::new();
        for (name, conf) in &self.entries {
            let plan = conf.reset(client).await?;
            debug!(name = %name, updates = plan.len(), "Built domain reset plan");
            updates.extend(plan);
        }
        info!(updates = updates.len(), "Built device reset plan");
        Ok(updates)
    }
}
