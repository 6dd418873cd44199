//! VLAN manager policy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nxos_gnmi::{defaulted, DeviceAccessor, DeviceConf, GnmiResult, Update};

use crate::model::vlanmgr::{InstItems, INST_PATH};

const DOMAIN: &str = "vlan";

/// Global VLAN naming policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VlanManager {
    /// Allow VLAN names longer than 32 characters.
    #[serde(default)]
    pub long_name: bool,
}

#[async_trait]
impl DeviceConf for VlanManager {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Ok(vec![Update::edit(
            INST_PATH,
            InstItems {
                long_name: Some(self.long_name),
            },
        )])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Ok(vec![Update::edit(INST_PATH, defaulted::<InstItems>())])
    }
}
