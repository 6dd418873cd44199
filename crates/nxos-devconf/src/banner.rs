//! Pre-login banner.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use nxos_gnmi::{defaulted, DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};

use crate::model::userext::{
    PreloginBannerItems, BANNER_PATH, DEFAULT_BANNER_DELIMITER, DEFAULT_BANNER_MESSAGE,
};

const DOMAIN: &str = "banner";

/// Maximum number of banner lines the device accepts.
pub const MAX_LINES: usize = 40;

/// Maximum length of one banner line, in characters.
pub const MAX_LINE_LENGTH: usize = 80;

/// Message shown before login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    pub message: String,
}

fn default_delimiter() -> String {
    DEFAULT_BANNER_DELIMITER.to_string()
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            message: DEFAULT_BANNER_MESSAGE.to_string(),
        }
    }
}

impl Banner {
    pub fn new(delimiter: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            message: message.into(),
        }
    }

    fn validate(&self) -> GnmiResult<()> {
        if self.delimiter.is_empty() {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "delimiter",
                "must not be empty",
            ));
        }

        let lines: Vec<&str> = self.message.lines().collect();
        if lines.len() > MAX_LINES {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "message",
                format!("{} lines exceed the limit of {}", lines.len(), MAX_LINES),
            ));
        }

        // Characters, not bytes
        if let Some((idx, line)) = lines
            .iter()
            .enumerate()
            .find(|(_, line)| line.chars().count() > MAX_LINE_LENGTH)
        {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "message",
                format!(
                    "line {} has {} characters, limit is {}",
                    idx + 1,
                    line.chars().count(),
                    MAX_LINE_LENGTH
                ),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceConf for Banner {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all)]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        self.validate()?;
        debug!(lines = self.message.lines().count(), "Building banner update");

        Ok(vec![Update::edit(
            BANNER_PATH,
            PreloginBannerItems {
                delimiter: Some(self.delimiter.clone()),
                message: Some(self.message.clone()),
            },
        )])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Ok(vec![Update::edit(
            BANNER_PATH,
            defaulted::<PreloginBannerItems>(),
        )])
    }
}
