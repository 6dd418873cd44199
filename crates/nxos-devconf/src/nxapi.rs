//! NX-API management agent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Update};

use crate::feature;
use crate::model::fm;
use crate::model::nxapi::{NxapiItems, PATH};
use crate::model::AdminSt;

const DOMAIN: &str = "nxapi";

/// Server certificate source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NxApiCertificate {
    /// Certificate enrolled in a device trustpoint.
    Trustpoint { name: String },
    /// Certificate and key files on the device file system.
    #[serde(rename_all = "camelCase")]
    Inline { cert_file: String, key_file: String },
}

impl NxApiCertificate {
    /// Fields outside this variant stay untouched on the device.
    fn ignore_paths(&self) -> &'static [&'static str] {
        match self {
            NxApiCertificate::Trustpoint { .. } => &["useVrf", "certFile", "keyFile"],
            NxApiCertificate::Inline { .. } => &["useVrf", "trustpoint"],
        }
    }

    fn build(&self) -> GnmiResult<NxapiItems> {
        let mut items = NxapiItems {
            cert_enable: Some(AdminSt::Enabled),
            ..Default::default()
        };
        match self {
            NxApiCertificate::Trustpoint { name } => {
                if name.is_empty() {
                    return Err(GnmiError::invalid_config(
                        DOMAIN,
                        "certificate.name",
                        "must not be empty",
                    ));
                }
                items.trustpoint = Some(name.clone());
            }
            NxApiCertificate::Inline {
                cert_file,
                key_file,
            } => {
                if cert_file.is_empty() || key_file.is_empty() {
                    return Err(GnmiError::invalid_config(
                        DOMAIN,
                        "certificate",
                        "certFile and keyFile are both required",
                    ));
                }
                items.cert_file = Some(cert_file.clone());
                items.key_file = Some(key_file.clone());
            }
        }
        Ok(items)
    }
}

fn enabled() -> bool {
    true
}

/// NX-API agent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NxApi {
    #[serde(default = "enabled")]
    pub enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<NxApiCertificate>,
}

impl Default for NxApi {
    fn default() -> Self {
        Self {
            enable: true,
            http_port: None,
            https_port: None,
            vrf: None,
            certificate: None,
        }
    }
}

#[async_trait]
impl DeviceConf for NxApi {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(enable = self.enable))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        if !self.enable {
            return Ok(vec![feature::disable(fm::NXAPI_PATH)]);
        }

        for (field, port) in [("httpPort", self.http_port), ("httpsPort", self.https_port)] {
            if port == Some(0) {
                return Err(GnmiError::invalid_config(DOMAIN, field, "must not be 0"));
            }
        }
        if self.http_port.is_some() && self.http_port == self.https_port {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "httpsPort",
                "HTTP and HTTPS must listen on different ports",
            ));
        }

        let certificate = self
            .certificate
            .as_ref()
            .map(|cert| Ok::<_, GnmiError>((cert.build()?, cert.ignore_paths())))
            .transpose()?;

        let mut updates = vec![
            feature::enable(fm::NXAPI_PATH),
            Update::edit(
                PATH,
                NxapiItems {
                    http_port: self.http_port,
                    https_port: self.https_port,
                    use_vrf: self.vrf.clone(),
                    ..Default::default()
                },
            ),
        ];
        if let Some((items, ignore_paths)) = certificate {
            updates.push(Update::edit_ignoring(
                PATH,
                items,
                ignore_paths.iter().copied(),
            ));
        }

        debug!(updates = updates.len(), "Building NX-API agent");
        Ok(updates)
    }

    /// Disabling the agent could strip programmatic access to the device.
    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Err(GnmiError::unsupported(
            DOMAIN,
            "reset would disable the NX-API agent",
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
    async fn test_trustpoint_certificate() {
        let nxapi = NxApi {
            https_port: Some(8443),
            vrf: Some("management".to_string()),
            certificate: Some(NxApiCertificate::Trustpoint {
                name: "nxapi-tp".to_string(),
            }),
            ..Default::default()
        };
        let updates = nxapi.to_updates(&MemoryDevice::new()).await.unwrap();
        assert_kinds(
            &updates,
            &[UpdateKind::Editing, UpdateKind::Editing, UpdateKind::Editing],
        );
        assert_edit_at(&updates[0], fm::NXAPI_PATH, &json!({"adminSt": "enabled"}));
        assert_edit_at(
            &updates[1],
            PATH,
            &json!({"httpsPort": 8443, "useVrf": "management"}),
        );
        assert_edit_at(
            &updates[2],
            PATH,
            &json!({"trustpoint": "nxapi-tp", "certEnable": "enabled"}),
        );
        assert_eq!(
            updates[2].ignore_paths(),
            &["useVrf".to_string(), "certFile".to_string(), "keyFile".to_string()]
        );
    }

    #[tokio::test]
    async fn test_inline_certificate_requires_both_files() {
        let nxapi = NxApi {
            certificate: Some(NxApiCertificate::Inline {
                cert_file: "bootflash:nxapi.crt".to_string(),
                key_file: String::new(),
            }),
            ..Default::default()
        };
        let err = nxapi.to_updates(&MemoryDevice::new()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_certificate_is_tagged() {
        let cert: NxApiCertificate = serde_yaml::from_str(
            "type: inline\ncertFile: bootflash:nxapi.crt\nkeyFile: bootflash:nxapi.key\n",
        )
        .unwrap();
        assert_eq!(
            cert,
            NxApiCertificate::Inline {
                cert_file: "bootflash:nxapi.crt".to_string(),
                key_file: "bootflash:nxapi.key".to_string(),
            }
        );
        assert!(serde_yaml::from_str::<NxApiCertificate>("type: pkcs12\n").is_err());
    }

    #[tokio::test]
    async fn test_disabled_and_reset() {
        let device = MemoryDevice::new();
        let nxapi = NxApi {
            enable: false,
            http_port: Some(0),
            ..Default::default()
        };
        let updates = nxapi.to_updates(&device).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_edit_at(&updates[0], fm::NXAPI_PATH, &json!({"adminSt": "disabled"}));

        assert!(matches!(
            nxapi.reset(&device).await,
            Err(GnmiError::Unsupported { .. })
        ));
    }
}
