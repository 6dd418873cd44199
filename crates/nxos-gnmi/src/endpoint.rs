//! Device endpoint description and credential resolution.
//!
//! An endpoint names its TLS material and basic-auth credentials by
//! reference. [`resolve`] turns the references into secret material through
//! a namespace-scoped [`SecretSource`] before a channel is built.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::error::{GnmiError, GnmiResult};

const DOMAIN: &str = "endpoint";

/// Where a referenced key lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SourceKind {
    Secret,
    ConfigMap,
}

/// Reference to one key of a secret or config map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRef {
    pub kind: SourceKind,
    pub name: String,
    pub key: String,
}

/// TLS material references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsRefs {
    /// CA bundle used to verify the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<KeyRef>,
    /// Secret holding `tls.crt` and `tls.key` for client authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate_secret: Option<String>,
}

/// A device management endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceEndpoint {
    /// `host:port` of the management agent.
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsRefs>,
    /// Secret holding `username` and `password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_secret: Option<String>,
}

/// Secret contents: binary `data` and plain `stringData`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretData {
    pub data: BTreeMap<String, Vec<u8>>,
    pub string_data: BTreeMap<String, String>,
}

impl SecretData {
    fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        self.data
            .get(key)
            .cloned()
            .or_else(|| self.string_data.get(key).map(|s| s.as_bytes().to_vec()))
    }
}

/// Config map contents: plain `data` and `binaryData`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMapData {
    pub data: BTreeMap<String, String>,
    pub binary_data: BTreeMap<String, Vec<u8>>,
}

impl ConfigMapData {
    fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        self.data
            .get(key)
            .map(|s| s.as_bytes().to_vec())
            .or_else(|| self.binary_data.get(key).cloned())
    }
}

/// Namespace-scoped key/value lookup.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn secret(&self, namespace: &str, name: &str) -> GnmiResult<Option<SecretData>>;

    async fn config_map(&self, namespace: &str, name: &str) -> GnmiResult<Option<ConfigMapData>>;
}

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// TLS material resolved from references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsMaterial {
    pub ca_pem: Option<Vec<u8>>,
    pub client_cert_pem: Option<Vec<u8>>,
    pub client_key_pem: Option<Vec<u8>>,
}

/// An endpoint with all references resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub address: String,
    pub tls: Option<TlsMaterial>,
    pub credentials: Option<Credentials>,
}

async fn read_key(
    source: &dyn SecretSource,
    namespace: &str,
    key_ref: &KeyRef,
) -> GnmiResult<Vec<u8>> {
    let value = match key_ref.kind {
        SourceKind::Secret => source
            .secret(namespace, &key_ref.name)
            .await?
            .and_then(|s| s.lookup(&key_ref.key)),
        SourceKind::ConfigMap => source
            .config_map(namespace, &key_ref.name)
            .await?
            .and_then(|c| c.lookup(&key_ref.key)),
    };

    value.ok_or_else(|| {
        GnmiError::invalid_config(
            DOMAIN,
            format!("{:?}/{}", key_ref.kind, key_ref.name),
            format!("key '{}' not found in namespace '{}'", key_ref.key, namespace),
        )
    })
}

fn secret_key(name: &str, key: &str) -> KeyRef {
    KeyRef {
        kind: SourceKind::Secret,
        name: name.to_string(),
        key: key.to_string(),
    }
}

fn utf8(field: &str, bytes: Vec<u8>) -> GnmiResult<String> {
    String::from_utf8(bytes)
        .map_err(|_| GnmiError::invalid_config(DOMAIN, field, "value is not valid UTF-8"))
}

/// Resolves every reference of `endpoint` in `namespace`.
pub async fn resolve(
    endpoint: &DeviceEndpoint,
    namespace: &str,
    source: &dyn SecretSource,
) -> GnmiResult<ResolvedEndpoint> {
    if endpoint.address.trim().is_empty() {
        return Err(GnmiError::invalid_config(DOMAIN, "address", "must not be empty"));
    }

    let tls = match &endpoint.tls {
        Some(refs) => {
            let mut material = TlsMaterial::default();
            if let Some(ca) = &refs.ca {
                material.ca_pem = Some(read_key(source, namespace, ca).await?);
            }
            if let Some(secret) = &refs.client_certificate_secret {
                material.client_cert_pem =
                    Some(read_key(source, namespace, &secret_key(secret, "tls.crt")).await?);
                material.client_key_pem =
                    Some(read_key(source, namespace, &secret_key(secret, "tls.key")).await?);
            }
            Some(material)
        }
        None => None,
    };

    let credentials = match &endpoint.basic_auth_secret {
        Some(secret) => {
            let username = read_key(source, namespace, &secret_key(secret, "username")).await?;
            let password = read_key(source, namespace, &secret_key(secret, "password")).await?;
            Some(Credentials {
                username: utf8("username", username)?,
                password: utf8("password", password)?,
            })
        }
        None => None,
    };

    debug!(
        address = %endpoint.address,
        tls = tls.is_some(),
        basic_auth = credentials.is_some(),
        "Resolved device endpoint"
    );

    Ok(ResolvedEndpoint {
        address: endpoint.address.clone(),
        tls,
        credentials,
    })
}
