//! Local users and their authorization domains.
//!
//! Password encryption, shell type and privilege are mapped through fixed
//! tables; an unmapped value fails the whole batch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use nxos_gnmi::{DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Schema, Update};

use crate::model::userext::{
    RoleItems, User as UserRow, UserDomain, UserDomainItems, UserItems, UserRole, USERS_PATH,
};

const DOMAIN: &str = "user";

const PASSWORD_ENCRYPTION: &[(&str, &str)] = &[("clear", "clear"), ("encrypted", "Encrypt")];

const SHELL_TYPES: &[(&str, &str)] = &[("vsh", "shellvsh"), ("bash", "shellbash")];

const PRIVILEGES: &[(&str, &str)] = &[
    ("none", "noDataPriv"),
    ("read", "readPriv"),
    ("write", "writePriv"),
];

fn lookup(table: &[(&str, &'static str)], field: &str, value: &str) -> GnmiResult<&'static str> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, device)| *device)
        .ok_or_else(|| {
            let supported: Vec<&str> = table.iter().map(|(name, _)| *name).collect();
            GnmiError::invalid_config(
                DOMAIN,
                field,
                format!(
                    "unsupported value '{}', expected one of {}",
                    value,
                    supported.join(", ")
                ),
            )
        })
}

fn default_domain() -> String {
    "all".to_string()
}

fn default_privilege() -> String {
    "none".to_string()
}

fn default_encryption() -> String {
    "clear".to_string()
}

fn default_shell() -> String {
    "vsh".to_string()
}

/// A role granted in one authorization domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleBinding {
    #[serde(default = "default_domain")]
    pub domain: String,
    pub role: String,
    #[serde(default = "default_privilege")]
    pub privilege: String,
}

/// A local account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default = "default_encryption")]
    pub password_encryption: String,
    #[serde(default = "default_shell")]
    pub shell_type: String,
    #[serde(default)]
    pub roles: Vec<UserRoleBinding>,
    /// Sub-paths of this user's row left out of the update, e.g. `pwd`
    /// when the device re-hashes the stored password.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_paths: Vec<String>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: None,
            password_encryption: default_encryption(),
            shell_type: default_shell(),
            roles: Vec::new(),
            ignore_paths: Vec::new(),
        }
    }

    pub fn with_role(mut self, domain: &str, role: &str, privilege: &str) -> Self {
        self.roles.push(UserRoleBinding {
            domain: domain.to_string(),
            role: role.to_string(),
            privilege: privilege.to_string(),
        });
        self
    }

    fn row_path(&self) -> String {
        format!("User-list[name={}]", self.name)
    }

    fn build(&self) -> GnmiResult<UserRow> {
        if self.name.is_empty() {
            return Err(GnmiError::invalid_config(DOMAIN, "name", "must not be empty"));
        }

        let mut domains: BTreeMap<String, UserDomain> = BTreeMap::new();
        for binding in &self.roles {
            if binding.role.is_empty() {
                return Err(GnmiError::invalid_config(
                    DOMAIN,
                    "roles.role",
                    format!("user {} has an empty role", self.name),
                ));
            }
            let priv_type = lookup(PRIVILEGES, "roles.privilege", &binding.privilege)?;

            let domain = domains
                .entry(binding.domain.clone())
                .or_insert_with(|| UserDomain {
                    name: binding.domain.clone(),
                    role_items: Some(RoleItems::default()),
                });
            domain
                .role_items
                .get_or_insert_with(RoleItems::default)
                .role_list
                .insert(
                    binding.role.clone(),
                    UserRole {
                        name: binding.role.clone(),
                        priv_type: Some(priv_type.to_string()),
                    },
                );
        }

        Ok(UserRow {
            name: self.name.clone(),
            pwd: self.password.clone(),
            pwd_encrypt_type: Some(
                lookup(PASSWORD_ENCRYPTION, "passwordEncryption", &self.password_encryption)?
                    .to_string(),
            ),
            shelltype: Some(lookup(SHELL_TYPES, "shellType", &self.shell_type)?.to_string()),
            userdomain_items: (!domains.is_empty()).then_some(UserDomainItems {
                domain_list: domains,
            }),
        })
    }
}

/// A batch of local accounts sent as one update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Users(pub Vec<User>);

impl Users {
    fn build(&self) -> GnmiResult<(UserItems, Vec<String>)> {
        let mut items = UserItems::default();
        let mut ignore_paths = Vec::new();

        for user in &self.0 {
            let row = user.build()?;
            if items.user_list.insert(row.name.clone(), row).is_some() {
                return Err(GnmiError::invalid_config(
                    DOMAIN,
                    "name",
                    format!("user {} is listed twice", user.name),
                ));
            }
            ignore_paths.extend(
                user.ignore_paths
                    .iter()
                    .map(|p| format!("{}/{}", user.row_path(), p.trim_start_matches('/'))),
            );
        }
        Schema::populate_defaults(&mut items);
        Ok((items, ignore_paths))
    }
}

#[async_trait]
impl DeviceConf for Users {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(users = self.0.len()))]
    async fn to_updates(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        if self.0.is_empty() {
            return Ok(Vec::new());
        }
        let (items, ignore_paths) = self.build()?;
        debug!(ignored = ignore_paths.len(), "Building user batch");
        Ok(vec![Update::edit_ignoring(USERS_PATH, items, ignore_paths)])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Ok(self
            .0
            .iter()
            .map(|user| Update::delete(format!("{}/{}", USERS_PATH, user.row_path())))
            .collect())
    }
}

#[async_trait]
impl DeviceConf for User {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    async fn to_updates(&self, client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Users(vec![self.clone()]).to_updates(client).await
    }

    async fn reset(&self, client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        Users(vec![self.clone()]).reset(client).await
    }
}
