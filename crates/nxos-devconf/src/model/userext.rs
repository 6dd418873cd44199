//! User extensions (`System/userext-items`): login banner and local users.

use serde::Serialize;
use std::collections::BTreeMap;

use nxos_gnmi::{keyed, Schema};

pub const BANNER_PATH: &str = "System/userext-items/preloginbanner-items";
pub const USERS_PATH: &str = "System/userext-items/user-items";

pub const DEFAULT_BANNER_DELIMITER: &str = "#";
pub const DEFAULT_BANNER_MESSAGE: &str = "User Access Verification";

/// `preloginbanner-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreloginBannerItems {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Schema for PreloginBannerItems {
    fn populate_defaults(&mut self) {
        self.delimiter
            .get_or_insert_with(|| DEFAULT_BANNER_DELIMITER.to_string());
        self.message
            .get_or_insert_with(|| DEFAULT_BANNER_MESSAGE.to_string());
    }
}

/// `user-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserItems {
    #[serde(
        rename = "User-list",
        serialize_with = "keyed::serialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub user_list: BTreeMap<String, User>,
}

impl Schema for UserItems {
    fn populate_defaults(&mut self) {
        self.user_list
            .values_mut()
            .for_each(Schema::populate_defaults);
    }
}

/// `User-list[name]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pwd: Option<String>,
    #[serde(rename = "pwdEncryptType", skip_serializing_if = "Option::is_none")]
    pub pwd_encrypt_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelltype: Option<String>,
    #[serde(rename = "userdomain-items", skip_serializing_if = "Option::is_none")]
    pub userdomain_items: Option<UserDomainItems>,
}

impl Schema for User {
    fn populate_defaults(&mut self) {
        self.pwd_encrypt_type
            .get_or_insert_with(|| "clear".to_string());
        self.shelltype.get_or_insert_with(|| "shellvsh".to_string());
    }
}

/// `userdomain-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDomainItems {
    #[serde(
        rename = "UserDomain-list",
        serialize_with = "keyed::serialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub domain_list: BTreeMap<String, UserDomain>,
}

/// `UserDomain-list[name]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDomain {
    pub name: String,
    #[serde(rename = "role-items", skip_serializing_if = "Option::is_none")]
    pub role_items: Option<RoleItems>,
}

/// `role-items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleItems {
    #[serde(
        rename = "UserRole-list",
        serialize_with = "keyed::serialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub role_list: BTreeMap<String, UserRole>,
}

/// `UserRole-list[name]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserRole {
    pub name: String,
    #[serde(rename = "privType", skip_serializing_if = "Option::is_none")]
    pub priv_type: Option<String>,
}
