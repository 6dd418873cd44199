//! Update model.
//!
//! An [`Update`] is one operation against one absolute path of the device
//! configuration tree. Translators return ordered `Vec<Update>`; the order
//! is load-bearing and callers must apply the updates in slice order.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::{GnmiError, GnmiResult};
use crate::node::{Node, Schema};

/// The three operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// Merge: fields present are set, absent fields are untouched.
    Editing,
    /// Full replace: children absent from the value are removed.
    Replacing,
    /// Removes the subtree.
    Deleting,
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateKind::Editing => write!(f, "edit"),
            UpdateKind::Replacing => write!(f, "replace"),
            UpdateKind::Deleting => write!(f, "delete"),
        }
    }
}

/// One operation against an absolute tree path.
#[derive(Debug, Clone)]
pub enum Update {
    /// Merge `value` at `path`, leaving `ignore_paths` (relative to `path`)
    /// out of the merge entirely.
    Editing {
        path: String,
        value: Box<dyn Node>,
        ignore_paths: Vec<String>,
    },
    /// Replace the subtree at `path` with `value`.
    Replacing { path: String, value: Box<dyn Node> },
    /// Remove the subtree at `path`.
    Deleting { path: String },
}

impl Update {
    /// Creates a merge update.
    pub fn edit(path: impl Into<String>, value: impl Schema) -> Self {
        Update::Editing {
            path: path.into(),
            value: Box::new(value),
            ignore_paths: Vec::new(),
        }
    }

    /// Creates a merge update that excludes the given relative sub-paths.
    pub fn edit_ignoring<I, P>(path: impl Into<String>, value: impl Schema, ignore_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Update::Editing {
            path: path.into(),
            value: Box::new(value),
            ignore_paths: ignore_paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a full-replace update.
    pub fn replace(path: impl Into<String>, value: impl Schema) -> Self {
        Update::Replacing {
            path: path.into(),
            value: Box::new(value),
        }
    }

    /// Creates a delete update.
    pub fn delete(path: impl Into<String>) -> Self {
        Update::Deleting { path: path.into() }
    }

    pub fn kind(&self) -> UpdateKind {
        match self {
            Update::Editing { .. } => UpdateKind::Editing,
            Update::Replacing { .. } => UpdateKind::Replacing,
            Update::Deleting { .. } => UpdateKind::Deleting,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Update::Editing { path, .. }
            | Update::Replacing { path, .. }
            | Update::Deleting { path } => path,
        }
    }

    /// Returns the carried tree value; `None` for deletes.
    pub fn value(&self) -> Option<&(dyn Node + 'static)> {
        match self {
            Update::Editing { value, .. } | Update::Replacing { value, .. } => Some(&**value),
            Update::Deleting { .. } => None,
        }
    }

    /// Downcasts the carried tree value.
    pub fn value_as<T: Schema>(&self) -> Option<&T> {
        self.value().and_then(|v| v.downcast_ref::<T>())
    }

    pub fn ignore_paths(&self) -> &[String] {
        match self {
            Update::Editing { ignore_paths, .. } => ignore_paths.as_slice(),
            _ => &[],
        }
    }

    /// Checks the structural invariants of the update.
    pub fn check(&self) -> GnmiResult<()> {
        if self.path().trim_matches('/').is_empty() {
            return Err(GnmiError::InvalidUpdate {
                message: format!("{} update with empty path", self.kind()),
            });
        }
        Ok(())
    }

    /// Encodes the update as one management-protocol Set element.
    pub fn to_set_operation(&self) -> GnmiResult<SetOperation> {
        self.check()?;
        let path = self.path().to_string();
        Ok(match self {
            Update::Editing {
                value,
                ignore_paths,
                ..
            } => {
                let mut json = value.to_json()?;
                for ignored in ignore_paths {
                    prune(&mut json, &parse_path(ignored));
                }
                SetOperation::Update { path, value: json }
            }
            Update::Replacing { value, .. } => SetOperation::Replace {
                path,
                value: value.to_json()?,
            },
            Update::Deleting { .. } => SetOperation::Delete { path },
        })
    }
}

impl PartialEq for Update {
    fn eq(&self, other: &Self) -> bool {
        if self.kind() != other.kind()
            || self.path() != other.path()
            || self.ignore_paths() != other.ignore_paths()
        {
            return false;
        }
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => a.structurally_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// One element of a management-protocol Set request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum SetOperation {
    Update { path: String, value: Value },
    Replace { path: String, value: Value },
    Delete { path: String },
}

impl SetOperation {
    pub fn path(&self) -> &str {
        match self {
            SetOperation::Update { path, .. }
            | SetOperation::Replace { path, .. }
            | SetOperation::Delete { path } => path,
        }
    }
}

/// One path element: a container or list name with optional key predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElem {
    pub name: String,
    pub keys: Vec<(String, String)>,
}

/// Splits a tree path into elements. Slashes inside `[...]` key predicates
/// (e.g. `PhysIf-list[id=eth1/1]`) do not separate elements.
pub fn parse_path(path: &str) -> Vec<PathElem> {
    let mut elems = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in path.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '/' if depth == 0 => {
                if !current.is_empty() {
                    elems.push(parse_elem(&current));
                    current.clear();
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        elems.push(parse_elem(&current));
    }
    elems
}

fn parse_elem(s: &str) -> PathElem {
    let (name, mut rest) = match s.find('[') {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    };

    let mut keys = Vec::new();
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(end) = stripped.find(']') else {
            break;
        };
        if let Some((k, v)) = stripped[..end].split_once('=') {
            keys.push((k.to_string(), v.to_string()));
        }
        rest = &stripped[end + 1..];
    }

    PathElem {
        name: name.to_string(),
        keys,
    }
}

fn key_matches(entry: &Value, keys: &[(String, String)]) -> bool {
    keys.iter().all(|(k, v)| match entry.get(k) {
        Some(Value::String(s)) => s == v,
        Some(other) => other.to_string() == *v,
        None => false,
    })
}

/// Removes the sub-tree addressed by `elems` from `value`. Missing
/// intermediate nodes leave the value untouched.
fn prune(value: &mut Value, elems: &[PathElem]) {
    let Some((first, rest)) = elems.split_first() else {
        return;
    };
    let Value::Object(map) = value else {
        return;
    };

    if first.keys.is_empty() {
        if rest.is_empty() {
            map.remove(&first.name);
        } else if let Some(child) = map.get_mut(&first.name) {
            prune(child, rest);
        }
        return;
    }

    if let Some(Value::Array(entries)) = map.get_mut(&first.name) {
        if rest.is_empty() {
            entries.retain(|entry| !key_matches(entry, &first.keys));
        } else {
            for entry in entries.iter_mut().filter(|e| key_matches(e, &first.keys)) {
                prune(entry, rest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize)]
    struct Raw(Value);

    impl Schema for Raw {}

    #[test]
    fn test_accessors() {
        let edit = Update::edit("System/dns-items", Raw(json!({"adminSt": "enabled"})));
        assert_eq!(edit.kind(), UpdateKind::Editing);
        assert_eq!(edit.path(), "System/dns-items");
        assert!(edit.value().is_some());

        let delete = Update::delete("System/isis-items/inst-items/Inst-list[name=UNDERLAY]");
        assert_eq!(delete.kind(), UpdateKind::Deleting);
        assert!(delete.value().is_none());
        assert!(delete.ignore_paths().is_empty());
    }

    #[test]
    fn test_empty_path_rejected() {
        let update = Update::delete("/");
        assert!(matches!(
            update.to_set_operation(),
            Err(GnmiError::InvalidUpdate { .. })
        ));
    }

    #[test]
    fn test_parse_path_keeps_slashes_in_keys() {
        let elems = parse_path("System/intf-items/phys-items/PhysIf-list[id=eth1/1]");
        assert_eq!(elems.len(), 4);
        assert_eq!(elems[3].name, "PhysIf-list");
        assert_eq!(elems[3].keys, vec![("id".to_string(), "eth1/1".to_string())]);

        let multi = parse_path("/a/List[x=1][y=two]/b");
        assert_eq!(multi.len(), 3);
        assert_eq!(multi[1].keys.len(), 2);
    }

    #[test]
    fn test_ignore_paths_are_pruned() {
        let value = Raw(json!({
            "User-list": [
                {"name": "admin", "pwd": "secret", "shelltype": "shellvsh"},
                {"name": "ops", "pwd": "other", "shelltype": "shellbash"}
            ],
            "certFile": "/bootflash/cert.pem"
        }));
        let update =
            Update::edit_ignoring("System/userext-items/user-items", value, ["User-list[name=admin]/pwd", "certFile"]);

        let SetOperation::Update { value, .. } = update.to_set_operation().unwrap() else {
            panic!("expected merge operation");
        };
        assert_eq!(
            value,
            json!({
                "User-list": [
                    {"name": "admin", "shelltype": "shellvsh"},
                    {"name": "ops", "pwd": "other", "shelltype": "shellbash"}
                ]
            })
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = Update::replace("System/x", Raw(json!({"a": 1})));
        let b = Update::replace("System/x", Raw(json!({"a": 1})));
        let c = Update::edit("System/x", Raw(json!({"a": 1})));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Update::replace("System/x", Raw(json!({"a": 2}))));
    }

    #[test]
    fn test_set_operation_encoding() {
        let op = Update::delete("System/acl-items").to_set_operation().unwrap();
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"op": "delete", "path": "System/acl-items"})
        );
    }
}
