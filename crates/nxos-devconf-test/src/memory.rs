//! In-memory device configuration tree.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use nxos_gnmi::{
    parse_path, DeviceAccessor, GnmiError, GnmiResult, PathElem, SetOperation, Transport,
};
use nxos_types::Interface;

/// Fields that identify an entry of a keyed list, in lookup order.
const LIST_KEYS: &[&str] = &[
    "name",
    "id",
    "addr",
    "host",
    "seqNum",
    "seq",
    "encap",
    "type",
    "rtt",
    "facilityName",
];

/// A device whose configuration tree lives in memory.
///
/// Set operations follow device semantics: `update` merges objects and
/// replaces keyed-list entries wholesale per key seen, `replace` swaps the
/// addressed subtree, `delete` removes it. Every accepted operation is
/// recorded in order.
#[derive(Debug, Default)]
pub struct MemoryDevice {
    tree: Mutex<Value>,
    sent: Mutex<Vec<SetOperation>>,
    reject: Option<String>,
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self {
            tree: Mutex::new(Value::Object(Map::new())),
            ..Default::default()
        }
    }

    /// A device on which each named interface exists.
    ///
    /// # Panics
    ///
    /// Panics on an unrecognized interface name.
    pub fn with_interfaces(names: &[&str]) -> Self {
        let device = Self::new();
        {
            let mut tree = device.lock_tree();
            for name in names {
                let intf: Interface = name
                    .parse()
                    .unwrap_or_else(|e| panic!("fixture interface {}: {}", name, e));
                let mut entry = Map::new();
                entry.insert("id".to_string(), Value::String(intf.name().to_string()));
                if let Some(target) = navigate(&mut tree, &parse_path(&intf.device_path()), true) {
                    *target = Value::Object(entry);
                }
            }
        }
        device
    }

    /// A device that fails every Set addressed at `path`.
    pub fn rejecting(path: impl Into<String>) -> Self {
        Self {
            reject: Some(path.into()),
            ..Self::new()
        }
    }

    /// Reads the subtree at `path`.
    pub fn read(&self, path: &str) -> Option<Value> {
        let mut tree = self.lock_tree();
        navigate(&mut tree, &parse_path(path), false).cloned()
    }

    /// The whole configuration tree.
    pub fn snapshot(&self) -> Value {
        self.lock_tree().clone()
    }

    /// Operations accepted so far, in order.
    pub fn sent(&self) -> Vec<SetOperation> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_tree(&self) -> MutexGuard<'_, Value> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, op: &SetOperation) -> GnmiResult<()> {
        let elems = parse_path(op.path());
        if elems.is_empty() {
            return Err(GnmiError::accessor("set", "empty path"));
        }

        let mut tree = self.lock_tree();
        match op {
            SetOperation::Update { value, .. } => {
                let target = navigate(&mut tree, &elems, true)
                    .ok_or_else(|| GnmiError::accessor("set", format!("bad path {}", op.path())))?;
                merge(target, value);
            }
            SetOperation::Replace { value, .. } => {
                let target = navigate(&mut tree, &elems, true)
                    .ok_or_else(|| GnmiError::accessor("set", format!("bad path {}", op.path())))?;
                *target = value.clone();
            }
            SetOperation::Delete { .. } => {
                let (last, parent) = elems.split_last().ok_or_else(|| {
                    GnmiError::accessor("set", format!("bad path {}", op.path()))
                })?;
                if let Some(parent) = navigate(&mut tree, parent, false) {
                    remove(parent, last);
                }
            }
        }
        Ok(())
    }
}

fn key_matches(entry: &Value, keys: &[(String, String)]) -> bool {
    keys.iter().all(|(k, v)| match entry.get(k) {
        Some(Value::String(s)) => s == v,
        Some(other) => other.to_string() == *v,
        None => false,
    })
}

/// Walks to the node addressed by `elems`, creating containers and list
/// entries on the way when `create` is set.
fn navigate<'a>(node: &'a mut Value, elems: &[PathElem], create: bool) -> Option<&'a mut Value> {
    let Some((first, rest)) = elems.split_first() else {
        return Some(node);
    };
    if create && node.is_null() {
        *node = Value::Object(Map::new());
    }
    let map = node.as_object_mut()?;

    if !map.contains_key(&first.name) {
        if !create {
            return None;
        }
        let empty = if first.keys.is_empty() {
            Value::Object(Map::new())
        } else {
            Value::Array(Vec::new())
        };
        map.insert(first.name.clone(), empty);
    }
    let child = map.get_mut(&first.name)?;

    if first.keys.is_empty() {
        return navigate(child, rest, create);
    }

    let entries = child.as_array_mut()?;
    let idx = match entries.iter().position(|e| key_matches(e, &first.keys)) {
        Some(idx) => idx,
        None if create => {
            let entry: Map<String, Value> = first
                .keys
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            entries.push(Value::Object(entry));
            entries.len() - 1
        }
        None => return None,
    };
    navigate(&mut entries[idx], rest, create)
}

fn remove(parent: &mut Value, elem: &PathElem) {
    let Some(map) = parent.as_object_mut() else {
        return;
    };
    if elem.keys.is_empty() {
        map.remove(&elem.name);
    } else if let Some(Value::Array(entries)) = map.get_mut(&elem.name) {
        entries.retain(|e| !key_matches(e, &elem.keys));
    }
}

fn list_key(entry: &Value) -> Option<(&'static str, &Value)> {
    LIST_KEYS
        .iter()
        .find_map(|k| entry.get(*k).map(|v| (*k, v)))
}

fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn same_key(a: &Value, b: &Value) -> bool {
    match (list_key(a), list_key(b)) {
        (Some((ka, va)), Some((kb, vb))) => ka == kb && key_text(va) == key_text(vb),
        _ => false,
    }
}

fn merge(target: &mut Value, value: &Value) {
    match (target, value) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (k, v) in incoming {
                match existing.get_mut(k) {
                    Some(slot) => merge(slot, v),
                    None => {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (Value::Array(existing), Value::Array(incoming)) => {
            for entry in incoming {
                match existing.iter_mut().find(|e| same_key(e, entry)) {
                    Some(slot) => *slot = entry.clone(),
                    None => existing.push(entry.clone()),
                }
            }
        }
        (target, value) => *target = value.clone(),
    }
}

#[async_trait]
impl Transport for MemoryDevice {
    async fn set(&self, op: SetOperation) -> GnmiResult<()> {
        if self.reject.as_deref() == Some(op.path()) {
            return Err(GnmiError::accessor(
                "set",
                format!("device rejected {}", op.path()),
            ));
        }
        self.apply(&op)?;
        debug!(path = op.path(), "Memory device applied set");
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
        Ok(())
    }

    async fn get(&self, path: &str) -> GnmiResult<Option<Value>> {
        Ok(self.read(path))
    }
}

#[async_trait]
impl DeviceAccessor for MemoryDevice {
    async fn get(&self, path: &str) -> GnmiResult<Option<Value>> {
        Ok(self.read(path))
    }
}
