//! Verification helpers for update plans
//!
//! Provides assertion helpers over `Update` lists and a path lookup into
//! encoded tree values.

use serde_json::Value;

use nxos_gnmi::{parse_path, SetOperation, Update, UpdateKind};

/// Looks up `path` (relative, `a/b` or `List[key=value]/field`) in `value`.
/// A list element without key predicates yields the whole list.
pub fn json_at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    parse_path(path).iter().try_fold(value, |node, elem| {
        let child = node.get(&elem.name)?;
        if elem.keys.is_empty() {
            return Some(child);
        }
        child.as_array()?.iter().find(|entry| {
            elem.keys.iter().all(|(k, v)| match entry.get(k) {
                Some(Value::String(s)) => s == v,
                Some(other) => other.to_string() == *v,
                None => false,
            })
        })
    })
}

/// Asserts the kinds of `updates`, in order.
///
/// # Panics
///
/// Panics with the actual plan when the kinds differ.
pub fn assert_kinds(updates: &[Update], expected: &[UpdateKind]) {
    let actual: Vec<UpdateKind> = updates.iter().map(Update::kind).collect();
    assert_eq!(
        actual,
        expected,
        "unexpected update kinds for paths {:?}",
        updates.iter().map(Update::path).collect::<Vec<_>>()
    );
}

/// Asserts that `update` is an Editing update at `path` whose encoded value
/// equals `expected`.
///
/// # Panics
///
/// Panics on a different kind, path or value.
pub fn assert_edit_at(update: &Update, path: &str, expected: &Value) {
    assert_eq!(update.kind(), UpdateKind::Editing, "not an edit: {:?}", update);
    assert_eq!(update.path(), path);
    let actual = update
        .value()
        .map(|v| v.to_json())
        .transpose()
        .unwrap_or_else(|e| panic!("value at {} failed to encode: {}", path, e));
    assert_eq!(actual.as_ref(), Some(expected), "value at {}", path);
}

/// Serializes a plan as the Set operations a session would send.
///
/// # Panics
///
/// Panics when an update is malformed.
pub fn plan_json(updates: &[Update]) -> String {
    let ops: Vec<SetOperation> = updates
        .iter()
        .map(|u| {
            u.to_set_operation()
                .unwrap_or_else(|e| panic!("malformed update {}: {}", u.path(), e))
        })
        .collect();
    serde_json::to_string(&ops).unwrap_or_else(|e| panic!("plan failed to serialize: {}", e))
}
