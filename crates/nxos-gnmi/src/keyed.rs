//! Serde helper for YANG keyed lists.
//!
//! Keyed lists are held as `BTreeMap<key, entry>` so lookups are cheap and
//! iteration order is stable. The device encodes them as JSON arrays of
//! entries; use `#[serde(serialize_with = "keyed::serialize")]` on the map.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Serializes the map's entries, in key order, as a sequence.
pub fn serialize<K, V, S>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    V: Serialize,
    S: Serializer,
{
    serializer.collect_seq(map.values())
}
