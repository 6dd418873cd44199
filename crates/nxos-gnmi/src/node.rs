//! Tree value model.
//!
//! Device configuration subtrees are typed structs that serialize to the
//! device's JSON encoding. The update pipeline needs only two capabilities
//! from them: populating schema defaults ([`Schema`]) and structural
//! comparison ([`Node`], which every [`Schema`] type gets for free).

use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::fmt;

/// A schema-typed subtree of the device configuration.
///
/// Implementors override [`Schema::populate_defaults`] when the device
/// model declares default values for their fields.
pub trait Schema: Serialize + fmt::Debug + Clone + Send + Sync + 'static {
    /// Fills every unset field that has a schema default.
    fn populate_defaults(&mut self) {}
}

/// Object-safe view over a [`Schema`] value carried by an update.
pub trait Node: fmt::Debug + Send + Sync {
    /// Encodes the subtree as device JSON.
    fn to_json(&self) -> Result<Value, serde_json::Error>;

    fn clone_node(&self) -> Box<dyn Node>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Schema> Node for T {
    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Node {
    /// Downcasts to the concrete tree type.
    pub fn downcast_ref<T: Schema>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Structural equality on the encoded form. Values that fail to encode
    /// are never equal.
    pub fn structurally_eq(&self, other: &dyn Node) -> bool {
        match (self.to_json(), other.to_json()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl Clone for Box<dyn Node> {
    fn clone(&self) -> Self {
        self.clone_node()
    }
}

/// Builds a defaulted value of `T`.
pub fn defaulted<T: Schema + Default>() -> T {
    let mut value = T::default();
    Schema::populate_defaults(&mut value);
    value
}
