//! Ambient request/session values consulted by unbound inputs.
//!
//! The core only ever reads from a [`Scope`]. The surrounding application owns
//! the backing store and mutates it between requests; a [`Dom`](crate::dom::Dom)
//! borrows it for the lifetime of one build-and-render pass.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Read-only key/value lookup.
pub trait Scope {
    /// The value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;
}

impl Scope for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        HashMap::get(self, key).cloned()
    }
}

impl Scope for Map<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        Map::get(self, key).cloned()
    }
}

/// A plain in-memory scope, handy for one request's submitted fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestScope {
    values: Map<String, Value>,
}

impl RequestScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value (builder).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Build a scope from a JSON object. Any other JSON value yields an empty scope.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Scope for RequestScope {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}
