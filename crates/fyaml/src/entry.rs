//! A single flattened configuration entry.

use crate::value::Value;

/// A value stored under a full path, with an optional description.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    path: String,
    value: Value,
    description: Option<String>,
}

impl ConfigEntry {
    pub(crate) fn new(path: String, value: Value, description: Option<String>) -> Self {
        Self {
            path,
            value,
            description,
        }
    }

    /// The normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The stored value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The description written as a comment on serialization.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of elements; a scalar counts as one.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether the value is an empty array.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub(crate) fn into_parts(self) -> (String, Value, Option<String>) {
        (self.path, self.value, self.description)
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    pub(crate) fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }
}
