//! Loose JSON payload for task writes.

use super::{FieldErrors, NON_FIELD_ERRORS};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object received for a task write, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskPayload(Map<String, Value>);

impl TaskPayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON object.
    #[must_use]
    pub const fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Accepts any JSON value, rejecting everything but objects.
    ///
    /// # Errors
    ///
    /// Returns a [`NON_FIELD_ERRORS`] entry naming the JSON type received when
    /// `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self, FieldErrors> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(&other)
                ),
            )),
        }
    }

    /// Adds or replaces a field.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns a field value, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes a field, returning its value.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns `true` when the payload has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the payload as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Returns the JSON type name of a value for error messages.
#[must_use]
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
