//! Structured fields attached to an error.
//!
//! Defines [`ErrFields`], the key/value bag carried by an error record, and
//! [`FieldValue`], which is either plain data or an error. The reserved
//! [`ERROR_KEY`] lets a single field map carry the causing error.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::Cause;

/// Reserved key whose error value `msg` promotes to the record's cause.
pub const ERROR_KEY: &str = "error";

/// Errors raised while converting data into fields.
#[derive(Debug, thiserror::Error)]
pub enum FieldsError {
    /// The value could not be serialized to JSON.
    #[error("failed to serialize field value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The value serialized to something other than a JSON object.
    #[error("fields must serialize to a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// A single field value: plain data or an error.
#[derive(Clone)]
pub enum FieldValue {
    /// Arbitrary JSON-compatible data.
    Value(Value),
    /// An error value. Rendered through its `Display` text.
    Error(Cause),
}

impl FieldValue {
    /// The error held by this value, if any.
    pub fn as_error(&self) -> Option<&Cause> {
        match self {
            FieldValue::Error(cause) => Some(cause),
            FieldValue::Value(_) => None,
        }
    }

    /// The plain data held by this value, if any.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Value(value) => Some(value),
            FieldValue::Error(_) => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Value(value)
    }
}

impl From<Cause> for FieldValue {
    fn from(cause: Cause) -> Self {
        FieldValue::Error(cause)
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Value(a), FieldValue::Value(b)) => a == b,
            (FieldValue::Error(a), FieldValue::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Value(value) => write!(f, "{value}"),
            FieldValue::Error(cause) => write!(f, "Error({cause})"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Value(value) => value.serialize(serializer),
            FieldValue::Error(cause) => serializer.collect_str(cause),
        }
    }
}

/// Key/value fields attached to an error.
///
/// Keys are kept sorted, so the serialized form is stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrFields(BTreeMap<String, FieldValue>);

impl ErrFields {
    /// Create an empty field map.
    pub fn new() -> Self {
        ErrFields(BTreeMap::new())
    }

    /// Build fields from any value that serializes to a JSON object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, FieldsError> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, FieldValue::Value(value)))
                .collect()),
            other => Err(FieldsError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Add a data field.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), FieldValue::Value(value.into()));
        self
    }

    /// Add an error field.
    ///
    /// Under [`ERROR_KEY`], the error becomes the cause when the fields are
    /// passed through `msg`.
    #[must_use]
    pub fn with_error<E>(mut self, key: impl Into<String>, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.0.insert(key.into(), FieldValue::Error(Arc::new(error)));
        self
    }

    /// Insert a value, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(key.into(), value)
    }

    /// Serialize `value` and insert it under `key`.
    pub fn insert_serialized<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), FieldsError> {
        let value = serde_json::to_value(value)?;
        self.0.insert(key.into(), FieldValue::Value(value));
        Ok(())
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// The error stored under [`ERROR_KEY`], if that field holds one.
    pub fn error(&self) -> Option<&Cause> {
        self.get(ERROR_KEY).and_then(FieldValue::as_error)
    }

    /// Iterate over fields in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for ErrFields {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        ErrFields(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ErrFields {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for ErrFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.0)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
