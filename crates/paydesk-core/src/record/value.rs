//! Validated record type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};

/// One gateway entity (bank, member, transfer or QR payment).
///
/// This type guarantees the wrapped value is a JSON object. Beyond that it is
/// schema-agnostic: which fields matter is decided by an
/// [`EntityFieldMap`](super::EntityFieldMap).
///
/// # Example
///
/// ```
/// use paydesk_core::Record;
/// use serde_json::json;
///
/// let record = Record::new(json!({
///     "id": "TRX-1",
///     "sender": { "name": "John Smith" }
/// })).unwrap();
///
/// assert_eq!(record.get("sender.name").unwrap(), "John Smith");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(InvalidInputError::Record {
                reason: format!("expected a JSON object, got {}", kind_of(&other)),
            }
            .into()),
        }
    }

    /// Get a field by name or dotted path (`"sender.name"`).
    ///
    /// An exact top-level key wins over path traversal, so field names that
    /// themselves contain dots still resolve.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Get a field rendered as text.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted;
    /// `null`, objects and arrays yield `None`.
    pub fn text(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Copy the record into a plain JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Record::new(value)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Record::new(value).map_err(serde::de::Error::custom)
    }
}
