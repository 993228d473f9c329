//! Redaction of sensitive values before display or export.

use serde_json::{Map, Value};

/// Field-name fragments treated as sensitive when none are configured.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "secret",
    "token",
    "apikey",
    "privatekey",
    "pin",
    "cvv",
    "cardnumber",
    "accountnumber",
    "signature",
];

const MASK: &str = "****";
const VISIBLE_TAIL: usize = 4;

/// Masks values whose field name contains a sensitive fragment.
///
/// Matching is a case-insensitive substring test on the field name, so
/// `"pin"` also covers `"pinCode"` and `"transactionPin"`.
///
/// # Example
///
/// ```
/// use paydesk_core::Masker;
/// use serde_json::json;
///
/// let masker = Masker::default();
/// let masked = masker.mask(&json!({"name": "Anong", "cardNumber": "4111111111111111"}));
///
/// assert_eq!(masked["name"], "Anong");
/// assert_eq!(masked["cardNumber"], "************1111");
/// ```
#[derive(Debug, Clone)]
pub struct Masker {
    fragments: Vec<String>,
}

impl Masker {
    /// Create a masker for the given field-name fragments.
    ///
    /// Blank fragments are ignored.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = fragments
            .into_iter()
            .map(|f| f.as_ref().trim().to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
        Self { fragments }
    }

    /// True if a field with this name should be masked.
    pub fn is_sensitive(&self, field: &str) -> bool {
        let field = field.to_lowercase();
        self.fragments.iter().any(|f| field.contains(f.as_str()))
    }

    /// Return a masked copy of `value`.
    pub fn mask(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.mask_object(map)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.mask(v)).collect()),
            other => other.clone(),
        }
    }

    fn mask_object(&self, map: &Map<String, Value>) -> Map<String, Value> {
        map.iter()
            .map(|(key, value)| {
                let masked = if self.is_sensitive(key) {
                    redact(value)
                } else {
                    self.mask(value)
                };
                (key.clone(), masked)
            })
            .collect()
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_FIELDS)
    }
}

/// Redact every leaf below a sensitive field.
fn redact(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::String(s) => Value::String(redact_str(s)),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), redact(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        Value::Bool(_) | Value::Number(_) => Value::String(MASK.to_string()),
    }
}

fn redact_str(s: &str) -> String {
    let len = s.chars().count();
    if len <= VISIBLE_TAIL {
        return MASK.to_string();
    }
    let tail: String = s.chars().skip(len - VISIBLE_TAIL).collect();
    format!("{}{}", "*".repeat(len - VISIBLE_TAIL), tail)
}
