//! Field roles for an entity type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Record;

/// Which concrete field of a [`Record`] plays each browsing role.
///
/// Field names may be dotted paths into nested objects. Roles that an
/// entity does not have are `None`; criteria on a missing role see every
/// record as lacking the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityFieldMap {
    /// Field that identifies a record for the detail view.
    pub id: String,

    /// Status-bearing field.
    #[serde(default)]
    pub status: Option<String>,

    /// Bank-code field.
    #[serde(default)]
    pub bank: Option<String>,

    /// Creation timestamp used for date filters and ordering.
    pub timestamp: String,

    /// Numeric amount field.
    #[serde(default)]
    pub amount: Option<String>,

    /// Free-text fields searched by substring.
    #[serde(default)]
    pub search: Vec<String>,
}

impl EntityFieldMap {
    /// The record's identifier as text.
    pub fn id_of(&self, record: &Record) -> Option<String> {
        record.text(&self.id)
    }

    /// The record's status as text.
    pub fn status_of(&self, record: &Record) -> Option<String> {
        record.text(self.status.as_deref()?)
    }

    /// The record's bank code as text.
    pub fn bank_of(&self, record: &Record) -> Option<String> {
        record.text(self.bank.as_deref()?)
    }

    /// The raw timestamp value.
    pub fn timestamp_of<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        record.get(&self.timestamp)
    }

    /// The record's amount, with missing or non-numeric values read as zero.
    pub fn amount_of(&self, record: &Record) -> f64 {
        self.amount
            .as_deref()
            .and_then(|field| record.get(field))
            .and_then(coerce_amount)
            .unwrap_or(0.0)
    }

    /// True if any search field contains `needle`.
    ///
    /// `needle` must already be lowercase.
    pub fn search_matches(&self, record: &Record, needle: &str) -> bool {
        self.search.iter().any(|field| {
            record
                .text(field)
                .is_some_and(|text| text.to_lowercase().contains(needle))
        })
    }
}

/// Read a JSON value as an amount.
///
/// Numbers are taken as-is; strings are trimmed and may carry `,` thousands
/// separators. Anything else is not an amount.
pub(crate) fn coerce_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

/// Parse an amount written as text.
pub(crate) fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
