//! Decoding bulk-fetch payloads into records.

use serde_json::Value;
use tracing::warn;

use super::Record;
use crate::error::Error;

/// Envelope keys that may hold the record array.
const ENVELOPE_KEYS: &[&str] = &["data", "items", "records"];

/// Decode a bulk-fetch payload.
///
/// Accepts a bare array of objects, or an envelope object holding the
/// array under `data`, `items` or `records` (`data` may itself be such an
/// envelope). Entries that are not objects are skipped with a warning.
///
/// # Errors
///
/// Returns a decode error if no record array can be found.
pub fn records_from_payload(payload: Value) -> Result<Vec<Record>, Error> {
    let array = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let inner = ENVELOPE_KEYS
                .iter()
                .find_map(|key| map.remove(*key))
                .ok_or_else(|| {
                    Error::decode(format!(
                        "expected an array or an object with one of {:?}",
                        ENVELOPE_KEYS
                    ))
                })?;
            return match inner {
                Value::Array(_) | Value::Object(_) => records_from_payload(inner),
                _ => Err(Error::decode("record envelope does not hold an array")),
            };
        }
        _ => return Err(Error::decode("expected an array of records")),
    };

    let total = array.len();
    let records: Vec<Record> = array
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match Record::new(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(skipped = total - records.len(), total, "Payload contained non-object entries");
    }

    Ok(records)
}
