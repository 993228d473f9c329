//! JSON formatting and `.json` file export for the detail view.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Error, InvalidInputError};
use crate::types::EntityKind;

/// Pretty-print a value with 2-space indentation.
pub fn to_pretty_json(value: &Value) -> Result<String, Error> {
    serde_json::to_string_pretty(value).map_err(Error::decode)
}

/// Validate JSON text and return it pretty-printed.
///
/// # Errors
///
/// Returns [`InvalidInputError::Json`] with the position of the first
/// syntax error.
///
/// # Example
///
/// ```
/// use paydesk_core::export::format_json;
///
/// assert_eq!(format_json(r#"{"a":[1,2]}"#).unwrap(), "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
/// assert!(format_json("{\"a\":").is_err());
/// ```
pub fn format_json(text: &str) -> Result<String, Error> {
    let value: Value = serde_json::from_str(text).map_err(|e| InvalidInputError::Json {
        line: e.line(),
        column: e.column(),
        reason: e.to_string(),
    })?;
    to_pretty_json(&value)
}

/// File name for an exported record: `<entity>-<id>.json`.
///
/// Characters other than ASCII alphanumerics, `-`, `_` and `.` in the id
/// are replaced with `_`.
pub fn export_file_name(kind: EntityKind, id: &str) -> String {
    let safe: String = id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_matches('.');
    let safe = if safe.is_empty() { "record" } else { safe };
    format!("{}-{}.json", kind.as_str(), safe)
}

/// Write `value` pretty-printed into `dir` and return the file path.
///
/// The file is written to a temporary name and renamed into place.
#[instrument(skip(value))]
pub fn write_export(
    dir: &Path,
    kind: EntityKind,
    id: &str,
    value: &Value,
) -> Result<PathBuf, Error> {
    let content = to_pretty_json(value)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(kind, id));
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, &path)?;

    debug!(path = %path.display(), bytes = content.len(), "Exported record");

    Ok(path)
}
