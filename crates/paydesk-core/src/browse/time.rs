//! Timestamp parsing and calendar-day bounds.
//!
//! All instants are Unix epoch milliseconds. Naive timestamps and calendar
//! days are interpreted in the browsing time zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike};
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Milliseconds for a record's timestamp value.
///
/// Missing or unparseable values are epoch 0, so they sort as the oldest
/// records and fall before any `date_from` bound.
pub(crate) fn timestamp_millis<Tz: TimeZone>(value: Option<&Value>, tz: &Tz) -> i64 {
    value.and_then(|v| parse_value(v, tz)).unwrap_or(0)
}

fn parse_value<Tz: TimeZone>(value: &Value, tz: &Tz) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_str(s.trim(), tz),
        _ => None,
    }
}

fn parse_str<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<i64> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.timestamp_millis());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(local_millis(&naive, tz));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| local_millis(&naive, tz))
}

/// First millisecond of a local calendar day (00:00:00.000).
pub(crate) fn day_start<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    date.and_hms_milli_opt(0, 0, 0, 0)
        .map(|naive| local_millis(&naive, tz))
        .unwrap_or(i64::MIN)
}

/// Last millisecond of a local calendar day (23:59:59.999).
pub(crate) fn day_end<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| local_millis(&naive, tz))
        .unwrap_or(i64::MAX)
}

/// Resolve a wall-clock time in `tz`.
///
/// Ambiguous times (DST fold) take the earlier instant. Times skipped by a
/// DST gap resolve to the first valid instant after the gap.
fn local_millis<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> i64 {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return dt.timestamp_millis();
    }

    // Transitions fall on minute boundaries, so the first valid wall-clock
    // minute after `naive` is where the gap ends.
    let mut minute = naive.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(*naive);
    for _ in 0..MAX_GAP_MINUTES {
        minute += TimeDelta::minutes(1);
        if let Some(dt) = tz.from_local_datetime(&minute).earliest() {
            return dt.timestamp_millis();
        }
    }
    naive.and_utc().timestamp_millis()
}

/// Longest DST gap searched, in minutes.
const MAX_GAP_MINUTES: u32 = 24 * 60;
