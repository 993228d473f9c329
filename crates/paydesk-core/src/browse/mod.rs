//! The record browser: filter, sort and paginate an in-memory collection.
//!
//! The whole collection for an entity is fetched once; every change to the
//! criteria or the requested page recomputes the visible page from scratch
//! with [`apply`]. The browser holds no state between calls.

mod criteria;
mod page;
mod time;

use chrono::{Local, TimeZone};

use crate::record::{EntityFieldMap, Record};

pub use criteria::{ALL, AmountInput, FilterCriteria, RawCriteria, parse_amount_bound, parse_date};
pub use page::{DEFAULT_PAGE_SIZE, PageRequest, PageResult};

use criteria::Predicate;
use page::PageWindow;

/// Compute the visible page of `records`, using the local time zone for
/// calendar days and naive timestamps.
///
/// Records are kept if they satisfy every set criterion, ordered by
/// timestamp (most recent first, ties in input order), then sliced to the
/// requested page. A page outside the result resets to page 1.
///
/// # Example
///
/// ```
/// use paydesk_core::{EntityKind, FilterCriteria, PageRequest, Record, apply};
/// use serde_json::json;
///
/// let records: Vec<Record> = vec![
///     Record::new(json!({"id": "a", "createdAt": "2024-01-01", "status": "SUCCESS"})).unwrap(),
///     Record::new(json!({"id": "b", "createdAt": "2024-03-15", "status": "FAILED"})).unwrap(),
/// ];
/// let criteria = FilterCriteria {
///     status: Some("success".to_string()),
///     ..Default::default()
/// };
///
/// let page = apply(&records, &criteria, PageRequest::default(), &EntityKind::Transfer.field_map());
/// assert_eq!(page.total, 1);
/// assert_eq!(page.items[0].text("id").as_deref(), Some("a"));
/// ```
pub fn apply<'a>(
    records: &'a [Record],
    criteria: &FilterCriteria,
    request: PageRequest,
    fields: &EntityFieldMap,
) -> PageResult<'a> {
    apply_in(records, criteria, request, fields, &Local)
}

/// [`apply`] with an explicit time zone.
pub fn apply_in<'a, Tz: TimeZone>(
    records: &'a [Record],
    criteria: &FilterCriteria,
    request: PageRequest,
    fields: &EntityFieldMap,
    tz: &Tz,
) -> PageResult<'a> {
    let predicate = Predicate::compile(criteria, tz);

    let mut matched: Vec<(i64, &'a Record)> = records
        .iter()
        .map(|record| (time::timestamp_millis(fields.timestamp_of(record), tz), record))
        .filter(|(ts, record)| predicate.matches(record, *ts, fields))
        .collect();

    // Vec::sort_by is stable: equal timestamps keep input order.
    matched.sort_by(|a, b| b.0.cmp(&a.0));

    let window = PageWindow::new(matched.len(), request);
    let items = matched[window.range]
        .iter()
        .map(|(_, record)| *record)
        .collect();

    PageResult {
        items,
        page: window.page,
        total_pages: window.total_pages,
        total: matched.len(),
    }
}
