//! Filter criteria and their wire form.

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::time;
use crate::error::{Error, InvalidInputError};
use crate::record::{EntityFieldMap, Record};

/// Sentinel meaning "no constraint" for choice filters on the wire.
pub const ALL: &str = "all";

/// User-supplied filters for a record list.
///
/// Every constraint is optional; `None` imposes nothing. All set constraints
/// must hold for a record to match.
///
/// # Example
///
/// ```
/// use paydesk_core::FilterCriteria;
///
/// let criteria = FilterCriteria {
///     search: Some("smith".to_string()),
///     status: Some("SUCCESS".to_string()),
///     ..Default::default()
/// };
/// assert!(!criteria.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring over the entity's search fields.
    pub search: Option<String>,
    /// Case-insensitive exact status.
    pub status: Option<String>,
    /// Exact bank code, compared trimmed.
    pub bank: Option<String>,
    /// First local calendar day, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Last local calendar day, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Minimum amount, inclusive.
    pub amount_min: Option<f64>,
    /// Maximum amount, inclusive.
    pub amount_max: Option<f64>,
}

impl FilterCriteria {
    /// True if no constraint is set.
    pub fn is_empty(&self) -> bool {
        search_term(self.search.as_deref()).is_none()
            && choice(self.status.as_deref()).is_none()
            && choice(self.bank.as_deref()).is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.amount_min.is_none()
            && self.amount_max.is_none()
    }
}

/// Criteria resolved for one browsing pass.
#[derive(Debug)]
pub(crate) struct Predicate {
    needle: Option<String>,
    status: Option<String>,
    bank: Option<String>,
    from_ms: Option<i64>,
    to_ms: Option<i64>,
    amount_min: Option<f64>,
    amount_max: Option<f64>,
}

impl Predicate {
    pub fn compile<Tz: TimeZone>(criteria: &FilterCriteria, tz: &Tz) -> Self {
        Self {
            needle: search_term(criteria.search.as_deref()).map(str::to_lowercase),
            status: choice(criteria.status.as_deref()).map(str::to_lowercase),
            bank: choice(criteria.bank.as_deref()).map(str::to_string),
            from_ms: criteria.date_from.map(|d| time::day_start(d, tz)),
            to_ms: criteria.date_to.map(|d| time::day_end(d, tz)),
            amount_min: criteria.amount_min,
            amount_max: criteria.amount_max,
        }
    }

    /// Check `record`, whose timestamp has already been resolved to `ts_ms`.
    pub fn matches(&self, record: &Record, ts_ms: i64, fields: &EntityFieldMap) -> bool {
        if let Some(needle) = &self.needle
            && !fields.search_matches(record, needle)
        {
            return false;
        }

        if let Some(status) = &self.status
            && !fields
                .status_of(record)
                .is_some_and(|s| s.trim().to_lowercase() == *status)
        {
            return false;
        }

        if let Some(bank) = &self.bank
            && !fields.bank_of(record).is_some_and(|b| b.trim() == bank)
        {
            return false;
        }

        if self.from_ms.is_some_and(|from| ts_ms < from) {
            return false;
        }
        if self.to_ms.is_some_and(|to| ts_ms > to) {
            return false;
        }

        if self.amount_min.is_some() || self.amount_max.is_some() {
            let amount = fields.amount_of(record);
            if self.amount_min.is_some_and(|min| amount < min) {
                return false;
            }
            if self.amount_max.is_some_and(|max| amount > max) {
                return false;
            }
        }

        true
    }
}

/// A search term kept verbatim; blank means no search.
fn search_term(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A trimmed, non-sentinel choice, or `None`.
fn choice(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

/// An amount bound as it arrives from a form: a number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

/// Filter criteria in their sentinel-based wire form.
///
/// `""` for search, `"all"` for status and bank, and `null` (or `""`) for
/// dates and amounts mean "no constraint".
///
/// # Example
///
/// ```
/// use paydesk_core::{FilterCriteria, RawCriteria};
///
/// let raw: RawCriteria = serde_json::from_str(
///     r#"{"search": "", "status": "all", "bank": "014", "dateFrom": "2024-05-01"}"#,
/// ).unwrap();
/// let criteria = FilterCriteria::try_from(raw).unwrap();
///
/// assert_eq!(criteria.status, None);
/// assert_eq!(criteria.bank.as_deref(), Some("014"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCriteria {
    pub search: String,
    pub status: String,
    pub bank: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub amount_min: Option<AmountInput>,
    pub amount_max: Option<AmountInput>,
}

impl Default for RawCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: ALL.to_string(),
            bank: ALL.to_string(),
            date_from: None,
            date_to: None,
            amount_min: None,
            amount_max: None,
        }
    }
}

impl TryFrom<RawCriteria> for FilterCriteria {
    type Error = Error;

    fn try_from(raw: RawCriteria) -> Result<Self, Self::Error> {
        Ok(FilterCriteria {
            search: search_term(Some(&raw.search)).map(str::to_string),
            status: choice(Some(&raw.status)).map(str::to_string),
            bank: choice(Some(&raw.bank)).map(str::to_string),
            date_from: parse_date(raw.date_from.as_deref())?,
            date_to: parse_date(raw.date_to.as_deref())?,
            amount_min: parse_bound(raw.amount_min)?,
            amount_max: parse_bound(raw.amount_max)?,
        })
    }
}

impl From<&FilterCriteria> for RawCriteria {
    fn from(criteria: &FilterCriteria) -> Self {
        let or_all = |v: &Option<String>| v.clone().unwrap_or_else(|| ALL.to_string());
        RawCriteria {
            search: criteria.search.clone().unwrap_or_default(),
            status: or_all(&criteria.status),
            bank: or_all(&criteria.bank),
            date_from: criteria.date_from.map(|d| d.format("%Y-%m-%d").to_string()),
            date_to: criteria.date_to.map(|d| d.format("%Y-%m-%d").to_string()),
            amount_min: criteria.amount_min.map(AmountInput::Number),
            amount_max: criteria.amount_max.map(AmountInput::Number),
        }
    }
}

/// Parse an optional `YYYY-MM-DD` calendar day; blank means unset.
pub fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, Error> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            InvalidInputError::Date {
                value: value.to_string(),
            }
            .into()
        })
}

/// Parse an optional amount bound; blank text means unset.
pub fn parse_amount_bound(value: Option<&str>) -> Result<Option<f64>, Error> {
    parse_bound(value.map(|v| AmountInput::Text(v.to_string())))
}

fn parse_bound(value: Option<AmountInput>) -> Result<Option<f64>, Error> {
    match value {
        None => Ok(None),
        Some(AmountInput::Number(n)) if n.is_finite() => Ok(Some(n)),
        Some(AmountInput::Number(n)) => Err(InvalidInputError::Amount {
            value: n.to_string(),
        }
        .into()),
        Some(AmountInput::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(AmountInput::Text(text)) => crate::record::parse_amount(&text)
            .map(Some)
            .ok_or_else(|| InvalidInputError::Amount { value: text }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_defaults_are_sentinels() {
        let raw: RawCriteria = serde_json::from_value(json!({})).unwrap();
        assert_eq!(raw, RawCriteria::default());
        let criteria = FilterCriteria::try_from(raw).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn sentinels_map_to_none() {
        let raw: RawCriteria = serde_json::from_value(json!({
            "search": "  ",
            "status": "ALL",
            "bank": "all",
            "dateFrom": null,
            "dateTo": "",
            "amountMin": null,
            "amountMax": ""
        }))
        .unwrap();

        assert_eq!(FilterCriteria::try_from(raw).unwrap(), FilterCriteria::default());
    }

    #[test]
    fn parses_values() {
        let raw: RawCriteria = serde_json::from_value(json!({
            "search": "Smith",
            "status": "success",
            "bank": " 014 ",
            "dateFrom": "2024-05-01",
            "dateTo": "2024-05-10",
            "amountMin": "100",
            "amountMax": 2500.5
        }))
        .unwrap();

        let criteria = FilterCriteria::try_from(raw).unwrap();
        assert_eq!(criteria.search.as_deref(), Some("Smith"));
        assert_eq!(criteria.status.as_deref(), Some("success"));
        assert_eq!(criteria.bank.as_deref(), Some("014"));
        assert_eq!(criteria.date_from, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(criteria.date_to, NaiveDate::from_ymd_opt(2024, 5, 10));
        assert_eq!(criteria.amount_min, Some(100.0));
        assert_eq!(criteria.amount_max, Some(2500.5));
    }

    #[test]
    fn search_is_not_trimmed() {
        let raw = RawCriteria {
            search: " Smith ".to_string(),
            ..Default::default()
        };
        let criteria = FilterCriteria::try_from(raw).unwrap();
        assert_eq!(criteria.search.as_deref(), Some(" Smith "));
    }

    #[test]
    fn bad_date_rejected() {
        let raw = RawCriteria {
            date_from: Some("10/05/2024".to_string()),
            ..Default::default()
        };
        let err = FilterCriteria::try_from(raw).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(InvalidInputError::Date { .. })));
    }

    #[test]
    fn bad_amount_rejected() {
        assert!(parse_amount_bound(Some("ten")).is_err());
        assert_eq!(parse_amount_bound(Some("1,000")).unwrap(), Some(1000.0));
        assert_eq!(parse_amount_bound(None).unwrap(), None);
    }

    #[test]
    fn converts_back_to_wire_form() {
        let criteria = FilterCriteria {
            bank: Some("002".to_string()),
            date_to: NaiveDate::from_ymd_opt(2024, 5, 10),
            ..Default::default()
        };
        let raw = RawCriteria::from(&criteria);

        assert_eq!(raw.search, "");
        assert_eq!(raw.status, "all");
        assert_eq!(raw.bank, "002");
        assert_eq!(raw.date_to.as_deref(), Some("2024-05-10"));
        assert_eq!(FilterCriteria::try_from(raw).unwrap(), criteria);
    }

    #[test]
    fn all_inside_native_criteria_is_ignored() {
        let criteria = FilterCriteria {
            status: Some("all".to_string()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
    }
}
