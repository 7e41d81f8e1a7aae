//! Pure request planning and post-processing shared by the async and blocking clients.
//!
//! A plan is everything needed to issue one GET (absolute URL + query). Building one runs
//! all validation, so an invalid call fails here without touching the network. The
//! post-processing helpers turn the decoded `data` array into each operation's result.

use chrono::Days;
use serde_json::Value;
use url::Url;

use crate::core::catalog::Catalog;
use crate::core::models::{AssetCategory, Frequency, Record};
use crate::core::validate::{
    DATE_FORMAT, validate_dates, validate_frequency, validate_symbol_and_extract_frequency,
};
use crate::core::VinterError;

/// One outbound GET.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RequestPlan {
    pub(crate) url: Url,
    pub(crate) query: Vec<(&'static str, String)>,
}

/// Fields of the active record read by the schedule operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScheduleField {
    PreviousRebalanceDate,
    PreviousReviewDate,
    NextRebalanceDate,
    NextReviewDate,
}

impl ScheduleField {
    pub(crate) const fn key(self) -> &'static str {
        match self {
            ScheduleField::PreviousRebalanceDate => "previous_rebalance_date",
            ScheduleField::PreviousReviewDate => "previous_review_date",
            ScheduleField::NextRebalanceDate => "next_rebalance_date",
            ScheduleField::NextReviewDate => "next_review_date",
        }
    }
}

pub(crate) const WEIGHTS_FIELD: &str = "weights";
pub(crate) const CONTRIB_FIELD: &str = "contrib";
pub(crate) const NEXT_WEIGHTS_FIELD: &str = "next_rebalance_weights";

/* ---------------- Plans ---------------- */

/// Listing of every active symbol. The optional frequency filter is validated up front and
/// returned so the caller can apply it to the response.
pub(crate) fn active_list(
    catalog: &Catalog,
    category: AssetCategory,
    frequency: Option<&str>,
) -> Result<(RequestPlan, Option<Frequency>), VinterError> {
    let frequency = frequency.map(validate_frequency).transpose()?;
    let plan = RequestPlan {
        url: catalog.resolve_active(category)?,
        query: Vec::new(),
    };
    Ok((plan, frequency))
}

pub(crate) fn latest(
    catalog: &Catalog,
    category: AssetCategory,
    symbol: &str,
    limit: u32,
) -> Result<RequestPlan, VinterError> {
    Ok(RequestPlan {
        url: catalog.resolve_by_symbol(category, symbol)?,
        query: vec![("symbol", symbol.to_string()), ("limit", limit.to_string())],
    })
}

pub(crate) fn active_record(
    catalog: &Catalog,
    category: AssetCategory,
    symbol: &str,
) -> Result<RequestPlan, VinterError> {
    let (symbol, _) = validate_symbol_and_extract_frequency(symbol)?;
    Ok(RequestPlan {
        url: catalog.resolve_active(category)?,
        query: vec![("symbol", symbol.to_string())],
    })
}

/// Time-range query. `end_time` is omitted when `end` is `None`.
pub(crate) fn range(
    catalog: &Catalog,
    category: AssetCategory,
    symbol: &str,
    start: &str,
    end: Option<&str>,
    limit: u32,
) -> Result<RequestPlan, VinterError> {
    let url = catalog.resolve_by_symbol(category, symbol)?;
    let mut query = vec![
        ("symbol", symbol.to_string()),
        ("start_time", start.to_string()),
    ];
    if let Some(end) = end {
        query.push(("end_time", end.to_string()));
    }
    query.push(("limit", limit.to_string()));
    Ok(RequestPlan { url, query })
}

/// Turns a list of dates into the half-open range `[first, last + 1 day)`.
///
/// Only the first and last entries shape the range; interior entries are validated but
/// neither ordering nor contiguity is checked.
pub(crate) fn date_range<S: AsRef<str>>(dates: &[S]) -> Result<(String, String), VinterError> {
    let parsed = validate_dates(dates)?;
    let (Some(first), Some(last)) = (dates.first(), parsed.last()) else {
        return Err(VinterError::InvalidArgument(
            "at least one date is required".into(),
        ));
    };
    let end = last.checked_add_days(Days::new(1)).ok_or_else(|| {
        VinterError::InvalidArgument(format!("date {last} is out of range"))
    })?;
    Ok((first.as_ref().to_string(), end.format(DATE_FORMAT).to_string()))
}

/// Fails fast when an operation is restricted to another asset type.
pub(crate) fn require_category(
    actual: AssetCategory,
    required: AssetCategory,
) -> Result<(), VinterError> {
    if actual == required {
        Ok(())
    } else {
        Err(VinterError::InvalidArgument(format!(
            "The asset type must be {required} to use this function (client asset type is {actual})"
        )))
    }
}

/* ---------------- Post-processing ---------------- */

fn record_symbol(record: &Record) -> Option<&str> {
    record.get("symbol").and_then(Value::as_str)
}

/// Keeps only records whose `symbol` is exactly `symbol`.
pub fn filter_by_symbol(records: &[Record], symbol: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|r| record_symbol(r) == Some(symbol))
        .cloned()
        .collect()
}

/// Keeps records whose symbol ends with the frequency's suffix (after the last hyphen).
pub(crate) fn filter_by_frequency(records: Vec<Record>, frequency: Option<Frequency>) -> Vec<Record> {
    let Some(frequency) = frequency else {
        return records;
    };
    records
        .into_iter()
        .filter(|r| {
            record_symbol(r)
                .and_then(|s| s.rsplit('-').next())
                .is_some_and(|suffix| suffix == frequency.suffix())
        })
        .collect()
}

pub(crate) fn symbols(records: Vec<Record>) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| record_symbol(r).map(str::to_string))
        .collect()
}

pub(crate) fn require_records(
    records: Vec<Record>,
    context: impl FnOnce() -> String,
) -> Result<Vec<Record>, VinterError> {
    if records.is_empty() {
        Err(VinterError::NoData(context()))
    } else {
        Ok(records)
    }
}

pub(crate) fn first_record(records: Vec<Record>, symbol: &str) -> Result<Record, VinterError> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| VinterError::NoData(no_data_for(symbol)))
}

pub(crate) fn latest_value(records: Vec<Record>, symbol: &str) -> Result<f64, VinterError> {
    let first = first_record(records, symbol)?;
    match first.get("value") {
        Some(v) => v.as_f64().ok_or_else(|| {
            VinterError::Decode(format!("`value` for {symbol} is not a number: {v}"))
        }),
        None => Err(VinterError::NoData(format!(
            "the latest record for {symbol} has no value"
        ))),
    }
}

/// Reads a field that must carry data; absent, null and empty values are all "no data".
pub(crate) fn required_field(
    mut record: Record,
    field: &str,
    context: impl FnOnce() -> String,
) -> Result<Value, VinterError> {
    match record.remove(field) {
        Some(v) if !is_empty_value(&v) => Ok(v),
        _ => Err(VinterError::NoData(context())),
    }
}

/// Reads a field that may be legitimately absent; null maps to `None`.
pub(crate) fn optional_field(mut record: Record, field: &str) -> Option<Value> {
    record.remove(field).filter(|v| !v.is_null())
}

/// Reads a schedule date; `None` means nothing is scheduled.
pub(crate) fn optional_date(record: Record, field: ScheduleField) -> Result<Option<String>, VinterError> {
    match optional_field(record, field.key()) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(VinterError::Decode(format!(
            "`{}` is not a date string: {other}",
            field.key()
        ))),
    }
}

pub(crate) fn no_data_for(symbol: &str) -> String {
    format!("No data was found for the symbol: {symbol}")
}

pub(crate) fn no_data_in_range(symbol: &str, start: &str, end: Option<&str>) -> String {
    format!(
        "No data was found for the symbol: {symbol} between {start} and {}.",
        end.unwrap_or("now")
    )
}

fn is_empty_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
