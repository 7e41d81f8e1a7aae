//! Input validation shared by every access mode.
//!
//! All checks run before any network call, so a rejected argument never leaves a
//! request half-issued.

use chrono::NaiveDate;

use super::models::{ApiKey, AssetCategory, Frequency};
use super::VinterError;

/// Wire format for calendar dates accepted by the date-based queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks that a credential was supplied as a string and is not blank.
///
/// A missing credential (no explicit key and no environment default) is reported as
/// [`VinterError::TypeMismatch`]; a blank one as [`VinterError::InvalidArgument`].
pub fn validate_credential(value: Option<&str>) -> Result<ApiKey, VinterError> {
    let raw = value.ok_or_else(|| VinterError::TypeMismatch("The api key must be a string.".into()))?;
    if raw.trim().is_empty() {
        return Err(VinterError::InvalidArgument(
            "The api key must not be empty.".into(),
        ));
    }
    Ok(ApiKey::new(raw.to_string()))
}

pub fn validate_category(value: &str) -> Result<AssetCategory, VinterError> {
    value.parse()
}

pub fn validate_frequency(value: &str) -> Result<Frequency, VinterError> {
    value.parse()
}

/// Splits `symbol` on its last hyphen and validates the trailing segment as a frequency suffix.
///
/// `"btc-usd-p-d"` yields `("btc-usd-p-d", Frequency::Daily)`. The suffix is the only way
/// frequency is inferred from a bare symbol, so any change to the symbol grammar has to keep it.
pub fn validate_symbol_and_extract_frequency(
    symbol: &str,
) -> Result<(&str, Frequency), VinterError> {
    if symbol.is_empty() {
        return Err(VinterError::InvalidArgument(
            "The symbol must be provided.".into(),
        ));
    }
    let suffix = symbol.rsplit('-').next().unwrap_or(symbol);
    let frequency = validate_frequency(suffix).map_err(|_| {
        VinterError::InvalidArgument(format!(
            "symbol {symbol:?} must end with a frequency suffix, one of {}",
            Frequency::allowed()
        ))
    })?;
    Ok((symbol, frequency))
}

/// Parses every entry as a `YYYY-MM-DD` calendar date. An empty slice is valid.
pub fn validate_dates<S: AsRef<str>>(dates: &[S]) -> Result<Vec<NaiveDate>, VinterError> {
    dates
        .iter()
        .map(|d| {
            let d = d.as_ref();
            NaiveDate::parse_from_str(d, DATE_FORMAT).map_err(|_| {
                VinterError::InvalidArgument(format!(
                    "The date must be in the format YYYY-MM-DD : date {d}"
                ))
            })
        })
        .collect()
}
