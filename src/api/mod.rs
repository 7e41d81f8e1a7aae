//! Request-client operations.
//!
//! Each operation validates its arguments, resolves one URL through the [`Catalog`],
//! issues a single GET and post-processes the `data` array. Nothing is retried.
//!
//! [`Catalog`]: crate::core::Catalog

pub(crate) mod plan;

pub use plan::filter_by_symbol;

use serde_json::Value;

use crate::core::client::constants::DEFAULT_RANGE_LIMIT;
use crate::core::{AssetCategory, Client, Record, VinterError};
use plan::{
    CONTRIB_FIELD, NEXT_WEIGHTS_FIELD, ScheduleField, WEIGHTS_FIELD, no_data_for, no_data_in_range,
};

impl Client {
    /* ---------------- Active snapshots ---------------- */

    /// Fetches every active record for the client's asset type.
    ///
    /// When `frequency` (`"r"`, `"h"` or `"d"`) is given, only records whose symbol ends with
    /// that suffix are kept.
    ///
    /// # Errors
    ///
    /// Returns [`VinterError::InvalidArgument`] for an unknown frequency (before any request),
    /// or a transport / status error from the request.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn all_active_data(&self, frequency: Option<&str>) -> Result<Vec<Record>, VinterError> {
        let (req, frequency) = plan::active_list(self.catalog(), self.asset_type(), frequency)?;
        let records = self.fetch(&req).await?;
        Ok(plan::filter_by_frequency(records, frequency))
    }

    /// Like [`Client::all_active_data`] but projects each record to its symbol.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn all_active_symbols(&self, frequency: Option<&str>) -> Result<Vec<String>, VinterError> {
        let records = self.all_active_data(frequency).await?;
        Ok(plan::symbols(records))
    }

    /// Fetches the active (current snapshot) record for one symbol.
    ///
    /// # Errors
    ///
    /// [`VinterError::NoData`] if the symbol is not active for this asset type.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn active_data(&self, symbol: &str) -> Result<Record, VinterError> {
        let req = plan::active_record(self.catalog(), self.asset_type(), symbol)?;
        let records = self.fetch(&req).await?;
        plan::first_record(records, symbol)
    }

    /* ---------------- Latest points ---------------- */

    /// Fetches the `limit` most recent points for a symbol. The endpoint is chosen from the
    /// symbol's frequency suffix.
    ///
    /// # Errors
    ///
    /// [`VinterError::NoData`] when the API returns no points.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn latest_data(&self, symbol: &str, limit: u32) -> Result<Vec<Record>, VinterError> {
        let req = plan::latest(self.catalog(), self.asset_type(), symbol, limit)?;
        let records = self.fetch(&req).await?;
        plan::require_records(records, || no_data_for(symbol))
    }

    /// The `value` field of the most recent point for a symbol.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn latest_value(&self, symbol: &str) -> Result<f64, VinterError> {
        let records = self.latest_data(symbol, 1).await?;
        plan::latest_value(records, symbol)
    }

    /* ---------------- Multi-asset / single-asset metadata ---------------- */

    /// Current constituent weights of a multi-asset index.
    ///
    /// # Errors
    ///
    /// [`VinterError::InvalidArgument`] if the client is not a `multi_assets` client (no
    /// request is made); [`VinterError::NoData`] if the record carries no weights.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn current_rebalance_weights(&self, symbol: &str) -> Result<Value, VinterError> {
        plan::require_category(self.asset_type(), AssetCategory::MultiAsset)?;
        let record = self.active_data(symbol).await?;
        plan::required_field(record, WEIGHTS_FIELD, || no_data_for(symbol))
    }

    /// Contributing symbols of a single-asset index.
    ///
    /// # Errors
    ///
    /// [`VinterError::InvalidArgument`] if the client is not a `single_assets` client (no
    /// request is made); [`VinterError::NoData`] if the record has no contributions.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn contributions(&self, symbol: &str) -> Result<Value, VinterError> {
        plan::require_category(self.asset_type(), AssetCategory::SingleAsset)?;
        let record = self.active_data(symbol).await?;
        plan::required_field(record, CONTRIB_FIELD, || {
            format!("The symbol {symbol} does not have any contributions associated with it.")
        })
    }

    /// Date of the previous rebalance, or `None` if none is scheduled.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn previous_rebalance_date(&self, symbol: &str) -> Result<Option<String>, VinterError> {
        self.schedule_date(symbol, ScheduleField::PreviousRebalanceDate).await
    }

    /// Date of the previous review, or `None` if none is scheduled.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn previous_review_date(&self, symbol: &str) -> Result<Option<String>, VinterError> {
        self.schedule_date(symbol, ScheduleField::PreviousReviewDate).await
    }

    /// Date of the next rebalance, or `None` if none is scheduled.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn next_rebalance_date(&self, symbol: &str) -> Result<Option<String>, VinterError> {
        self.schedule_date(symbol, ScheduleField::NextRebalanceDate).await
    }

    /// Date of the next review, or `None` if none is scheduled.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn next_review_date(&self, symbol: &str) -> Result<Option<String>, VinterError> {
        self.schedule_date(symbol, ScheduleField::NextReviewDate).await
    }

    /// Weights that take effect at the next rebalance, or `None` if not published.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn next_rebalance_weights(&self, symbol: &str) -> Result<Option<Value>, VinterError> {
        plan::require_category(self.asset_type(), AssetCategory::MultiAsset)?;
        let record = self.active_data(symbol).await?;
        Ok(plan::optional_field(record, NEXT_WEIGHTS_FIELD))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    async fn schedule_date(
        &self,
        symbol: &str,
        field: ScheduleField,
    ) -> Result<Option<String>, VinterError> {
        plan::require_category(self.asset_type(), AssetCategory::MultiAsset)?;
        let record = self.active_data(symbol).await?;
        plan::optional_date(record, field)
    }

    /* ---------------- History ---------------- */

    /// Points for one calendar day (`YYYY-MM-DD`), queried as `[date, date + 1 day)`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn data_by_date(&self, symbol: &str, date: &str) -> Result<Vec<Record>, VinterError> {
        self.data_by_dates(symbol, &[date]).await
    }

    /// Points covering a list of dates, queried as `[first, last + 1 day)`.
    ///
    /// Only the first and last dates shape the range; the list is not checked for order.
    ///
    /// # Errors
    ///
    /// [`VinterError::InvalidArgument`] for a malformed date or an empty list.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn data_by_dates(&self, symbol: &str, dates: &[&str]) -> Result<Vec<Record>, VinterError> {
        crate::core::validate::validate_symbol_and_extract_frequency(symbol)?;
        let (start, end) = plan::date_range(dates)?;
        self.data_by_range(symbol, &start, Some(&end), None).await
    }

    /// Points between `start` and `end` (`YYYY-MM-DD` or RFC 3339 timestamps).
    ///
    /// `limit` defaults to 1000.
    ///
    /// # Errors
    ///
    /// [`VinterError::NoData`] when the range holds no points.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type())))]
    pub async fn data_by_range(
        &self,
        symbol: &str,
        start: &str,
        end: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Record>, VinterError> {
        let req = plan::range(
            self.catalog(),
            self.asset_type(),
            symbol,
            start,
            end,
            limit.unwrap_or(DEFAULT_RANGE_LIMIT),
        )?;
        let records = self.fetch(&req).await?;
        plan::require_records(records, || no_data_in_range(symbol, start, end))
    }
}
