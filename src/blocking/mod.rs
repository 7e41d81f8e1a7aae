//! Blocking client.
//!
//! Mirrors [`crate::Client`] call for call over `reqwest::blocking`. One call at a time per
//! instance; the transport handle is reused across sequential calls. Do not use it from
//! inside an async runtime.

use std::fmt;

use serde_json::Value;

use crate::api::plan::{
    self, CONTRIB_FIELD, NEXT_WEIGHTS_FIELD, RequestPlan, ScheduleField, WEIGHTS_FIELD,
    no_data_for, no_data_in_range,
};
use crate::core::client::constants::DEFAULT_RANGE_LIMIT;
use crate::core::client::{ClientBuilder, Parts};
use crate::core::validate::validate_symbol_and_extract_frequency;
use crate::core::{ApiKey, AssetCategory, Catalog, Record, VinterError, net};

/// Synchronous client for the REST API.
pub struct Client {
    http: reqwest::blocking::Client,
    api_key: ApiKey,
    asset_type: AssetCategory,
    catalog: Catalog,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("blocking::Client")
            .field("api_key", &self.api_key)
            .field("asset_type", &self.asset_type)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new builder; finish it with [`ClientBuilder::build_blocking`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn new(api_key: impl Into<String>, asset_type: impl AsRef<str>) -> Result<Self, VinterError> {
        Self::builder()
            .api_key(api_key)
            .asset_type(asset_type)
            .build_blocking()
    }

    pub(crate) fn from_parts(parts: Parts) -> Result<Self, VinterError> {
        let mut httpb = reqwest::blocking::Client::builder()
            .default_headers(parts.headers)
            .timeout(parts.timeout);
        if let Some(ct) = parts.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }
        Ok(Self {
            http: httpb.build()?,
            api_key: parts.api_key,
            asset_type: parts.asset_type,
            catalog: parts.catalog,
        })
    }

    pub fn asset_type(&self) -> AssetCategory {
        self.asset_type
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Opens nothing; returns a WebSocket session for `symbol` sharing this client's settings.
    pub fn stream(&self, symbol: &str) -> Result<crate::stream::WsSession, VinterError> {
        crate::stream::WsSession::from_settings(&self.api_key, self.asset_type, &self.catalog, symbol)
    }

    fn fetch(&self, req: &RequestPlan) -> Result<Vec<Record>, VinterError> {
        let resp = self.http.get(req.url.clone()).query(&req.query).send()?;
        net::handle_blocking_response(resp)
    }

    /// See [`crate::Client::all_active_data`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn all_active_data(&self, frequency: Option<&str>) -> Result<Vec<Record>, VinterError> {
        let (req, frequency) = plan::active_list(&self.catalog, self.asset_type, frequency)?;
        let records = self.fetch(&req)?;
        Ok(plan::filter_by_frequency(records, frequency))
    }

    /// See [`crate::Client::all_active_symbols`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn all_active_symbols(&self, frequency: Option<&str>) -> Result<Vec<String>, VinterError> {
        self.all_active_data(frequency).map(plan::symbols)
    }

    /// See [`crate::Client::active_data`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn active_data(&self, symbol: &str) -> Result<Record, VinterError> {
        let req = plan::active_record(&self.catalog, self.asset_type, symbol)?;
        plan::first_record(self.fetch(&req)?, symbol)
    }

    /// See [`crate::Client::latest_data`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn latest_data(&self, symbol: &str, limit: u32) -> Result<Vec<Record>, VinterError> {
        let req = plan::latest(&self.catalog, self.asset_type, symbol, limit)?;
        plan::require_records(self.fetch(&req)?, || no_data_for(symbol))
    }

    /// See [`crate::Client::latest_value`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn latest_value(&self, symbol: &str) -> Result<f64, VinterError> {
        let records = self.latest_data(symbol, 1)?;
        plan::latest_value(records, symbol)
    }

    /// See [`crate::Client::current_rebalance_weights`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn current_rebalance_weights(&self, symbol: &str) -> Result<Value, VinterError> {
        plan::require_category(self.asset_type, AssetCategory::MultiAsset)?;
        let record = self.active_data(symbol)?;
        plan::required_field(record, WEIGHTS_FIELD, || no_data_for(symbol))
    }

    /// See [`crate::Client::contributions`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn contributions(&self, symbol: &str) -> Result<Value, VinterError> {
        plan::require_category(self.asset_type, AssetCategory::SingleAsset)?;
        let record = self.active_data(symbol)?;
        plan::required_field(record, CONTRIB_FIELD, || {
            format!("The symbol {symbol} does not have any contributions associated with it.")
        })
    }

    /// Date of the previous rebalance, or `None` if none is scheduled.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn previous_rebalance_date(&self, symbol: &str) -> Result<Option<String>, VinterError> {
        self.schedule_date(symbol, ScheduleField::PreviousRebalanceDate)
    }

    /// Date of the previous review, or `None` if none is scheduled.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn previous_review_date(&self, symbol: &str) -> Result<Option<String>, VinterError> {
        self.schedule_date(symbol, ScheduleField::PreviousReviewDate)
    }

    /// Date of the next rebalance, or `None` if none is scheduled.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn next_rebalance_date(&self, symbol: &str) -> Result<Option<String>, VinterError> {
        self.schedule_date(symbol, ScheduleField::NextRebalanceDate)
    }

    /// Date of the next review, or `None` if none is scheduled.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn next_review_date(&self, symbol: &str) -> Result<Option<String>, VinterError> {
        self.schedule_date(symbol, ScheduleField::NextReviewDate)
    }

    /// See [`crate::Client::next_rebalance_weights`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn next_rebalance_weights(&self, symbol: &str) -> Result<Option<Value>, VinterError> {
        plan::require_category(self.asset_type, AssetCategory::MultiAsset)?;
        let record = self.active_data(symbol)?;
        Ok(plan::optional_field(record, NEXT_WEIGHTS_FIELD))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    fn schedule_date(&self, symbol: &str, field: ScheduleField) -> Result<Option<String>, VinterError> {
        plan::require_category(self.asset_type, AssetCategory::MultiAsset)?;
        let record = self.active_data(symbol)?;
        plan::optional_date(record, field)
    }

    /// See [`crate::Client::data_by_date`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn data_by_date(&self, symbol: &str, date: &str) -> Result<Vec<Record>, VinterError> {
        self.data_by_dates(symbol, &[date])
    }

    /// See [`crate::Client::data_by_dates`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn data_by_dates(&self, symbol: &str, dates: &[&str]) -> Result<Vec<Record>, VinterError> {
        validate_symbol_and_extract_frequency(symbol)?;
        let (start, end) = plan::date_range(dates)?;
        self.data_by_range(symbol, &start, Some(&end), None)
    }

    /// See [`crate::Client::data_by_range`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(asset_type = %self.asset_type)))]
    pub fn data_by_range(
        &self,
        symbol: &str,
        start: &str,
        end: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Record>, VinterError> {
        let req = plan::range(
            &self.catalog,
            self.asset_type,
            symbol,
            start,
            end,
            limit.unwrap_or(DEFAULT_RANGE_LIMIT),
        )?;
        plan::require_records(self.fetch(&req)?, || no_data_in_range(symbol, start, end))
    }
}
