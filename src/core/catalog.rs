//! Endpoint catalog: maps a logical request onto one of a fixed set of REST/WebSocket URLs.
//!
//! The endpoint table is static; only the REST and WebSocket bases vary, so tests can point
//! a [`Catalog`] at a mock server.

use url::Url;

use super::client::constants::{DEFAULT_API_BASE, DEFAULT_WS_BASE};
use super::models::{AssetCategory, Frequency};
use super::validate::validate_symbol_and_extract_frequency;
use super::VinterError;

struct Descriptor {
    category: AssetCategory,
    /// `None` marks the "active" endpoint of a category.
    frequency: Option<Frequency>,
    path: &'static str,
}

const fn rest(
    category: AssetCategory,
    frequency: Option<Frequency>,
    path: &'static str,
) -> Descriptor {
    Descriptor {
        category,
        frequency,
        path,
    }
}

use AssetCategory::{MultiAsset, Nav, SingleAsset, StakingYield};
use Frequency::{Daily, Hourly, RealTime};

static REST_ENDPOINTS: [Descriptor; 14] = [
    rest(MultiAsset, Some(RealTime), "multi_assets_real_time"),
    rest(SingleAsset, Some(RealTime), "single_assets_real_time"),
    rest(Nav, Some(RealTime), "nav_real_time"),
    rest(MultiAsset, Some(Hourly), "multi_assets_hourly"),
    rest(SingleAsset, Some(Hourly), "single_assets_hourly"),
    rest(Nav, Some(Hourly), "nav_hourly"),
    rest(MultiAsset, Some(Daily), "multi_assets_daily"),
    rest(SingleAsset, Some(Daily), "single_assets_daily"),
    rest(StakingYield, Some(Daily), "staking_yields_daily"),
    rest(Nav, Some(Daily), "nav_daily"),
    rest(MultiAsset, None, "active_multi_assets"),
    rest(SingleAsset, None, "active_single_assets"),
    rest(StakingYield, None, "active_staking_yields"),
    rest(Nav, None, "active_nav"),
];

/// Streaming path segment per category. Staking yields have no stream.
static WS_ENDPOINTS: [(AssetCategory, &str); 3] = [
    (MultiAsset, "multiassets"),
    (SingleAsset, "singleassets"),
    (Nav, "nav"),
];

/// Static path lookup. `frequency = None` selects the category's active endpoint.
pub fn endpoint_path(category: AssetCategory, frequency: Option<Frequency>) -> Option<&'static str> {
    REST_ENDPOINTS
        .iter()
        .find(|d| d.category == category && d.frequency == frequency)
        .map(|d| d.path)
}

/// Frequencies offered for a category, in table order.
pub fn offered_frequencies(category: AssetCategory) -> Vec<Frequency> {
    REST_ENDPOINTS
        .iter()
        .filter(|d| d.category == category)
        .filter_map(|d| d.frequency)
        .collect()
}

/// WebSocket path segment for a category, if it streams.
pub fn ws_segment(category: AssetCategory) -> Option<&'static str> {
    WS_ENDPOINTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, seg)| *seg)
}

/// Resolves logical requests to absolute URLs against a REST and a WebSocket base.
#[derive(Debug, Clone)]
pub struct Catalog {
    api_base: Url,
    ws_base: Url,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default api base"),
            ws_base: Url::parse(DEFAULT_WS_BASE).expect("default ws base"),
        }
    }
}

impl Catalog {
    /// Builds a catalog over custom bases (e.g. a mock server).
    pub fn new(api_base: Url, ws_base: Url) -> Result<Self, VinterError> {
        for base in [&api_base, &ws_base] {
            if base.cannot_be_a_base() {
                return Err(VinterError::InvalidArgument(format!(
                    "{base} cannot be used as a base URL"
                )));
            }
        }
        Ok(Self { api_base, ws_base })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn ws_base(&self) -> &Url {
        &self.ws_base
    }

    /// URL of the snapshot ("active") endpoint for a category. Never carries a frequency.
    pub fn resolve_active(&self, category: AssetCategory) -> Result<Url, VinterError> {
        let path = endpoint_path(category, None).ok_or_else(|| {
            VinterError::InvalidArgument(format!(
                "no active endpoint for asset type {category}; the asset type must be in {}",
                AssetCategory::allowed()
            ))
        })?;
        join(&self.api_base, &[path])
    }

    /// URL of the time-series endpoint for a category at a frequency.
    pub fn resolve(
        &self,
        category: AssetCategory,
        frequency: Frequency,
    ) -> Result<Url, VinterError> {
        let path = endpoint_path(category, Some(frequency)).ok_or_else(|| {
            let offered: Vec<&str> = offered_frequencies(category)
                .into_iter()
                .map(Frequency::suffix)
                .collect();
            VinterError::InvalidArgument(format!(
                "no endpoint for asset type {category} at frequency {frequency}; offered frequencies: {offered:?}"
            ))
        })?;
        join(&self.api_base, &[path])
    }

    /// Derives the frequency from the symbol's suffix, then delegates to [`Catalog::resolve`].
    pub fn resolve_by_symbol(
        &self,
        category: AssetCategory,
        symbol: &str,
    ) -> Result<Url, VinterError> {
        let (_, frequency) = validate_symbol_and_extract_frequency(symbol)?;
        self.resolve(category, frequency)
    }

    /// Streaming URL for a symbol, without the credential.
    pub fn resolve_ws(&self, category: AssetCategory, symbol: &str) -> Result<Url, VinterError> {
        let (symbol, _) = validate_symbol_and_extract_frequency(symbol)?;
        let segment = ws_segment(category).ok_or_else(|| {
            let allowed: Vec<&str> = WS_ENDPOINTS.iter().map(|(c, _)| c.as_str()).collect();
            VinterError::InvalidArgument(format!(
                "asset type {category} has no stream; the asset type must be in {allowed:?}"
            ))
        })?;
        join(&self.ws_base, &[segment, symbol])
    }
}

fn join(base: &Url, segments: &[&str]) -> Result<Url, VinterError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| VinterError::InvalidArgument(format!("{base} cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
