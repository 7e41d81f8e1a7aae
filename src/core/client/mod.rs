//! Public client surface + builder.
//! Defaults live in `constants`; the async [`Client`] is defined here and its operations in
//! [`crate::api`]. The blocking client in [`crate::blocking`] is built from the same builder.

pub(crate) mod constants;

use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::api::plan::RequestPlan;
use crate::core::catalog::Catalog;
use crate::core::models::{ApiKey, AssetCategory, Record};
use crate::core::validate::{validate_category, validate_credential};
use crate::core::{VinterError, net};
use constants::{DEFAULT_SERVICE_TYPE, DEFAULT_TIMEOUT};

const SERVICE_TYPE: HeaderName = HeaderName::from_static("service-type");

/// Asynchronous client for the REST API.
///
/// Holds an immutable credential, an immutable asset type and one reusable HTTP transport.
/// Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: ApiKey,
    asset_type: AssetCategory,
    catalog: Catalog,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &self.api_key)
            .field("asset_type", &self.asset_type)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Shorthand for `Client::builder().api_key(..).asset_type(..).build()`.
    pub fn new(api_key: impl Into<String>, asset_type: impl AsRef<str>) -> Result<Self, VinterError> {
        Self::builder().api_key(api_key).asset_type(asset_type).build()
    }

    pub fn asset_type(&self) -> AssetCategory {
        self.asset_type
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Issue one GET for a prepared plan and unwrap the response's `data` array.
    pub(crate) async fn fetch(&self, plan: &RequestPlan) -> Result<Vec<Record>, VinterError> {
        let resp = self
            .http
            .get(plan.url.clone())
            .query(&plan.query)
            .send()
            .await?;
        net::handle_response(resp).await
    }
}

/* ----------------------- Builder ----------------------- */

/// Validated builder output shared by the async and blocking clients.
pub(crate) struct Parts {
    pub(crate) api_key: ApiKey,
    pub(crate) asset_type: AssetCategory,
    pub(crate) catalog: Catalog,
    pub(crate) headers: HeaderMap,
    pub(crate) timeout: Duration,
    pub(crate) connect_timeout: Option<Duration>,
}

#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    asset_type: Option<String>,
    api_base: Option<Url>,
    ws_base: Option<Url>,
    service_type: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("asset_type", &self.asset_type)
            .field("api_base", &self.api_base)
            .field("ws_base", &self.ws_base)
            .field("service_type", &self.service_type)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl ClientBuilder {
    /// Set the API key sent as the `Authorization` header.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the asset type, either as an [`AssetCategory`] or its wire name (`"multi_assets"`, ...).
    pub fn asset_type(mut self, asset_type: impl AsRef<str>) -> Self {
        self.asset_type = Some(asset_type.as_ref().to_string());
        self
    }

    /// Override the REST base (e.g., `https://www.vinterapi.com/api/v3`).
    pub fn api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Override the WebSocket base (e.g., `wss://www.vinterapi.com/ws`).
    pub fn ws_base(mut self, url: Url) -> Self {
        self.ws_base = Some(url);
        self
    }

    /// Override the `Service-Type` header. Default: `vintersdk`.
    pub fn service_type(mut self, value: impl Into<String>) -> Self {
        self.service_type = Some(value.into());
        self
    }

    /// Set the overall request timeout. Default: 10s.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the asynchronous client.
    pub fn build(self) -> Result<Client, VinterError> {
        let parts = self.into_parts()?;

        let mut httpb = reqwest::Client::builder()
            .default_headers(parts.headers)
            .timeout(parts.timeout);
        if let Some(ct) = parts.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(Client {
            http: httpb.build()?,
            api_key: parts.api_key,
            asset_type: parts.asset_type,
            catalog: parts.catalog,
        })
    }

    /// Build the blocking client. Must not be called from within an async runtime.
    pub fn build_blocking(self) -> Result<crate::blocking::Client, VinterError> {
        crate::blocking::Client::from_parts(self.into_parts()?)
    }

    /// Validate everything, credential first, then asset type.
    pub(crate) fn into_parts(self) -> Result<Parts, VinterError> {
        let api_key = validate_credential(self.api_key.as_deref())?;
        let asset_type = validate_category(self.asset_type.as_deref().ok_or_else(|| {
            VinterError::InvalidArgument(format!(
                "The asset type must be provided, one of {}",
                AssetCategory::allowed()
            ))
        })?)?;

        let catalog = match (self.api_base, self.ws_base) {
            (None, None) => Catalog::default(),
            (api, ws) => {
                let defaults = Catalog::default();
                Catalog::new(
                    api.unwrap_or_else(|| defaults.api_base().clone()),
                    ws.unwrap_or_else(|| defaults.ws_base().clone()),
                )?
            }
        };

        let headers = request_headers(
            &api_key,
            self.service_type.as_deref().unwrap_or(DEFAULT_SERVICE_TYPE),
        )?;

        Ok(Parts {
            api_key,
            asset_type,
            catalog,
            headers,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout,
        })
    }
}

/// Fixed headers sent with every request: `Authorization: <key>` and `Service-Type: <client-id>`.
fn request_headers(api_key: &ApiKey, service_type: &str) -> Result<HeaderMap, VinterError> {
    let mut auth = HeaderValue::from_str(api_key.expose()).map_err(|_| {
        VinterError::InvalidArgument("The api key contains characters not allowed in a header.".into())
    })?;
    auth.set_sensitive(true);
    let service = HeaderValue::from_str(service_type).map_err(|_| {
        VinterError::InvalidArgument(format!("invalid Service-Type header value {service_type:?}"))
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(SERVICE_TYPE, service);
    Ok(headers)
}
