//! Centralized constants for default endpoints and request defaults.

use std::time::Duration;

/// REST API base (endpoint path is appended).
pub(crate) const DEFAULT_API_BASE: &str = "https://www.vinterapi.com/api/v3";

/// WebSocket base (`<category>/<symbol>` is appended).
pub(crate) const DEFAULT_WS_BASE: &str = "wss://www.vinterapi.com/ws";

/// Value of the `Service-Type` header identifying this client.
pub(crate) const DEFAULT_SERVICE_TYPE: &str = "vintersdk";

/// Overall request timeout applied when the builder does not override it.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `limit` for range queries.
pub(crate) const DEFAULT_RANGE_LIMIT: u32 = 1000;
