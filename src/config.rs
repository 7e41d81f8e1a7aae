//! Bootstrap helpers that read defaults from the process environment.
//!
//! The core never reads the environment itself; callers opt in here and then apply any
//! explicit settings, which take precedence because they are applied last.

use std::env;

use url::Url;

use crate::core::{ClientBuilder, VinterError};

/// Default credential.
pub const API_KEY_VAR: &str = "VINTER_API_KEY";
/// REST base override.
pub const API_BASE_VAR: &str = "VINTER_API_BASE";
/// WebSocket base override.
pub const WS_BASE_VAR: &str = "VINTER_WS_BASE";

/// A [`ClientBuilder`] seeded from `VINTER_API_KEY`, `VINTER_API_BASE` and `VINTER_WS_BASE`.
///
/// Unset or empty variables are ignored.
///
/// # Errors
///
/// Returns [`VinterError::InvalidArgument`] naming the variable if a base variable is set but
/// is not a URL.
///
/// ```no_run
/// let client = vinter_rs::config::from_env()?
///     .asset_type("multi_assets")
///     .build()?;
/// # Ok::<(), vinter_rs::VinterError>(())
/// ```
pub fn from_env() -> Result<ClientBuilder, VinterError> {
    from_lookup(|name| env::var(name).ok())
}

/// Same as [`from_env`] over an arbitrary variable source.
pub fn from_lookup<F>(lookup: F) -> Result<ClientBuilder, VinterError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

    let mut builder = ClientBuilder::default();
    if let Some(key) = get(API_KEY_VAR) {
        builder = builder.api_key(key);
    }
    if let Some(base) = get(API_BASE_VAR) {
        builder = builder.api_base(parse_base(API_BASE_VAR, &base)?);
    }
    if let Some(base) = get(WS_BASE_VAR) {
        builder = builder.ws_base(parse_base(WS_BASE_VAR, &base)?);
    }
    Ok(builder)
}

fn parse_base(var: &str, value: &str) -> Result<Url, VinterError> {
    Url::parse(value)
        .map_err(|e| VinterError::InvalidArgument(format!("{var} is not a valid URL ({value:?}): {e}")))
}
