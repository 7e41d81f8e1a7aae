//! vinter-rs: client for the Vinter index-data API.
//!
//! REST access comes in two flavours with the same operation set: the async [`Client`]
//! and the synchronous [`blocking::Client`]. Streaming goes through [`WsSession`].
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), vinter_rs::VinterError> {
//! let client = vinter_rs::Client::new("my-api-key", vinter_rs::AssetCategory::MultiAsset)?;
//! let value = client.latest_value("vnt-10-usd-p-d").await?;
//! println!("{value}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod blocking;
pub mod config;
pub mod core;
pub mod stream;

pub use api::filter_by_symbol;
pub use crate::core::{
    ApiKey, AssetCategory, Catalog, Client, ClientBuilder, ErrorKind, ErrorPayload, Frequency,
    Record, VinterError,
};
pub use stream::{CloseHandle, CloseInfo, SessionState, StreamHandler, WsSession, WsSessionBuilder};
