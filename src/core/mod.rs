//! Core components of the `vinter-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The async [`Client`] and its builder.
//! - The primary [`VinterError`] type.
//! - The endpoint [`Catalog`] and the input validators.
//! - Shared data models like [`AssetCategory`] and [`Frequency`].

/// Endpoint catalog mapping asset type and frequency onto URLs.
pub mod catalog;
/// The async client (`Client`) and its builder.
pub mod client;
/// The primary error type (`VinterError`) for the crate.
pub mod error;
/// Asset types, frequencies and records.
pub mod models;
/// Argument validation run before any network call.
pub mod validate;

pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::Client`
pub use catalog::Catalog;
pub use client::{Client, ClientBuilder};
pub use error::{ErrorKind, ErrorPayload, VinterError};
pub use models::{ApiKey, AssetCategory, Frequency, Record};
