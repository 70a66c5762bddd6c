//! Coinbase Exchange adapter.
//!
//! Orders are read from the signed `/orders` endpoint, filtered server-side
//! to `status=done` and paginated with the `cb-after` response header.

pub mod auth;
pub mod client;
pub mod dto;
pub mod settings;

pub use auth::CoinbaseCredentials;
pub use client::CoinbaseClient;
pub use settings::CoinbaseConfig;

/// Provider name used in logs and errors.
pub const PROVIDER: &str = "coinbase";
