//! Gemini adapter.
//!
//! Purchases are read from the signed order-history endpoint, advancing a
//! millisecond watermark page by page until an empty page comes back.

pub mod auth;
pub mod client;
pub mod dto;
pub mod history;
pub mod settings;

pub use auth::GeminiCredentials;
pub use client::GeminiClient;
pub use settings::GeminiConfig;

/// Provider name used in logs and errors.
pub const PROVIDER: &str = "gemini";
