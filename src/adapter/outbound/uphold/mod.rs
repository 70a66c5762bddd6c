//! Uphold adapter.
//!
//! Uphold offers no time-range query for reserve transactions, so the set of
//! purchases is driven by a curated identifier list and each id is looked up
//! individually.

pub mod client;
pub mod identifiers;
pub mod settings;

pub use client::UpholdClient;
pub use identifiers::parse_identifiers;
pub use settings::UpholdConfig;

/// Provider name used in logs and errors.
pub const PROVIDER: &str = "uphold";
