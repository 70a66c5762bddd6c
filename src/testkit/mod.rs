//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for orders, user-stat points and growth records.
//! - [`sources`] - In-memory implementations of every fetch port.
//! - [`store`] - In-memory snapshot reader and sinks.

pub mod domain;
pub mod sources;
pub mod store;
