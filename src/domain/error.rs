//! Domain validation errors.
//!
//! Raised when an upstream value cannot be turned into one of the
//! normalized record shapes.

use thiserror::Error;

/// Errors that occur when a value violates a domain rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An amount was not a valid decimal number.
    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// The raw value that failed to parse.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A timestamp was not a valid RFC 3339 date-time.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The raw value that failed to parse.
        value: String,
        /// Why parsing failed.
        reason: String,
    },
}
