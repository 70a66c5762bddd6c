//! Normalized purchase records.

use std::str::FromStr;

use chrono::DateTime;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::exchange::Exchange;

/// Purchases keyed by the venue-assigned order or transaction id.
pub type OrderSet = IndexMap<String, TransactionOrder>;

/// A single BAT purchase.
///
/// Field names follow the published snapshot: the amount is stored under
/// `BAT` as a decimal string and the venue under `site`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOrder {
    /// Quantity of BAT purchased, as a decimal string.
    #[serde(rename = "BAT")]
    pub amount: String,
    /// Event time in milliseconds since the Unix epoch.
    pub date: i64,
    /// Venue the purchase was made on.
    #[serde(rename = "site")]
    pub source: Exchange,
}

impl TransactionOrder {
    /// Create an order from a parsed amount.
    #[must_use]
    pub fn new(source: Exchange, date: i64, amount: Decimal) -> Self {
        Self {
            amount: amount.normalize().to_string(),
            date,
            source,
        }
    }

    /// Parse the stored amount back into a decimal.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAmount`] if the stored string is not a
    /// decimal number.
    pub fn amount(&self) -> Result<Decimal, DomainError> {
        parse_amount(&self.amount)
    }
}

/// Parse a decimal amount as reported by a venue.
///
/// Accepts plain (`"12.5"`) and scientific (`"1.2e-3"`) notation.
///
/// # Errors
///
/// Returns [`DomainError::InvalidAmount`] when the value is not numeric.
pub fn parse_amount(value: &str) -> Result<Decimal, DomainError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| DomainError::InvalidAmount {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Parse an RFC 3339 timestamp into epoch milliseconds.
///
/// # Errors
///
/// Returns [`DomainError::InvalidTimestamp`] when the value is malformed.
pub fn parse_timestamp_ms(value: &str) -> Result<i64, DomainError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| DomainError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
