//! Normalized auxiliary statistics fetched alongside the purchase history.

use serde::{Deserialize, Serialize};

/// One raw active-user observation, before rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStatsPoint {
    /// Provider date key, `YYYY-MM-DD` or `YYYY-MM`.
    pub date: String,
    /// Monthly active users.
    pub mau: f64,
    /// Daily active users, averaged over the month.
    pub dau: f64,
}

/// Collapse a day key (`YYYY-MM-DD...`) to its month (`YYYY-MM`).
///
/// Keys of any other shape are returned unchanged.
#[must_use]
pub fn month_key(date: &str) -> &str {
    let bytes = date.as_bytes();
    let is_day = bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit);

    if is_day {
        &date[..7]
    } else {
        date
    }
}

/// Whether `month` is shaped `YYYY-MM`.
#[must_use]
pub fn is_month(month: &str) -> bool {
    let bytes = month.as_bytes();
    bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit)
}

/// A daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    /// Start of the day, Unix seconds.
    pub time: i64,
    /// Closing price in USD.
    pub close: f64,
}

/// Token market figures from the block explorer and price-history APIs.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMarket {
    pub price: f64,
    pub holders: u64,
    pub market_cap: f64,
    pub transfers: u64,
    pub history: Vec<DailyClose>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_keys_collapse_to_month() {
        assert_eq!(month_key("2020-05-01"), "2020-05");
        assert_eq!(month_key("2020-05-01T00:00:00Z"), "2020-05");
        assert_eq!(month_key("2020-05"), "2020-05");
        assert_eq!(month_key("latest"), "latest");
    }

    #[test]
    fn month_shape_is_strict() {
        assert!(is_month("2025-01"));
        assert!(!is_month("2025-1"));
        assert!(!is_month("2025-01-01"));
    }
}
