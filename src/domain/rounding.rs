//! Rounding applied before figures are published.

use serde::{Deserialize, Deserializer};

/// Granularity for published active-user figures.
pub const USER_STATS_GRANULARITY: u64 = 100_000;

/// Granularity for the published wallet count.
pub const WALLET_GRANULARITY: u64 = 10_000;

/// Round `value` to the nearest multiple of `nearest`, halves rounding up.
///
/// Negative and non-finite inputs round to zero.
#[must_use]
pub fn round_to_nearest(value: f64, nearest: u64) -> u64 {
    if !value.is_finite() || value <= 0.0 || nearest == 0 {
        return 0;
    }
    let step = nearest as f64;
    ((value / step).round() * step) as u64
}

/// Deserialize a whole number that may have been published as a float.
pub(crate) fn whole_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallets_round_to_nearest_ten_thousand() {
        assert_eq!(round_to_nearest(123_456.0, WALLET_GRANULARITY), 120_000);
        assert_eq!(round_to_nearest(125_000.0, WALLET_GRANULARITY), 130_000);
    }

    #[test]
    fn user_stats_round_to_nearest_hundred_thousand() {
        assert_eq!(round_to_nearest(57_449_999.0, USER_STATS_GRANULARITY), 57_400_000);
        assert_eq!(round_to_nearest(1_000.0, USER_STATS_GRANULARITY), 0);
    }

    #[test]
    fn degenerate_inputs_round_to_zero() {
        assert_eq!(round_to_nearest(-5.0, 10), 0);
        assert_eq!(round_to_nearest(f64::NAN, 10), 0);
    }
}
