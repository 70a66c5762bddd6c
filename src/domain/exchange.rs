//! Trading venues that report BAT purchases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A venue whose purchase history is folded into the snapshot.
///
/// Serialized with the venue's display name, which is what the published
/// snapshot stores in each transaction's `site` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Exchange {
    /// Reserve transactions listed by identifier.
    Uphold,
    /// Signed, cursor-paginated order history.
    Coinbase,
    /// Order history queried by timestamp.
    Gemini,
}

impl Exchange {
    /// Every venue, in the order a full rebuild queries them.
    pub const ALL: [Self; 3] = [Self::Uphold, Self::Gemini, Self::Coinbase];

    /// Display name, identical to the serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uphold => "Uphold",
            Self::Coinbase => "Coinbase",
            Self::Gemini => "Gemini",
        }
    }

    /// Whether incremental fetches for this venue are keyed by a timestamp.
    ///
    /// Uphold has no time-range query; its change detection relies on the
    /// curated identifier list instead.
    #[must_use]
    pub const fn is_time_ranged(self) -> bool {
        !matches!(self, Self::Uphold)
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_display_name() {
        let json = serde_json::to_string(&Exchange::Coinbase).unwrap();
        assert_eq!(json, "\"Coinbase\"");

        let parsed: Exchange = serde_json::from_str("\"Uphold\"").unwrap();
        assert_eq!(parsed, Exchange::Uphold);
    }

    #[test]
    fn only_uphold_lacks_time_range_queries() {
        assert!(!Exchange::Uphold.is_time_ranged());
        assert!(Exchange::Gemini.is_time_ranged());
        assert!(Exchange::Coinbase.is_time_ranged());
    }
}
