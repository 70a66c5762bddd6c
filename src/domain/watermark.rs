//! Per-venue "already retrieved up to here" markers.

use std::collections::BTreeSet;

use super::exchange::Exchange;
use super::order::OrderSet;

/// Cutoff used to request only purchases newer than the last run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Watermark {
    /// Only records strictly after this epoch-millisecond timestamp.
    Since(i64),
    /// Identifiers already present in the snapshot.
    ///
    /// Used for venues without time-range queries: the number of known ids
    /// is compared against the curated identifier list.
    Known(BTreeSet<String>),
}

impl Watermark {
    /// Watermark requesting everything.
    #[must_use]
    pub const fn full() -> Self {
        Self::Since(0)
    }

    /// Derive the watermark for `exchange` from already-persisted records.
    ///
    /// Time-ranged venues use the latest `date` among their own records
    /// (zero when none exist); identifier-driven venues use the set of ids.
    #[must_use]
    pub fn from_existing(existing: &OrderSet, exchange: Exchange) -> Self {
        let own = existing.iter().filter(|(_, order)| order.source == exchange);

        if exchange.is_time_ranged() {
            Self::Since(own.map(|(_, order)| order.date).max().unwrap_or(0))
        } else {
            Self::Known(own.map(|(id, _)| id.clone()).collect())
        }
    }

    /// Timestamp cutoff, or zero for identifier-based watermarks.
    #[must_use]
    pub fn since(&self) -> i64 {
        match self {
            Self::Since(ts) => *ts,
            Self::Known(_) => 0,
        }
    }

    /// Whether this watermark requests a complete history.
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Since(0))
    }
}

impl std::fmt::Display for Watermark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Since(ts) => write!(f, "since {ts}"),
            Self::Known(ids) => write!(f, "{} known ids", ids.len()),
        }
    }
}
