//! Active-user section merge.

use serde::Deserialize;
use tracing::debug;

use crate::domain::rounding::{round_to_nearest, USER_STATS_GRANULARITY};
use crate::domain::stats::month_key;
use crate::domain::{Snapshot, UserStats, UserStatsPoint};

/// Rules for accepting active-user observations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserStatsPolicy {
    /// First month (`YYYY-MM`) for which zero figures are accepted.
    ///
    /// Before this month the provider backfilled missing data with zeros;
    /// from it onwards a zero may be a genuine late-breaking value.
    #[serde(default = "default_cutover_month")]
    pub cutover_month: String,
}

fn default_cutover_month() -> String {
    "2025-01".to_string()
}

impl Default for UserStatsPolicy {
    fn default() -> Self {
        Self {
            cutover_month: default_cutover_month(),
        }
    }
}

impl UserStatsPolicy {
    /// Whether rounded figures stored under `key` should be merged.
    #[must_use]
    pub fn accepts(&self, key: &str, stats: &UserStats) -> bool {
        !(stats.has_zero() && key < self.cutover_month.as_str())
    }
}

/// Upsert `incoming` observations into the users section.
///
/// Day keys are collapsed to their month and figures are rounded to the
/// nearest 100,000 before the cutover policy is applied, so a figure that
/// rounds to zero counts as zero. The section is re-sorted newest first.
#[must_use]
pub fn merge_users(
    mut snapshot: Snapshot,
    incoming: &[UserStatsPoint],
    policy: &UserStatsPolicy,
) -> Snapshot {
    for point in incoming {
        let key = month_key(&point.date);
        let stats = UserStats {
            mau: round_to_nearest(point.mau, USER_STATS_GRANULARITY),
            dau: round_to_nearest(point.dau, USER_STATS_GRANULARITY),
        };
        if !policy.accepts(key, &stats) {
            debug!(date = %point.date, "Skipping zero-valued backfill entry");
            continue;
        }

        snapshot.users.insert(key.to_string(), stats);
    }

    snapshot.users.sort_by(|a, _, b, _| b.cmp(a));
    snapshot
}
