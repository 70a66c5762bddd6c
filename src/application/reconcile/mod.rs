//! Pure section-merge functions.
//!
//! Each function takes the snapshot by value together with one section's
//! fresh data and returns the updated snapshot. None of them perform I/O,
//! which keeps every section independently testable.

pub mod metrics;
pub mod token;
pub mod transactions;
pub mod users;
pub mod wallets;

pub use metrics::merge_metrics;
pub use token::merge_token;
pub use transactions::{merge_transactions, FetchPlan, TransactionSummary};
pub use users::{merge_users, UserStatsPolicy};
pub use wallets::merge_wallets;

use crate::domain::{RegionCampaign, Snapshot};

/// Replace the campaign section wholesale; it carries no history.
#[must_use]
pub fn merge_campaigns(mut snapshot: Snapshot, campaigns: Vec<RegionCampaign>) -> Snapshot {
    snapshot.brave_ads = campaigns;
    snapshot
}

/// Stamp the snapshot's creation time. Always the last step of a run.
#[must_use]
pub fn stamp(mut snapshot: Snapshot, now_ms: i64) -> Snapshot {
    snapshot.updated = now_ms;
    snapshot
}
