//! Wallet count section replacement.

use tracing::info;

use crate::domain::rounding::{round_to_nearest, WALLET_GRANULARITY};
use crate::domain::Snapshot;

/// Replace the wallet count with the latest figure, rounded to 10,000.
#[must_use]
pub fn merge_wallets(mut snapshot: Snapshot, latest: u64) -> Snapshot {
    let wallets = round_to_nearest(latest as f64, WALLET_GRANULARITY);

    if snapshot.wallets == 0 {
        info!(wallets, "Setting wallet count");
    } else if snapshot.wallets != wallets {
        info!(from = snapshot.wallets, to = wallets, "Updating wallet count");
    }

    snapshot.wallets = wallets;
    snapshot
}
