//! Token market section replacement.

use indexmap::IndexMap;

use crate::domain::{Snapshot, TokenMarket, TokenSnapshot};

/// Replace the token section wholesale with the latest market figures.
#[must_use]
pub fn merge_token(mut snapshot: Snapshot, market: TokenMarket) -> Snapshot {
    let history: IndexMap<i64, f64> = market
        .history
        .iter()
        .map(|day| (day.time, day.close))
        .collect();

    snapshot.bat = TokenSnapshot {
        price: market.price,
        holders: market.holders,
        marketcap: market.market_cap,
        transfers: market.transfers,
        history,
    };
    snapshot
}
