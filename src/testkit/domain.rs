//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{
    Channel, CreatorGrowth, DailyClose, Exchange, GrowthRecord, OrderSet, TokenMarket,
    TransactionOrder, UserStatsPoint,
};

/// A purchase of `amount` BAT on `source` at `date`.
pub fn order(source: Exchange, date: i64, amount: i64) -> TransactionOrder {
    TransactionOrder::new(source, date, Decimal::from(amount))
}

/// An order set from `(id, source, date)` triples, each for 10 BAT.
pub fn orders(entries: &[(&str, Exchange, i64)]) -> OrderSet {
    entries
        .iter()
        .map(|(id, source, date)| ((*id).to_string(), order(*source, *date, 10)))
        .collect()
}

/// An unrounded active-user observation.
pub fn user_point(date: &str, mau: f64, dau: f64) -> UserStatsPoint {
    UserStatsPoint {
        date: date.to_string(),
        mau,
        dau,
    }
}

/// Growth where every channel reports `total` on each of `dates`.
pub fn uniform_growth(dates: &[&str], total: u64) -> CreatorGrowth {
    let mut growth = CreatorGrowth::new();
    for channel in Channel::ALL {
        let records = dates
            .iter()
            .map(|date| GrowthRecord {
                date: (*date).to_string(),
                total,
            })
            .collect();
        growth.fold(channel, records);
    }
    growth
}

/// A token market with two days of history.
pub fn token_market(price: f64) -> TokenMarket {
    TokenMarket {
        price,
        holders: 330_000,
        market_cap: price * 1_500_000_000.0,
        transfers: 3_000_000,
        history: vec![
            DailyClose {
                time: 1_700_006_400,
                close: price,
            },
            DailyClose {
                time: 1_700_092_800,
                close: price,
            },
        ],
    }
}
