//! Watermark-advance loop over the order-history endpoint.

use std::future::Future;

use tracing::debug;

use super::dto::GeminiOrder;
use super::PROVIDER;
use crate::error::{ProviderError, Result};

/// Every order returned by a completed history walk.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    pub orders: Vec<GeminiOrder>,
    /// Watermark the next request would have used: last order time + 1.
    pub next_timestamp: i64,
}

/// Request pages starting at `start` until one comes back empty.
///
/// After each non-empty page the watermark advances to one past the newest
/// order on it. A page that would not move the watermark forward is an
/// error rather than an endless loop.
pub async fn drain_history<F, Fut>(start: i64, mut fetch: F) -> Result<OrderHistory>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<Vec<GeminiOrder>>>,
{
    let mut orders = Vec::new();
    let mut timestamp = start;

    loop {
        let page = fetch(timestamp).await?;
        let Some(newest) = page.iter().map(|order| order.timestampms).max() else {
            debug!(timestamp, "No more Gemini orders");
            return Ok(OrderHistory {
                orders,
                next_timestamp: timestamp,
            });
        };

        let next = newest + 1;
        if next <= timestamp {
            return Err(ProviderError::Pagination {
                provider: PROVIDER,
                reason: format!("watermark did not advance past {timestamp}"),
            }
            .into());
        }

        debug!(count = page.len(), from = timestamp, to = newest, "Retrieved Gemini orders");
        orders.extend(page);
        timestamp = next;
    }
}
