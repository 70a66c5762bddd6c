//! Venue port for purchase history.

use async_trait::async_trait;

use crate::domain::{Exchange, OrderSet, Watermark};
use crate::error::Result;

/// Fetches completed BAT purchases from one venue.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Venue this source reports for.
    fn exchange(&self) -> Exchange;

    /// Fetch every purchase newer than `watermark`, keyed by order id.
    ///
    /// Implementations must drain all pages before returning; a failed page
    /// is an error, never a shortened result.
    async fn fetch_orders(&self, watermark: &Watermark) -> Result<OrderSet>;
}
