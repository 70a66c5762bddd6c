//! Coinbase response payloads.

use serde::Deserialize;

/// `GET /v2/time` response.
#[derive(Debug, Deserialize)]
pub struct ServerTime {
    pub data: ServerTimeData,
}

#[derive(Debug, Deserialize)]
pub struct ServerTimeData {
    /// Seconds since the epoch, possibly fractional.
    pub epoch: f64,
}

/// One entry of `GET /orders`. Only the fields the adapter reads.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinbaseOrder {
    pub id: String,
    #[serde(default)]
    pub client_oid: String,
    pub product_id: String,
    pub side: String,
    pub status: String,
    #[serde(default)]
    pub done_at: Option<String>,
    #[serde(default)]
    pub filled_size: String,
    #[serde(default)]
    pub settled: bool,
}

impl CoinbaseOrder {
    /// Key under which the purchase is stored.
    ///
    /// The client order id is preferred; orders placed without one fall
    /// back to the exchange-assigned id.
    #[must_use]
    pub fn key(&self) -> &str {
        if self.client_oid.is_empty() {
            &self.id
        } else {
            &self.client_oid
        }
    }
}
