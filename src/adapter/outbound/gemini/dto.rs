//! Gemini order-history payloads.

use serde::{Deserialize, Serialize};

/// Signed request body, sent base64-encoded in `X-GEMINI-PAYLOAD`.
#[derive(Debug, Serialize)]
pub struct HistoryRequest<'a> {
    pub request: &'a str,
    pub nonce: i64,
    pub symbol: &'a str,
    /// Only orders at or after this time, epoch milliseconds.
    pub timestamp: i64,
    pub limit_orders: u32,
}

/// One entry of `POST /v1/orders/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiOrder {
    pub order_id: String,
    pub side: String,
    #[serde(default)]
    pub is_cancelled: bool,
    pub timestampms: i64,
    #[serde(default)]
    pub trades: Vec<GeminiFill>,
}

/// A fill executed against an order.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiFill {
    pub amount: String,
    #[serde(default)]
    pub timestampms: i64,
}
