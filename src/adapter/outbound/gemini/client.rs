//! Gemini order history client.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::auth::{self, GeminiCredentials, Nonce};
use super::dto::{GeminiOrder, HistoryRequest};
use super::history::drain_history;
use super::settings::GeminiConfig;
use super::PROVIDER;
use crate::adapter::outbound::http::HttpClient;
use crate::domain::order::parse_amount;
use crate::domain::{Exchange, OrderSet, TransactionOrder, Watermark};
use crate::error::Result;
use crate::port::outbound::OrderSource;

const HISTORY_PATH: &str = "/v1/orders/history";

/// Reads filled BAT buy orders from Gemini.
pub struct GeminiClient {
    http: HttpClient,
    config: GeminiConfig,
    credentials: GeminiCredentials,
    nonce: Nonce,
}

impl GeminiClient {
    #[must_use]
    pub fn new(http: HttpClient, config: GeminiConfig, credentials: GeminiCredentials) -> Self {
        Self {
            http,
            config,
            credentials,
            nonce: Nonce::new(),
        }
    }

    /// First timestamp to request for `watermark`.
    ///
    /// A full fetch starts just after the configured floor; otherwise just
    /// after the newest order already recorded.
    fn start(&self, watermark: &Watermark) -> i64 {
        let since = match watermark.since() {
            0 => self.config.floor_ms,
            since => since,
        };
        since + 1
    }

    async fn fetch_page(&self, timestamp: i64) -> Result<Vec<GeminiOrder>> {
        let body = HistoryRequest {
            request: HISTORY_PATH,
            nonce: self.nonce.next(),
            symbol: &self.config.symbol,
            timestamp,
            limit_orders: self.config.page_limit,
        };
        let payload = STANDARD.encode(serde_json::to_vec(&body)?);
        let signature = auth::sign(&self.credentials.secret, &payload)?;

        debug!(timestamp, "Requesting Gemini order history");
        let request = self
            .http
            .post(&format!(
                "{}{HISTORY_PATH}",
                self.config.api_url.trim_end_matches('/')
            ))
            .header("Content-Type", "text/plain")
            .header("Cache-Control", "no-cache")
            .header("X-GEMINI-APIKEY", &self.credentials.key)
            .header("X-GEMINI-PAYLOAD", payload)
            .header("X-GEMINI-SIGNATURE", signature);

        self.http.json(PROVIDER, request).await
    }
}

/// Convert a filled, uncancelled buy into a purchase.
///
/// The amount is the sum of the order's fills; the date is the order time.
fn accept(order: &GeminiOrder) -> Option<(String, TransactionOrder)> {
    if order.side != "buy" || order.is_cancelled || order.trades.is_empty() {
        return None;
    }

    let mut amount = Decimal::ZERO;
    for fill in &order.trades {
        match parse_amount(&fill.amount) {
            Ok(value) => amount += value,
            Err(err) => {
                warn!(id = %order.order_id, error = %err, "Skipping order with unreadable fill");
                return None;
            }
        }
    }

    Some((
        order.order_id.clone(),
        TransactionOrder::new(Exchange::Gemini, order.timestampms, amount),
    ))
}

#[async_trait]
impl OrderSource for GeminiClient {
    fn exchange(&self) -> Exchange {
        Exchange::Gemini
    }

    async fn fetch_orders(&self, watermark: &Watermark) -> Result<OrderSet> {
        let start = self.start(watermark);
        let history = drain_history(start, |timestamp| self.fetch_page(timestamp)).await?;

        let orders: OrderSet = history.orders.iter().filter_map(accept).collect();
        info!(
            received = history.orders.len(),
            accepted = orders.len(),
            next_timestamp = history.next_timestamp,
            "Gemini orders filtered"
        );
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ProviderError};
    use httpmock::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> GeminiOrder {
        serde_json::from_value(value).unwrap()
    }

    fn client(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig {
            api_url: server.base_url(),
            ..GeminiConfig::default()
        };
        GeminiClient::new(
            HttpClient::default(),
            config,
            GeminiCredentials {
                key: "key".into(),
                secret: "secret".into(),
            },
        )
    }

    #[test]
    fn filled_buy_sums_its_fills() {
        let order = raw(json!({
            "order_id": "73",
            "side": "buy",
            "is_cancelled": false,
            "timestampms": 1_650_000_000_000_i64,
            "trades": [{"amount": "100.25", "timestampms": 1}, {"amount": "50", "timestampms": 2}]
        }));

        let (id, purchase) = accept(&order).unwrap();
        assert_eq!(id, "73");
        assert_eq!(
            purchase,
            TransactionOrder::new(Exchange::Gemini, 1_650_000_000_000, dec!(150.25))
        );
    }

    #[test]
    fn sells_cancellations_and_unfilled_orders_are_skipped() {
        let sell = raw(json!({"order_id": "1", "side": "sell", "timestampms": 5, "trades": [{"amount": "1"}]}));
        let cancelled = raw(json!({"order_id": "2", "side": "buy", "is_cancelled": true, "timestampms": 5, "trades": [{"amount": "1"}]}));
        let unfilled = raw(json!({"order_id": "3", "side": "buy", "timestampms": 5, "trades": []}));

        assert!(accept(&sell).is_none());
        assert!(accept(&cancelled).is_none());
        assert!(accept(&unfilled).is_none());
    }

    #[test]
    fn full_fetch_starts_after_floor() {
        let server_less = GeminiClient::new(
            HttpClient::default(),
            GeminiConfig::default(),
            GeminiCredentials {
                key: String::new(),
                secret: String::new(),
            },
        );

        assert_eq!(server_less.start(&Watermark::full()), 1_649_111_057_654);
        assert_eq!(server_less.start(&Watermark::Since(2_000)), 2_001);
    }

    #[tokio::test]
    async fn empty_history_yields_no_orders() {
        let server = MockServer::start_async().await;
        let history = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/orders/history")
                    .header("x-gemini-apikey", "key")
                    .header_exists("x-gemini-payload")
                    .header_exists("x-gemini-signature");
                then.status(200).json_body(json!([]));
            })
            .await;

        let orders = client(&server).fetch_orders(&Watermark::full()).await.unwrap();

        history.assert_async().await;
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn rejected_request_is_an_error_not_exhaustion() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/orders/history");
                then.status(400).json_body(json!({"reason": "InvalidNonce"}));
            })
            .await;

        let result = client(&server).fetch_orders(&Watermark::Since(10)).await;

        assert!(matches!(
            result,
            Err(Error::Provider(ProviderError::Status { status: 400, .. }))
        ));
    }
}
