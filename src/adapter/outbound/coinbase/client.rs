//! Coinbase order history client.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::form_urlencoded;

use super::auth::{self, CoinbaseCredentials};
use super::dto::{CoinbaseOrder, ServerTime};
use super::settings::CoinbaseConfig;
use super::PROVIDER;
use crate::adapter::outbound::http::{self, HttpClient};
use crate::adapter::outbound::paging;
use crate::domain::order::{parse_amount, parse_timestamp_ms};
use crate::domain::{Exchange, OrderSet, Page, TransactionOrder, Watermark};
use crate::error::Result;
use crate::port::outbound::OrderSource;

/// Response header carrying the cursor for the next (older) page.
const CURSOR_HEADER: &str = "cb-after";

/// Reads settled BAT purchases from Coinbase.
pub struct CoinbaseClient {
    http: HttpClient,
    config: CoinbaseConfig,
    credentials: CoinbaseCredentials,
}

impl CoinbaseClient {
    #[must_use]
    pub fn new(http: HttpClient, config: CoinbaseConfig, credentials: CoinbaseCredentials) -> Self {
        Self {
            http,
            config,
            credentials,
        }
    }

    /// Current exchange time in whole seconds, used as the request timestamp.
    async fn server_time(&self) -> Result<i64> {
        let time: ServerTime = self
            .http
            .json(PROVIDER, self.http.get(&self.config.time_url))
            .await?;
        Ok(time.data.epoch.trunc() as i64)
    }

    fn request_path(&self, after: Option<&str>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("status", "done")
            .append_pair("product_id", &self.config.product_id)
            .append_pair("limit", &self.config.page_limit.to_string());
        if let Some(after) = after {
            query.append_pair("after", after);
        }
        format!("/orders?{}", query.finish())
    }

    async fn fetch_page(&self, after: Option<String>) -> Result<Page<CoinbaseOrder>> {
        let timestamp = self.server_time().await?;
        let path = self.request_path(after.as_deref());
        let signature = auth::sign(&self.credentials.secret, timestamp, "GET", &path, "")?;

        debug!(path = %path, "Requesting Coinbase orders");
        let request = self
            .http
            .get(&format!("{}{path}", self.config.api_url.trim_end_matches('/')))
            .header("CB-ACCESS-KEY", &self.credentials.key)
            .header("CB-ACCESS-PASSPHRASE", &self.credentials.passphrase)
            .header("CB-ACCESS-TIMESTAMP", timestamp.to_string())
            .header("CB-ACCESS-SIGN", signature)
            .header("Content-Type", "application/json");

        let response = self.http.send(PROVIDER, request).await?;
        let next = response
            .headers()
            .get(CURSOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let orders: Vec<CoinbaseOrder> =
            http::decode(PROVIDER, &response.text().await?)?;
        debug!(count = orders.len(), "Coinbase returned orders");

        // An empty page ends the history even if a cursor is still offered.
        let next = if orders.is_empty() { None } else { next };
        Ok(Page::new(orders, next))
    }

    /// Convert a raw order into a purchase if it is a settled buy after `since`.
    fn accept(&self, order: &CoinbaseOrder, since: i64) -> Option<(String, TransactionOrder)> {
        if !order.settled
            || order.side != "buy"
            || order.status != "done"
            || order.product_id != self.config.product_id
        {
            return None;
        }

        let done_at = order.done_at.as_deref()?;
        let date = match parse_timestamp_ms(done_at) {
            Ok(date) => date,
            Err(err) => {
                warn!(id = %order.id, error = %err, "Skipping order with unreadable completion time");
                return None;
            }
        };
        if date <= since {
            return None;
        }

        match parse_amount(&order.filled_size) {
            Ok(amount) => Some((
                order.key().to_string(),
                TransactionOrder::new(Exchange::Coinbase, date, amount),
            )),
            Err(err) => {
                warn!(id = %order.id, error = %err, "Skipping order with unreadable size");
                None
            }
        }
    }
}

#[async_trait]
impl OrderSource for CoinbaseClient {
    fn exchange(&self) -> Exchange {
        Exchange::Coinbase
    }

    async fn fetch_orders(&self, watermark: &Watermark) -> Result<OrderSet> {
        let since = watermark.since();
        let raw = paging::drain(PROVIDER, |cursor| self.fetch_page(cursor)).await?;

        let orders: OrderSet = raw
            .iter()
            .filter_map(|order| self.accept(order, since))
            .collect();

        info!(received = raw.len(), accepted = orders.len(), "Coinbase orders filtered");
        Ok(orders)
    }
}
