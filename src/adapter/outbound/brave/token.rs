//! Token market figures: block explorer summary plus daily price history.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::settings::{endpoint, BraveConfig};
use crate::adapter::outbound::http::HttpClient;
use crate::domain::{DailyClose, TokenMarket};
use crate::error::{ProviderError, Result};
use crate::port::outbound::TokenSource;

const EXPLORER: &str = "ethplorer";
const PRICES: &str = "cryptocompare";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfo {
    price: ExplorerPrice,
    #[serde(default)]
    holders_count: u64,
    #[serde(default)]
    transfers_count: u64,
}

/// The explorer reports `"price": false` for tokens it has no quote for.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExplorerPrice {
    Quote {
        rate: f64,
        #[serde(rename = "marketCapUsd", default)]
        market_cap_usd: f64,
    },
    Unavailable(serde::de::IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HistoryResponse {
    response: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<HistoryData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HistoryData {
    #[serde(default)]
    data: Vec<DailyClose>,
}

/// Fetches explorer and price-history data concurrently.
pub struct TokenClient {
    http: HttpClient,
    config: BraveConfig,
}

impl TokenClient {
    #[must_use]
    pub fn new(http: HttpClient, config: BraveConfig) -> Self {
        Self { http, config }
    }

    async fn info(&self) -> Result<TokenInfo> {
        let url = endpoint(
            &self.config.ethplorer_url,
            &format!("/getTokenInfo/{}", self.config.token_address),
        );
        let request = self
            .http
            .get(&url)
            .query(&[("apiKey", self.config.ethplorer_key.as_str())]);
        self.http.json(EXPLORER, request).await
    }

    async fn history(&self) -> Result<Vec<DailyClose>> {
        let url = endpoint(&self.config.cryptocompare_url, "/data/v2/histoday");
        let limit = self.config.history_limit.to_string();
        let request = self
            .http
            .post(&url)
            .query(&[("fsym", "BAT"), ("tsym", "USD"), ("limit", limit.as_str())]);

        let response: HistoryResponse = self.http.json(PRICES, request).await?;
        if response.response != "Success" {
            return Err(ProviderError::Decode {
                provider: PRICES,
                reason: format!("{}: {}", response.response, response.message),
            }
            .into());
        }

        Ok(response.data.map(|d| d.data).unwrap_or_default())
    }
}

#[async_trait]
impl TokenSource for TokenClient {
    async fn fetch_token_market(&self) -> Result<TokenMarket> {
        let (info, history) = tokio::join!(self.info(), self.history());
        let (info, history) = (info?, history?);

        let (price, market_cap) = match info.price {
            ExplorerPrice::Quote {
                rate,
                market_cap_usd,
            } => (rate, market_cap_usd),
            ExplorerPrice::Unavailable(_) => {
                return Err(ProviderError::Decode {
                    provider: EXPLORER,
                    reason: "no price quote available".into(),
                }
                .into())
            }
        };

        debug!(price, days = history.len(), "Retrieved token market");
        Ok(TokenMarket {
            price,
            holders: info.holders_count,
            market_cap,
            transfers: info.transfers_count,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> TokenClient {
        TokenClient::new(
            HttpClient::default(),
            BraveConfig {
                ethplorer_url: server.base_url(),
                cryptocompare_url: server.base_url(),
                ..BraveConfig::default()
            },
        )
    }

    async fn mock_history(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/data/v2/histoday")
                    .query_param("fsym", "BAT")
                    .query_param("limit", "2000");
                then.status(200).json_body(json!({
                    "Response": "Success",
                    "Message": "",
                    "Data": {"Data": [
                        {"time": 1_700_006_400, "close": 0.21, "high": 0.22},
                        {"time": 1_700_092_800, "close": 0.23, "high": 0.24}
                    ]}
                }));
            })
            .await;
    }

    #[tokio::test]
    async fn combines_explorer_and_history() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/getTokenInfo/0x0d8775f648430679a709e98d2b0cb6250d2887ef")
                    .query_param("apiKey", "freekey");
                then.status(200).json_body(json!({
                    "price": {"rate": 0.23, "marketCapUsd": 340_000_000.0, "currency": "USD"},
                    "holdersCount": 330_000,
                    "transfersCount": 3_000_000
                }));
            })
            .await;
        mock_history(&server).await;

        let market = client(&server).fetch_token_market().await.unwrap();

        assert_eq!(market.price, 0.23);
        assert_eq!(market.market_cap, 340_000_000.0);
        assert_eq!(market.holders, 330_000);
        assert_eq!(market.transfers, 3_000_000);
        assert_eq!(
            market.history,
            vec![
                DailyClose { time: 1_700_006_400, close: 0.21 },
                DailyClose { time: 1_700_092_800, close: 0.23 },
            ]
        );
    }

    #[tokio::test]
    async fn missing_quote_fails_the_section() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/getTokenInfo/");
                then.status(200)
                    .json_body(json!({"price": false, "holdersCount": 1, "transfersCount": 1}));
            })
            .await;
        mock_history(&server).await;

        assert!(matches!(
            client(&server).fetch_token_market().await,
            Err(Error::Provider(ProviderError::Decode { provider: "ethplorer", .. }))
        ));
    }

    #[tokio::test]
    async fn history_error_response_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/getTokenInfo/");
                then.status(200)
                    .json_body(json!({"price": {"rate": 1.0, "marketCapUsd": 1.0}}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/data/v2/histoday");
                then.status(200)
                    .json_body(json!({"Response": "Error", "Message": "rate limit"}));
            })
            .await;

        assert!(matches!(
            client(&server).fetch_token_market().await,
            Err(Error::Provider(ProviderError::Decode { provider: "cryptocompare", .. }))
        ));
    }
}
