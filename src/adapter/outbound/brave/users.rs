//! Active-user series.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use super::bearer;
use crate::adapter::outbound::http::HttpClient;
use crate::domain::UserStatsPoint;
use crate::error::{ConfigError, Result};
use crate::port::outbound::UserStatsSource;

const PROVIDER: &str = "user-stats";

/// Raw figures for one date. Other fields in the payload are ignored.
#[derive(Debug, Deserialize)]
struct RawUserStats {
    #[serde(default)]
    browser_mau_adjusted: f64,
    #[serde(default)]
    browser_dau_monthly_avg: f64,
}

/// Reads `{ "<date>": { browser_mau_adjusted, browser_dau_monthly_avg } }`
/// from a deployment-configured URL.
pub struct UserStatsClient {
    http: HttpClient,
    url: Option<String>,
    credential: Option<String>,
}

impl UserStatsClient {
    #[must_use]
    pub fn new(http: HttpClient, url: Option<String>, credential: Option<String>) -> Self {
        Self {
            http,
            url,
            credential,
        }
    }
}

#[async_trait]
impl UserStatsSource for UserStatsClient {
    async fn fetch_user_stats(&self) -> Result<Vec<UserStatsPoint>> {
        let Some(url) = self.url.as_deref() else {
            return Err(ConfigError::MissingCredential {
                provider: PROVIDER,
                variable: "USER_STATS_URL",
            }
            .into());
        };

        let request = bearer(self.http.get(url), self.credential.as_deref());
        let raw: IndexMap<String, RawUserStats> = self.http.json(PROVIDER, request).await?;
        debug!(count = raw.len(), "Retrieved active users");

        Ok(raw
            .into_iter()
            .map(|(date, stats)| UserStatsPoint {
                date,
                mau: stats.browser_mau_adjusted,
                dau: stats.browser_dau_monthly_avg,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn maps_provider_fields() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users")
                    .header("authorization", "Bearer token");
                then.status(200).json_body(json!({
                    "2025-02-01": {"browser_mau_adjusted": 82_345_678.0, "browser_dau_monthly_avg": 31_000_000, "ios": 1},
                    "2025-01-01": {"browser_mau_adjusted": 0, "browser_dau_monthly_avg": 1000}
                }));
            })
            .await;

        let client = UserStatsClient::new(
            HttpClient::default(),
            Some(server.url("/users")),
            Some("token".into()),
        );
        let points = client.fetch_user_stats().await.unwrap();

        mock.assert_async().await;
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "2025-02-01");
        assert_eq!(points[0].mau, 82_345_678.0);
        assert_eq!(points[0].dau, 31_000_000.0);
        assert_eq!(points[1].mau, 0.0);
    }

    #[tokio::test]
    async fn unconfigured_url_is_reported() {
        let client = UserStatsClient::new(HttpClient::default(), None, None);

        assert!(matches!(
            client.fetch_user_stats().await,
            Err(Error::Config(ConfigError::MissingCredential {
                variable: "USER_STATS_URL",
                ..
            }))
        ));
    }
}
