//! Shared HTTP client with timeouts and retry on transient failures.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::warn;

use crate::error::{ProviderError, Result};

/// Longest response body kept in a [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    15_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Thin wrapper over [`reqwest::Client`] shared by every adapter.
///
/// Connection and timeout errors are retried; any other failure, including a
/// non-success status, is returned immediately.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

impl HttpClient {
    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(concat!("transparency/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                Client::new()
            });

        Self {
            http,
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    /// Start a GET request.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url)
    }

    /// Start a POST request.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url)
    }

    /// Send `request`, retrying transient failures, and require a success status.
    pub async fn send(&self, provider: &'static str, request: RequestBuilder) -> Result<Response> {
        let max_attempts = self.retry_max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let Some(pending) = request.try_clone() else {
                return Self::check(provider, request.send().await?).await;
            };

            match pending.send().await {
                Ok(response) => return Self::check(provider, response).await,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(provider, attempt, max_attempts, &err).await;
                }
            }
        }
    }

    /// Send `request` and decode a JSON body.
    pub async fn json<T>(&self, provider: &'static str, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(provider, request).await?;
        decode(provider, &response.text().await?)
    }

    /// Send `request` and return the body as text.
    pub async fn text(&self, provider: &'static str, request: RequestBuilder) -> Result<String> {
        let response = self.send(provider, request).await?;
        Ok(response.text().await?)
    }

    async fn check(provider: &'static str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body,
        }
        .into())
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(
        &self,
        provider: &'static str,
        attempt: u32,
        max_attempts: u32,
        err: &reqwest::Error,
    ) {
        warn!(
            provider,
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

/// Decode a JSON body, attributing failures to `provider`.
pub fn decode<T: DeserializeOwned>(provider: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        ProviderError::Decode {
            provider,
            reason: e.to_string(),
        }
        .into()
    })
}
