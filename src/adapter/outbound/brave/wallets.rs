//! Rewards wallet count from the payout report.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::bearer;
use super::settings::{endpoint, BraveConfig};
use crate::adapter::outbound::http::HttpClient;
use crate::error::{ProviderError, Result};
use crate::port::outbound::WalletSource;

const PROVIDER: &str = "payouts";

#[derive(Debug, Deserialize)]
struct PayoutRecord {
    date: String,
    total_number_of_wallets: WalletTotal,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WalletTotal {
    Text(String),
    Number(f64),
}

impl WalletTotal {
    /// Whole wallet count; a fractional part is dropped.
    fn count(&self) -> Option<u64> {
        let value = match self {
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
            Self::Number(n) => *n,
        };
        (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
    }
}

/// Reads the payout series and reports its most recent total.
pub struct WalletClient {
    http: HttpClient,
    config: BraveConfig,
    credential: Option<String>,
}

impl WalletClient {
    #[must_use]
    pub fn new(http: HttpClient, config: BraveConfig, credential: Option<String>) -> Self {
        Self {
            http,
            config,
            credential,
        }
    }
}

#[async_trait]
impl WalletSource for WalletClient {
    async fn fetch_wallet_count(&self) -> Result<Option<u64>> {
        let url = endpoint(&self.config.ads_url, "/v1/stat/payout");
        let request = bearer(self.http.get(&url), self.credential.as_deref());
        let mut records: Vec<PayoutRecord> = self.http.json(PROVIDER, request).await?;
        debug!(count = records.len(), "Retrieved payout records");

        records.sort_by(|a, b| a.date.cmp(&b.date));
        let Some(latest) = records.last() else {
            return Ok(None);
        };

        latest.total_number_of_wallets.count().map(Some).ok_or_else(|| {
            ProviderError::Decode {
                provider: PROVIDER,
                reason: format!("unreadable wallet total for {}", latest.date),
            }
            .into()
        })
    }
}
