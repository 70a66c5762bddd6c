//! Verified-creator growth per channel category.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::settings::{endpoint, BraveConfig};
use crate::adapter::outbound::http::HttpClient;
use crate::domain::{Channel, CreatorGrowth, GrowthRecord};
use crate::error::{ProviderError, Result};
use crate::port::outbound::CreatorStatsSource;

const PROVIDER: &str = "creator-stats";

#[derive(Debug, Deserialize)]
struct DailySummary {
    record_date: String,
    total: u64,
}

/// Reads daily creator totals for each tracked channel.
pub struct CreatorClient {
    http: HttpClient,
    config: BraveConfig,
}

impl CreatorClient {
    #[must_use]
    pub fn new(http: HttpClient, config: BraveConfig) -> Self {
        Self { http, config }
    }

    async fn channel(&self, channel: Channel) -> Result<Vec<GrowthRecord>> {
        let url = endpoint(
            &self.config.creators_url,
            &format!("/api/v2/creator_stats/daily_summary/{}", channel.key()),
        );
        let records: Vec<DailySummary> = self.http.json(PROVIDER, self.http.get(&url)).await?;

        if records.is_empty() {
            return Err(ProviderError::EmptySeries {
                provider: PROVIDER,
                series: channel.key().to_string(),
            }
            .into());
        }

        debug!(channel = %channel, count = records.len(), "Retrieved creator totals");
        Ok(records
            .into_iter()
            .map(|r| GrowthRecord {
                date: r.record_date,
                total: r.total,
            })
            .collect())
    }
}

#[async_trait]
impl CreatorStatsSource for CreatorClient {
    async fn fetch_creator_growth(&self) -> Result<CreatorGrowth> {
        let mut growth = CreatorGrowth::new();
        for channel in Channel::ALL {
            growth.fold(channel, self.channel(channel).await?);
        }
        Ok(growth)
    }
}
