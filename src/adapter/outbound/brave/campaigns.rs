//! Active ad campaigns per region, named via the region code table.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::bearer;
use super::settings::{endpoint, BraveConfig};
use crate::adapter::outbound::http::HttpClient;
use crate::domain::RegionCampaign;
use crate::error::Result;
use crate::port::outbound::CampaignSource;

const PROVIDER: &str = "ads";

#[derive(Debug, Deserialize)]
struct CampaignSummary {
    country: String,
    count: CampaignCount,
}

/// The summary has reported counts both as strings and as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CampaignCount {
    Text(String),
    Number(u64),
}

impl CampaignCount {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoCode {
    code: String,
    name: String,
}

/// Reads the campaign summary and attaches region names.
pub struct CampaignClient {
    http: HttpClient,
    config: BraveConfig,
    credential: Option<String>,
}

impl CampaignClient {
    #[must_use]
    pub fn new(http: HttpClient, config: BraveConfig, credential: Option<String>) -> Self {
        Self {
            http,
            config,
            credential,
        }
    }

    async fn summary(&self) -> Result<Vec<CampaignSummary>> {
        let url = endpoint(&self.config.ads_url, "/v1/stat/campaign/summary");
        let request = bearer(self.http.get(&url), self.credential.as_deref());
        self.http.json(PROVIDER, request).await
    }

    async fn regions(&self) -> Result<HashMap<String, String>> {
        let url = endpoint(&self.config.ads_static_url, "/v1/geoCode");
        let codes: Vec<GeoCode> = self.http.json(PROVIDER, self.http.get(&url)).await?;
        Ok(codes.into_iter().map(|c| (c.code, c.name)).collect())
    }
}

#[async_trait]
impl CampaignSource for CampaignClient {
    async fn fetch_campaigns(&self) -> Result<Vec<RegionCampaign>> {
        let (summary, regions) = tokio::join!(self.summary(), self.regions());
        let (summary, regions) = (summary?, regions?);
        debug!(regions = summary.len(), known = regions.len(), "Retrieved active campaigns");

        Ok(summary
            .into_iter()
            .map(|entry| RegionCampaign {
                name: regions.get(&entry.country).cloned(),
                country: entry.country,
                count: entry.count.into_string(),
            })
            .collect())
    }
}
