//! The persisted transparency document.
//!
//! Every section is an insertion-ordered map so that the presentation order
//! chosen during reconciliation (newest first for users and transactions)
//! survives serialization. Missing sections deserialize to their empty form,
//! which lets a partially populated document be merged into.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::order::OrderSet;
use super::rounding::whole_number;

/// Active-user figures for one month (or day).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Monthly active users.
    #[serde(deserialize_with = "whole_number")]
    pub mau: u64,
    /// Daily active users, monthly average.
    #[serde(deserialize_with = "whole_number")]
    pub dau: u64,
}

impl UserStats {
    /// Whether either figure is zero.
    #[must_use]
    pub const fn has_zero(&self) -> bool {
        self.mau == 0 || self.dau == 0
    }
}

/// Creator growth metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Month → total creators across all categories.
    #[serde(default)]
    pub growth: IndexMap<String, u64>,
    /// Category label → current total.
    #[serde(default)]
    pub categories: IndexMap<String, u64>,
    /// Month → category label → total.
    #[serde(default)]
    pub category_growth: IndexMap<String, IndexMap<String, u64>>,
}

/// Token market snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    /// Price in USD.
    #[serde(default)]
    pub price: f64,
    /// Number of holder addresses.
    #[serde(default)]
    pub holders: u64,
    /// Market capitalization in USD.
    #[serde(default)]
    pub marketcap: f64,
    /// On-chain transfer count.
    #[serde(default, rename = "transactions")]
    pub transfers: u64,
    /// Unix day (seconds) → closing price.
    #[serde(default)]
    pub history: IndexMap<i64, f64>,
}

/// Active ad campaigns in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCampaign {
    /// ISO region code.
    pub country: String,
    /// Number of active campaigns, as reported.
    pub count: String,
    /// Human-readable region name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The full transparency document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Rewards wallets, rounded to the nearest 10,000.
    #[serde(default)]
    pub wallets: u64,
    /// Creation time of this snapshot, epoch milliseconds.
    #[serde(default)]
    pub updated: i64,
    /// Month (or day) → active users, newest first.
    #[serde(default)]
    pub users: IndexMap<String, UserStats>,
    /// Token market figures.
    #[serde(default)]
    pub bat: TokenSnapshot,
    /// Order id → purchase, newest first.
    #[serde(default)]
    pub transactions: OrderSet,
    /// Creator growth metrics.
    #[serde(default)]
    pub metrics: Metrics,
    /// Active campaigns per region.
    #[serde(default)]
    pub brave_ads: Vec<RegionCampaign>,
}

impl Snapshot {
    /// An empty snapshot, used when no previous document is available.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a persisted document.
    ///
    /// # Errors
    ///
    /// Returns the underlying JSON error when the document is malformed.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Serialize to the compact published form.
    ///
    /// # Errors
    ///
    /// Returns the underlying JSON error (only possible for non-finite prices).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
