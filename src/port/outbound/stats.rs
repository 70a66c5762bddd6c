//! Ports for the auxiliary, non-transactional statistics.

use async_trait::async_trait;

use crate::domain::{CreatorGrowth, RegionCampaign, TokenMarket, UserStatsPoint};
use crate::error::Result;

/// Active-user series.
#[async_trait]
pub trait UserStatsSource: Send + Sync {
    /// Raw (unrounded) observations keyed by provider date.
    async fn fetch_user_stats(&self) -> Result<Vec<UserStatsPoint>>;
}

/// Verified-creator growth per channel category.
#[async_trait]
pub trait CreatorStatsSource: Send + Sync {
    /// Month/channel totals for every tracked channel.
    ///
    /// Fails if any channel has no history at all.
    async fn fetch_creator_growth(&self) -> Result<CreatorGrowth>;
}

/// Token price, supply and holder figures.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token_market(&self) -> Result<TokenMarket>;
}

/// Active ad campaigns per region.
#[async_trait]
pub trait CampaignSource: Send + Sync {
    async fn fetch_campaigns(&self) -> Result<Vec<RegionCampaign>>;
}

/// Total Rewards wallets.
#[async_trait]
pub trait WalletSource: Send + Sync {
    /// Latest unrounded wallet count, or `None` when the series is empty.
    async fn fetch_wallet_count(&self) -> Result<Option<u64>>;
}
