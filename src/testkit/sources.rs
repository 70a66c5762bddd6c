//! In-memory fetch ports.
//!
//! Each fake either returns a fixed value or fails with a provider error,
//! and records how often it was called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::pipeline::Sources;
use crate::domain::{
    CreatorGrowth, Exchange, OrderSet, RegionCampaign, TokenMarket, UserStatsPoint, Watermark,
};
use crate::error::{ProviderError, Result};
use crate::port::outbound::{
    CampaignSource, CreatorStatsSource, OrderSource, TokenSource, UserStatsSource, WalletSource,
};

/// A fixed response, or a failure.
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Ok(T),
    Fail(String),
}

impl<T: Clone> Scripted<T> {
    fn get(&self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Fail(body) => Err(ProviderError::Status {
                provider: "fake",
                status: 503,
                body: body.clone(),
            }
            .into()),
        }
    }
}

/// A venue returning a fixed order set and recording the watermarks it saw.
#[derive(Debug, Clone)]
pub struct FakeVenue {
    exchange: Exchange,
    response: Scripted<OrderSet>,
    watermarks: Arc<Mutex<Vec<Watermark>>>,
}

impl FakeVenue {
    pub fn new(exchange: Exchange, orders: OrderSet) -> Self {
        Self {
            exchange,
            response: Scripted::Ok(orders),
            watermarks: Arc::default(),
        }
    }

    pub fn failing(exchange: Exchange, body: &str) -> Self {
        Self {
            exchange,
            response: Scripted::Fail(body.to_string()),
            watermarks: Arc::default(),
        }
    }

    /// Handle to the watermarks passed to `fetch_orders`, shared with clones.
    pub fn watermarks(&self) -> Arc<Mutex<Vec<Watermark>>> {
        Arc::clone(&self.watermarks)
    }
}

#[async_trait]
impl OrderSource for FakeVenue {
    fn exchange(&self) -> Exchange {
        self.exchange
    }

    async fn fetch_orders(&self, watermark: &Watermark) -> Result<OrderSet> {
        self.watermarks
            .lock()
            .expect("watermark log poisoned")
            .push(watermark.clone());
        self.response.get()
    }
}

/// A single fake serving every statistics port.
#[derive(Debug, Clone)]
pub struct FakeStats {
    pub users: Scripted<Vec<UserStatsPoint>>,
    pub creators: Scripted<CreatorGrowth>,
    pub token: Scripted<TokenMarket>,
    pub campaigns: Scripted<Vec<RegionCampaign>>,
    pub wallets: Scripted<Option<u64>>,
    pub calls: Arc<AtomicUsize>,
}

impl Default for FakeStats {
    fn default() -> Self {
        Self {
            users: Scripted::Ok(Vec::new()),
            creators: Scripted::Ok(CreatorGrowth::new()),
            token: Scripted::Ok(super::domain::token_market(0.2)),
            campaigns: Scripted::Ok(Vec::new()),
            wallets: Scripted::Ok(None),
            calls: Arc::default(),
        }
    }
}

impl FakeStats {
    /// Total number of statistics fetches across all clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Pipeline sources using `venues` and clones of this fake for the rest.
    pub fn sources(&self, venues: Vec<FakeVenue>) -> Sources {
        Sources {
            venues: venues
                .into_iter()
                .map(|v| Box::new(v) as Box<dyn OrderSource>)
                .collect(),
            users: Box::new(self.clone()),
            creators: Box::new(self.clone()),
            token: Box::new(self.clone()),
            campaigns: Box::new(self.clone()),
            wallets: Box::new(self.clone()),
        }
    }
}

#[async_trait]
impl UserStatsSource for FakeStats {
    async fn fetch_user_stats(&self) -> Result<Vec<UserStatsPoint>> {
        self.hit();
        self.users.get()
    }
}

#[async_trait]
impl CreatorStatsSource for FakeStats {
    async fn fetch_creator_growth(&self) -> Result<CreatorGrowth> {
        self.hit();
        self.creators.get()
    }
}

#[async_trait]
impl TokenSource for FakeStats {
    async fn fetch_token_market(&self) -> Result<TokenMarket> {
        self.hit();
        self.token.get()
    }
}

#[async_trait]
impl CampaignSource for FakeStats {
    async fn fetch_campaigns(&self) -> Result<Vec<RegionCampaign>> {
        self.hit();
        self.campaigns.get()
    }
}

#[async_trait]
impl WalletSource for FakeStats {
    async fn fetch_wallet_count(&self) -> Result<Option<u64>> {
        self.hit();
        self.wallets.get()
    }
}
