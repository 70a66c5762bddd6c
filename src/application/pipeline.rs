//! The run pipeline: load, fetch each section, merge, stamp.
//!
//! Sections are processed one after another against a single owned
//! [`Snapshot`]. A failing section is logged and recorded in the
//! [`RunReport`]; it never aborts the sections after it, and because merges
//! are applied only after a successful fetch, it never leaves its own section
//! half-written.

use std::fmt;

use anyhow::Context;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::reconcile::{
    self, merge_transactions, FetchPlan, TransactionSummary, UserStatsPolicy,
};
use crate::domain::{Exchange, Snapshot, Watermark};
use crate::port::outbound::{
    CampaignSource, CreatorStatsSource, OrderSource, SnapshotReader, TokenSource,
    UserStatsSource, WalletSource,
};

/// A top-level property of the snapshot, merged independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Users,
    Metrics,
    Transactions,
    Ads,
    Token,
    Wallets,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Users => "users",
            Self::Metrics => "metrics",
            Self::Transactions => "transactions",
            Self::Ads => "braveAds",
            Self::Token => "bat",
            Self::Wallets => "wallets",
        };
        f.write_str(name)
    }
}

/// A section (or one venue within the transactions section) that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFailure {
    pub section: Section,
    pub venue: Option<Exchange>,
    pub error: String,
}

/// What happened during one run. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Whether the transactions section was rebuilt from scratch.
    pub full_rebuild: bool,
    /// Transaction merge counts.
    pub transactions: TransactionSummary,
    /// Sections that could not be refreshed.
    pub failures: Vec<SectionFailure>,
}

impl RunReport {
    /// Whether every section refreshed successfully.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether `section` recorded at least one failure.
    #[must_use]
    pub fn failed(&self, section: Section) -> bool {
        self.failures.iter().any(|f| f.section == section)
    }

    fn record(&mut self, section: Section, venue: Option<Exchange>, error: &anyhow::Error) {
        let message = format!("{error:#}");
        warn!(section = %section, venue = ?venue, error = %message, "Section refresh failed");
        self.failures.push(SectionFailure {
            section,
            venue,
            error: message,
        });
    }
}

/// Result of a run: the new snapshot and what happened while building it.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub snapshot: Snapshot,
    pub report: RunReport,
}

/// Everything the pipeline fetches from.
pub struct Sources {
    /// Venue adapters, queried in order.
    pub venues: Vec<Box<dyn OrderSource>>,
    pub users: Box<dyn UserStatsSource>,
    pub creators: Box<dyn CreatorStatsSource>,
    pub token: Box<dyn TokenSource>,
    pub campaigns: Box<dyn CampaignSource>,
    pub wallets: Box<dyn WalletSource>,
}

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Sequences fetch → merge for every section of the snapshot.
pub struct Pipeline {
    sources: Sources,
    policy: UserStatsPolicy,
    clock: Clock,
}

impl Pipeline {
    #[must_use]
    pub fn new(sources: Sources, policy: UserStatsPolicy) -> Self {
        Self {
            sources,
            policy,
            clock: Box::new(|| Utc::now().timestamp_millis()),
        }
    }

    /// Replace the clock used to stamp `updated`.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Refresh every section of `snapshot`.
    pub async fn run(&self, snapshot: Snapshot) -> RunOutcome {
        let mut report = RunReport::default();

        let snapshot = self.users(snapshot, &mut report).await;
        let snapshot = self.metrics(snapshot, &mut report).await;
        let snapshot = self.transactions(snapshot, &mut report).await;
        let snapshot = self.campaigns(snapshot, &mut report).await;
        let snapshot = self.token(snapshot, &mut report).await;
        let snapshot = self.wallets(snapshot, &mut report).await;
        let snapshot = reconcile::stamp(snapshot, (self.clock)());

        RunOutcome { snapshot, report }
    }

    async fn users(&self, snapshot: Snapshot, report: &mut RunReport) -> Snapshot {
        let fetched = self
            .sources
            .users
            .fetch_user_stats()
            .await
            .context("fetching active users");

        match fetched {
            Ok(points) => {
                info!(count = points.len(), "Merging active users");
                reconcile::merge_users(snapshot, &points, &self.policy)
            }
            Err(err) => {
                report.record(Section::Users, None, &err);
                snapshot
            }
        }
    }

    async fn metrics(&self, snapshot: Snapshot, report: &mut RunReport) -> Snapshot {
        let fetched = self
            .sources
            .creators
            .fetch_creator_growth()
            .await
            .context("fetching creator growth");

        match fetched {
            Ok(growth) => {
                info!(months = growth.months().count(), "Merging creator growth");
                reconcile::merge_metrics(snapshot, &growth)
            }
            Err(err) => {
                report.record(Section::Metrics, None, &err);
                snapshot
            }
        }
    }

    async fn transactions(&self, snapshot: Snapshot, report: &mut RunReport) -> Snapshot {
        let venues: Vec<Exchange> = self.sources.venues.iter().map(|v| v.exchange()).collect();
        let plan = FetchPlan::for_existing(&snapshot.transactions, &venues);

        if plan.full {
            info!("No existing transactions, fetching full history");
        } else {
            info!(existing = snapshot.transactions.len(), "Existing transactions");
        }

        let mut fetched = Vec::with_capacity(self.sources.venues.len());
        for venue in &self.sources.venues {
            let exchange = venue.exchange();
            let watermark = plan
                .watermark(exchange)
                .cloned()
                .unwrap_or_else(Watermark::full);

            debug!(venue = %exchange, watermark = %watermark, "Fetching orders");
            match venue
                .fetch_orders(&watermark)
                .await
                .with_context(|| format!("fetching {exchange} orders"))
            {
                Ok(orders) => {
                    info!(venue = %exchange, count = orders.len(), "Fetched orders");
                    fetched.push((exchange, orders));
                }
                Err(err) => report.record(Section::Transactions, Some(exchange), &err),
            }
        }

        let (snapshot, summary) = merge_transactions(snapshot, fetched);
        if summary.added > 0 {
            info!(new = summary.added, total = snapshot.transactions.len(), "New transactions");
        } else {
            info!("No new transactions");
        }

        report.full_rebuild = plan.full;
        report.transactions = summary;
        snapshot
    }

    async fn campaigns(&self, snapshot: Snapshot, report: &mut RunReport) -> Snapshot {
        match self
            .sources
            .campaigns
            .fetch_campaigns()
            .await
            .context("fetching active campaigns")
        {
            Ok(campaigns) => {
                info!(regions = campaigns.len(), "Replacing campaigns");
                reconcile::merge_campaigns(snapshot, campaigns)
            }
            Err(err) => {
                report.record(Section::Ads, None, &err);
                snapshot
            }
        }
    }

    async fn token(&self, snapshot: Snapshot, report: &mut RunReport) -> Snapshot {
        match self
            .sources
            .token
            .fetch_token_market()
            .await
            .context("fetching token market")
        {
            Ok(market) => {
                info!(days = market.history.len(), "Replacing token market");
                reconcile::merge_token(snapshot, market)
            }
            Err(err) => {
                report.record(Section::Token, None, &err);
                snapshot
            }
        }
    }

    async fn wallets(&self, snapshot: Snapshot, report: &mut RunReport) -> Snapshot {
        match self
            .sources
            .wallets
            .fetch_wallet_count()
            .await
            .context("fetching wallet count")
        {
            Ok(Some(latest)) => reconcile::merge_wallets(snapshot, latest),
            Ok(None) => {
                debug!("Wallet series is empty, keeping previous count");
                snapshot
            }
            Err(err) => {
                report.record(Section::Wallets, None, &err);
                snapshot
            }
        }
    }
}

/// Load the previous snapshot, degrading to an empty one.
///
/// An unreachable or malformed document is logged and treated as "no prior
/// snapshot"; it never aborts the run.
pub async fn load_snapshot(reader: &dyn SnapshotReader) -> Snapshot {
    let location = reader.location();

    let content = match reader.read().await {
        Ok(content) => content,
        Err(err) => {
            warn!(location = %location, error = %err, "Previous snapshot unavailable, starting empty");
            return Snapshot::empty();
        }
    };

    match Snapshot::from_json(&content) {
        Ok(snapshot) => {
            if snapshot.updated > 0 {
                let hours = (Utc::now().timestamp_millis() - snapshot.updated) as f64 / 3_600_000.0;
                debug!(location = %location, "Last updated {hours:.1} hours ago");
            }
            snapshot
        }
        Err(err) => {
            warn!(location = %location, error = %err, "Previous snapshot is malformed, starting empty");
            Snapshot::empty()
        }
    }
}
