//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod exchange;
pub mod stats;
pub mod store;

pub use exchange::OrderSource;
pub use stats::{CampaignSource, CreatorStatsSource, TokenSource, UserStatsSource, WalletSource};
pub use store::{SnapshotReader, SnapshotSink};
