//! Venue-agnostic domain types: purchases, watermarks, snapshot sections.

pub mod channel;
pub mod error;
pub mod exchange;
pub mod order;
pub mod page;
pub mod rounding;
pub mod snapshot;
pub mod stats;
pub mod watermark;

pub use channel::{Channel, CreatorGrowth, GrowthRecord};
pub use exchange::Exchange;
pub use order::{OrderSet, TransactionOrder};
pub use page::Page;
pub use snapshot::{Metrics, RegionCampaign, Snapshot, TokenSnapshot, UserStats};
pub use stats::{DailyClose, TokenMarket, UserStatsPoint};
pub use watermark::Watermark;
