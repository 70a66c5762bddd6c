//! Brave-operated and public statistics providers.
//!
//! Everything in the snapshot except the purchase history comes from here:
//! active users, creator growth, token market data, ad campaigns and the
//! Rewards wallet count.

pub mod campaigns;
pub mod creators;
pub mod settings;
pub mod token;
pub mod users;
pub mod wallets;

use reqwest::RequestBuilder;

pub use campaigns::CampaignClient;
pub use creators::CreatorClient;
pub use settings::BraveConfig;
pub use token::TokenClient;
pub use users::UserStatsClient;
pub use wallets::WalletClient;

/// Attach a bearer credential when one is configured.
fn bearer(request: RequestBuilder, credential: Option<&str>) -> RequestBuilder {
    match credential {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}
