//! Endpoints for the statistics providers.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct BraveConfig {
    /// Ads server statistics API (campaigns, payouts).
    #[serde(default = "default_ads_url")]
    pub ads_url: String,
    /// Ads static content (region names).
    #[serde(default = "default_ads_static_url")]
    pub ads_static_url: String,
    /// Creator statistics API.
    #[serde(default = "default_creators_url")]
    pub creators_url: String,
    /// Block explorer API.
    #[serde(default = "default_ethplorer_url")]
    pub ethplorer_url: String,
    /// Block explorer API key.
    #[serde(default = "default_ethplorer_key")]
    pub ethplorer_key: String,
    /// Token contract address.
    #[serde(default = "default_token_address")]
    pub token_address: String,
    /// Price history API.
    #[serde(default = "default_cryptocompare_url")]
    pub cryptocompare_url: String,
    /// Days of price history requested.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

fn default_ads_url() -> String {
    "https://ads-serve.brave.com".into()
}

fn default_ads_static_url() -> String {
    "https://ads-static.brave.com".into()
}

fn default_creators_url() -> String {
    "https://bravebat.info".into()
}

fn default_ethplorer_url() -> String {
    "https://api.ethplorer.io".into()
}

fn default_ethplorer_key() -> String {
    "freekey".into()
}

fn default_token_address() -> String {
    "0x0d8775f648430679a709e98d2b0cb6250d2887ef".into()
}

fn default_cryptocompare_url() -> String {
    "https://min-api.cryptocompare.com".into()
}

const fn default_history_limit() -> u32 {
    2000
}

impl Default for BraveConfig {
    fn default() -> Self {
        Self {
            ads_url: default_ads_url(),
            ads_static_url: default_ads_static_url(),
            creators_url: default_creators_url(),
            ethplorer_url: default_ethplorer_url(),
            ethplorer_key: default_ethplorer_key(),
            token_address: default_token_address(),
            cryptocompare_url: default_cryptocompare_url(),
            history_limit: default_history_limit(),
        }
    }
}

/// Join a base URL and an absolute path without doubling the slash.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
