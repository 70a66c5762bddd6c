//! Coinbase adapter configuration.

use serde::Deserialize;

/// Coinbase endpoint and product settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinbaseConfig {
    /// Query this venue at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Exchange REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Server time endpoint used to timestamp signed requests.
    #[serde(default = "default_time_url")]
    pub time_url: String,
    /// Trading pair whose buys are reported.
    #[serde(default = "default_product_id")]
    pub product_id: String,
    /// Orders requested per page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

const fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.pro.coinbase.com".into()
}

fn default_time_url() -> String {
    "https://api.coinbase.com/v2/time".into()
}

fn default_product_id() -> String {
    "BAT-USD".into()
}

const fn default_page_limit() -> u32 {
    100
}

impl Default for CoinbaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_api_url(),
            time_url: default_time_url(),
            product_id: default_product_id(),
            page_limit: default_page_limit(),
        }
    }
}
