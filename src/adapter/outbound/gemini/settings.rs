//! Gemini adapter configuration.

use serde::Deserialize;

/// Gemini endpoint and symbol settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// Query this venue at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Trading symbol whose buys are reported.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Orders requested per page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    /// Earliest order time considered on a full fetch, epoch milliseconds.
    ///
    /// Orders at or before this instant were small test purchases.
    #[serde(default = "default_floor_ms")]
    pub floor_ms: i64,
}

const fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.gemini.com".into()
}

fn default_symbol() -> String {
    "batusd".into()
}

const fn default_page_limit() -> u32 {
    500
}

const fn default_floor_ms() -> i64 {
    1_649_111_057_653
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_api_url(),
            symbol: default_symbol(),
            page_limit: default_page_limit(),
            floor_ms: default_floor_ms(),
        }
    }
}
