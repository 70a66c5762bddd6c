//! Uphold adapter configuration.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct UpholdConfig {
    /// Query this venue at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Path or URL of the newline-delimited transaction id list.
    #[serde(default = "default_ids")]
    pub ids: String,
}

const fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.uphold.com".into()
}

fn default_ids() -> String {
    "transactionIDs".into()
}

impl Default for UpholdConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_api_url(),
            ids: default_ids(),
        }
    }
}
