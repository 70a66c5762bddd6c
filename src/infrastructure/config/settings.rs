//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional in the TOML file; secrets are never read from it and
//! are resolved separately by [`Credentials`](super::credentials::Credentials).
//!
//! # Example
//!
//! ```no_run
//! use transparency::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("transparency.toml")?;
//!     config.init_logging(false);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::brave::BraveConfig;
use crate::adapter::outbound::coinbase::CoinbaseConfig;
use crate::adapter::outbound::gemini::GeminiConfig;
use crate::adapter::outbound::http::HttpConfig;
use crate::adapter::outbound::s3::UploadConfig;
use crate::adapter::outbound::uphold::UpholdConfig;
use crate::application::reconcile::UserStatsPolicy;
use crate::domain::stats::is_month;
use crate::error::{ConfigError, Result};

/// Where the previous snapshot is read from and the new one is written to.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// URL or path of the previously published document.
    #[serde(default = "default_source")]
    pub source: String,
    /// Local output path.
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_source() -> String {
    "https://brave.com/transparency-data.json".into()
}

fn default_output() -> String {
    "transparency.json".into()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Timeouts and retry policy shared by every provider.
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Object-storage destination used with `--upload`.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Active-user acceptance rules.
    #[serde(default)]
    pub users: UserStatsPolicy,

    #[serde(default)]
    pub coinbase: CoinbaseConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub uphold: UpholdConfig,

    /// Statistics provider endpoints.
    #[serde(default)]
    pub brave: BraveConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise use the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or is invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.snapshot.source.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "snapshot.source",
            }
            .into());
        }
        if self.snapshot.output.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "snapshot.output",
            }
            .into());
        }
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.http.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.http.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.retry_max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !is_month(&self.users.cutover_month) {
            return Err(ConfigError::InvalidValue {
                field: "users.cutover_month",
                reason: format!("'{}' is not shaped YYYY-MM", self.users.cutover_month),
            }
            .into());
        }
        if self.coinbase.enabled && self.coinbase.page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "coinbase.page_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.gemini.enabled && self.gemini.page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gemini.page_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.uphold.enabled && self.uphold.ids.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "uphold.ids" }.into());
        }
        Ok(())
    }

    /// Names of the venues that will be queried, in query order.
    #[must_use]
    pub fn enabled_venues(&self) -> Vec<&'static str> {
        let mut venues = Vec::new();
        if self.uphold.enabled {
            venues.push("uphold");
        }
        if self.gemini.enabled {
            venues.push("gemini");
        }
        if self.coinbase.enabled {
            venues.push("coinbase");
        }
        venues
    }

    /// Initialize logging with the configured settings, raised to `debug`
    /// when `verbose` is set.
    pub fn init_logging(&self, verbose: bool) {
        self.logging.clone().with_verbose(verbose).init();
    }
}
