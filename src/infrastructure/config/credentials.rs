//! Secrets and deployment values read from the environment.
//!
//! Nothing here is ever read from the TOML file. Empty variables count as
//! unset.

use std::fmt;

use super::settings::Config;
use crate::adapter::outbound::coinbase::CoinbaseCredentials;
use crate::adapter::outbound::gemini::GeminiCredentials;
use crate::error::{ConfigError, Result};

pub const COINBASE_API_KEY: &str = "COINBASE_API_KEY";
pub const COINBASE_API_SECRET: &str = "COINBASE_API_SECRET";
pub const COINBASE_API_PASSPHRASE: &str = "COINBASE_API_PASSPHRASE";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GEMINI_API_SECRET: &str = "GEMINI_API_SECRET";
pub const ADS_SERVER_STATS_CREDENTIAL: &str = "ADS_SERVER_STATS_CREDENTIAL";
pub const USER_STATS_URL: &str = "USER_STATS_URL";
pub const USER_STATS_CREDENTIAL: &str = "USER_STATS_CREDENTIAL";
pub const S3_BUCKET: &str = "S3_BUCKET";

/// Credentials resolved for the enabled providers.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Present whenever Coinbase is enabled.
    pub coinbase: Option<CoinbaseCredentials>,
    /// Present whenever Gemini is enabled.
    pub gemini: Option<GeminiCredentials>,
    /// Bearer token for the ads statistics endpoints.
    pub ads: Option<String>,
    pub user_stats_url: Option<String>,
    pub user_stats_credential: Option<String>,
    pub s3_bucket: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("coinbase", &self.coinbase)
            .field("gemini", &self.gemini)
            .field("ads", &self.ads.as_ref().map(|_| "<redacted>"))
            .field("user_stats_url", &self.user_stats_url)
            .field(
                "user_stats_credential",
                &self.user_stats_credential.as_ref().map(|_| "<redacted>"),
            )
            .field("s3_bucket", &self.s3_bucket)
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] naming the first missing
    /// variable of an enabled venue.
    pub fn from_env(config: &Config) -> Result<Self> {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Resolve credentials through `lookup`.
    ///
    /// Venue credentials are mandatory only for enabled venues. The ads
    /// credential, user-stats source and bucket are optional here; the
    /// sections that need them fail on their own when they are absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] naming the first missing
    /// variable of an enabled venue.
    pub fn resolve<F>(config: &Config, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |provider: &'static str, variable: &'static str| {
            get(variable).ok_or(ConfigError::MissingCredential { provider, variable })
        };

        let coinbase = if config.coinbase.enabled {
            Some(CoinbaseCredentials {
                key: require("coinbase", COINBASE_API_KEY)?,
                secret: require("coinbase", COINBASE_API_SECRET)?,
                passphrase: require("coinbase", COINBASE_API_PASSPHRASE)?,
            })
        } else {
            None
        };

        let gemini = if config.gemini.enabled {
            Some(GeminiCredentials {
                key: require("gemini", GEMINI_API_KEY)?,
                secret: require("gemini", GEMINI_API_SECRET)?,
            })
        } else {
            None
        };

        Ok(Self {
            coinbase,
            gemini,
            ads: get(ADS_SERVER_STATS_CREDENTIAL),
            user_stats_url: get(USER_STATS_URL),
            user_stats_credential: get(USER_STATS_CREDENTIAL),
            s3_bucket: get(S3_BUCKET),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const VENUES: &[(&str, &str)] = &[
        (COINBASE_API_KEY, "ck"),
        (COINBASE_API_SECRET, "Y29pbmJhc2Utc2VjcmV0"),
        (COINBASE_API_PASSPHRASE, "cp"),
        (GEMINI_API_KEY, "gk"),
        (GEMINI_API_SECRET, "gs"),
    ];

    #[test]
    fn resolves_enabled_venues() {
        let creds = Credentials::resolve(&Config::default(), lookup(VENUES)).unwrap();

        assert_eq!(creds.coinbase.unwrap().passphrase, "cp");
        assert_eq!(creds.gemini.unwrap().key, "gk");
        assert!(creds.ads.is_none());
        assert!(creds.s3_bucket.is_none());
    }

    #[test]
    fn missing_secret_names_the_variable() {
        let vars: Vec<_> = VENUES
            .iter()
            .copied()
            .filter(|(k, _)| *k != GEMINI_API_SECRET)
            .collect();

        match Credentials::resolve(&Config::default(), lookup(&vars)) {
            Err(Error::Config(ConfigError::MissingCredential { provider, variable })) => {
                assert_eq!(provider, "gemini");
                assert_eq!(variable, GEMINI_API_SECRET);
            }
            other => panic!("expected missing credential, got {other:?}"),
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut vars = VENUES.to_vec();
        vars.retain(|(k, _)| *k != COINBASE_API_KEY);
        vars.push((COINBASE_API_KEY, "  "));

        assert!(Credentials::resolve(&Config::default(), lookup(&vars)).is_err());
    }

    #[test]
    fn disabled_venues_need_no_credentials() {
        let config = Config::parse_toml("[coinbase]\nenabled = false\n[gemini]\nenabled = false\n")
            .unwrap();
        let creds = Credentials::resolve(&config, lookup(&[(S3_BUCKET, "bucket")])).unwrap();

        assert!(creds.coinbase.is_none());
        assert!(creds.gemini.is_none());
        assert_eq!(creds.s3_bucket.as_deref(), Some("bucket"));
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let creds = Credentials {
            ads: Some("ads-secret".into()),
            ..Credentials::default()
        };
        assert!(!format!("{creds:?}").contains("ads-secret"));
    }
}
