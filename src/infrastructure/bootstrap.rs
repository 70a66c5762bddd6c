//! Composition root: builds adapters and the pipeline from configuration.

use tracing::{info, warn};

use crate::adapter::outbound::brave::{
    CampaignClient, CreatorClient, TokenClient, UserStatsClient, WalletClient,
};
use crate::adapter::outbound::coinbase::CoinbaseClient;
use crate::adapter::outbound::gemini::GeminiClient;
use crate::adapter::outbound::http::HttpClient;
use crate::adapter::outbound::resource::Location;
use crate::adapter::outbound::snapshot::{FileSink, LocationReader};
use crate::adapter::outbound::uphold::UpholdClient;
use crate::application::pipeline::{Pipeline, Sources};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::credentials::{Credentials, S3_BUCKET};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::{OrderSource, SnapshotReader, SnapshotSink};

/// Where a finished snapshot should go.
#[derive(Debug, Clone, Default)]
pub struct PublishTargets {
    /// Write to the local output file.
    pub save: bool,
    /// Upload to object storage.
    pub upload: bool,
    /// Replaces the configured output path.
    pub output: Option<String>,
}

/// Build the venue adapters for every enabled venue, in query order.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] when an enabled venue has no
/// credentials, or an error when the Uphold id list location is invalid.
pub fn build_venues(
    config: &Config,
    credentials: &Credentials,
    http: &HttpClient,
) -> Result<Vec<Box<dyn OrderSource>>> {
    let mut venues: Vec<Box<dyn OrderSource>> = Vec::new();

    if config.uphold.enabled {
        venues.push(Box::new(UpholdClient::new(http.clone(), config.uphold.clone())?));
    }

    if config.gemini.enabled {
        let creds = credentials
            .gemini
            .clone()
            .ok_or(ConfigError::MissingCredential {
                provider: "gemini",
                variable: "GEMINI_API_KEY",
            })?;
        venues.push(Box::new(GeminiClient::new(http.clone(), config.gemini.clone(), creds)));
    }

    if config.coinbase.enabled {
        let creds = credentials
            .coinbase
            .clone()
            .ok_or(ConfigError::MissingCredential {
                provider: "coinbase",
                variable: "COINBASE_API_KEY",
            })?;
        venues.push(Box::new(CoinbaseClient::new(
            http.clone(),
            config.coinbase.clone(),
            creds,
        )));
    }

    Ok(venues)
}

/// Build every source the pipeline reads from.
///
/// # Errors
///
/// See [`build_venues`].
pub fn build_sources(config: &Config, credentials: &Credentials) -> Result<Sources> {
    let http = HttpClient::from_config(&config.http);

    if credentials.ads.is_none() {
        warn!("ADS_SERVER_STATS_CREDENTIAL not set, campaign and wallet requests are unauthenticated");
    }
    if credentials.user_stats_url.is_none() {
        warn!("USER_STATS_URL not set, active users will not be refreshed");
    }

    Ok(Sources {
        venues: build_venues(config, credentials, &http)?,
        users: Box::new(UserStatsClient::new(
            http.clone(),
            credentials.user_stats_url.clone(),
            credentials.user_stats_credential.clone(),
        )),
        creators: Box::new(CreatorClient::new(http.clone(), config.brave.clone())),
        token: Box::new(TokenClient::new(http.clone(), config.brave.clone())),
        campaigns: Box::new(CampaignClient::new(
            http.clone(),
            config.brave.clone(),
            credentials.ads.clone(),
        )),
        wallets: Box::new(WalletClient::new(
            http,
            config.brave.clone(),
            credentials.ads.clone(),
        )),
    })
}

/// Build the run pipeline.
///
/// # Errors
///
/// See [`build_venues`].
pub fn build_pipeline(config: &Config, credentials: &Credentials) -> Result<Pipeline> {
    let sources = build_sources(config, credentials)?;
    info!(venues = sources.venues.len(), "Pipeline ready");
    Ok(Pipeline::new(sources, config.users.clone()))
}

/// Build the reader for the previous snapshot.
///
/// # Errors
///
/// Returns an error when the source looks like a URL but does not parse.
pub fn build_reader(config: &Config, source: Option<&str>) -> Result<Box<dyn SnapshotReader>> {
    let location = Location::parse(source.unwrap_or(&config.snapshot.source))?;
    Ok(Box::new(LocationReader::new(
        HttpClient::from_config(&config.http),
        location,
    )))
}

/// Build the sinks for `targets`.
///
/// Checked before any fetch so that a run which cannot be published is
/// never started.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] when an upload is requested
/// without `S3_BUCKET`, or [`ConfigError::InvalidValue`] when the binary was
/// built without object-storage support.
pub fn build_sinks(
    config: &Config,
    credentials: &Credentials,
    targets: &PublishTargets,
) -> Result<Vec<Box<dyn SnapshotSink>>> {
    let mut sinks: Vec<Box<dyn SnapshotSink>> = Vec::new();

    if targets.upload {
        sinks.push(upload_sink(config, credentials)?);
    }
    if targets.save {
        let path = targets.output.as_deref().unwrap_or(&config.snapshot.output);
        sinks.push(Box::new(FileSink::new(path)));
    }

    Ok(sinks)
}

#[cfg(feature = "s3")]
fn upload_sink(config: &Config, credentials: &Credentials) -> Result<Box<dyn SnapshotSink>> {
    use crate::adapter::outbound::s3::S3Sink;

    let bucket = credentials
        .s3_bucket
        .clone()
        .ok_or(ConfigError::MissingCredential {
            provider: "s3",
            variable: S3_BUCKET,
        })?;
    Ok(Box::new(S3Sink::new(bucket, config.upload.clone())))
}

#[cfg(not(feature = "s3"))]
fn upload_sink(_config: &Config, credentials: &Credentials) -> Result<Box<dyn SnapshotSink>> {
    if credentials.s3_bucket.is_none() {
        return Err(ConfigError::MissingCredential {
            provider: "s3",
            variable: S3_BUCKET,
        }
        .into());
    }
    Err(ConfigError::InvalidValue {
        field: "upload",
        reason: "this build does not include the s3 feature".to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Exchange;
    use crate::error::Error;

    fn venue_credentials() -> Credentials {
        let vars = [
            ("COINBASE_API_KEY", "ck"),
            ("COINBASE_API_SECRET", "Y29pbmJhc2Utc2VjcmV0"),
            ("COINBASE_API_PASSPHRASE", "cp"),
            ("GEMINI_API_KEY", "gk"),
            ("GEMINI_API_SECRET", "gs"),
        ];
        Credentials::resolve(&Config::default(), |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_string())
        })
        .unwrap()
    }

    #[test]
    fn venues_follow_query_order() {
        let venues =
            build_venues(&Config::default(), &venue_credentials(), &HttpClient::default()).unwrap();
        let order: Vec<_> = venues.iter().map(|v| v.exchange()).collect();

        assert_eq!(order, Exchange::ALL.to_vec());
    }

    #[test]
    fn disabled_venues_are_left_out() {
        let config = Config::parse_toml("[gemini]\nenabled = false\n").unwrap();
        let venues = build_venues(&config, &venue_credentials(), &HttpClient::default()).unwrap();
        let order: Vec<_> = venues.iter().map(|v| v.exchange()).collect();

        assert_eq!(order, vec![Exchange::Uphold, Exchange::Coinbase]);
    }

    #[test]
    fn upload_without_bucket_is_rejected_up_front() {
        let targets = PublishTargets {
            save: true,
            upload: true,
            output: None,
        };
        let result = build_sinks(&Config::default(), &Credentials::default(), &targets);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingCredential {
                variable: "S3_BUCKET",
                ..
            }))
        ));
    }

    #[test]
    fn save_uses_output_override() {
        let targets = PublishTargets {
            save: true,
            upload: false,
            output: Some("out/data.json".into()),
        };
        let sinks = build_sinks(&Config::default(), &Credentials::default(), &targets).unwrap();

        assert_eq!(sinks.len(), 1);
        assert_eq!(sinks[0].name(), "out/data.json");
    }
}
