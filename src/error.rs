use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("missing credential for {provider}: set {variable}")]
    MissingCredential {
        provider: &'static str,
        variable: &'static str,
    },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Upstream provider errors.
///
/// These are raised by outbound adapters and caught at the section boundary
/// of a run, where they are logged and treated as "nothing new".
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} responded with {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {provider} response: {reason}")]
    Decode {
        provider: &'static str,
        reason: String,
    },

    #[error("{provider} returned no records for {series}")]
    EmptySeries {
        provider: &'static str,
        series: String,
    },

    #[error("failed to sign {provider} request: {reason}")]
    Signing {
        provider: &'static str,
        reason: String,
    },

    #[error("{provider} pagination stalled: {reason}")]
    Pagination {
        provider: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
