//! Text resources that may live on disk or behind a URL.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use super::http::HttpClient;
use crate::error::Result;

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Remote(Url),
    Local(PathBuf),
}

impl Location {
    /// Treat `http://` and `https://` values as URLs and anything else as a path.
    pub fn parse(value: &str) -> Result<Self> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::Remote(Url::parse(value)?))
        } else {
            Ok(Self::Local(PathBuf::from(value)))
        }
    }

    /// Read the whole resource as UTF-8 text.
    pub async fn read_text(&self, http: &HttpClient, provider: &'static str) -> Result<String> {
        match self {
            Self::Remote(url) => http.text(provider, http.get(url.as_str())).await,
            Self::Local(path) => Ok(tokio::fs::read_to_string(path).await?),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
