//! Snapshot document reader and local file sink.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use super::http::HttpClient;
use super::resource::Location;
use crate::error::Result;
use crate::port::outbound::{SnapshotReader, SnapshotSink};

const PROVIDER: &str = "snapshot";

/// Reads the previous document from a URL or a local path.
pub struct LocationReader {
    http: HttpClient,
    location: Location,
}

impl LocationReader {
    #[must_use]
    pub fn new(http: HttpClient, location: Location) -> Self {
        Self { http, location }
    }
}

#[async_trait]
impl SnapshotReader for LocationReader {
    async fn read(&self) -> Result<String> {
        self.location.read_text(&self.http, PROVIDER).await
    }

    fn location(&self) -> String {
        self.location.to_string()
    }
}

/// Writes the document to a local file, replacing any previous content.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSink for FileSink {
    async fn write(&self, body: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, body).await?;
        info!(path = %self.path.display(), bytes = body.len(), "Snapshot saved");
        Ok(())
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
