//! Persistence ports for the snapshot document.

use async_trait::async_trait;

use crate::error::Result;

/// Reads the previously published document.
#[async_trait]
pub trait SnapshotReader: Send + Sync {
    /// Raw document contents.
    async fn read(&self) -> Result<String>;

    /// Where the document is read from, for logging.
    fn location(&self) -> String;
}

/// Persists a freshly built document.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Store the serialized document.
    async fn write(&self, body: &str) -> Result<()>;

    /// Destination name for logging.
    fn name(&self) -> String;
}
