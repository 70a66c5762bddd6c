//! In-memory snapshot persistence.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::port::outbound::{SnapshotReader, SnapshotSink};

/// Serves a fixed document, or fails as if the source were unreachable.
#[derive(Debug, Clone)]
pub struct MemoryReader {
    content: Option<String>,
}

impl MemoryReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    pub fn unreachable() -> Self {
        Self { content: None }
    }
}

#[async_trait]
impl SnapshotReader for MemoryReader {
    async fn read(&self) -> Result<String> {
        self.content
            .clone()
            .ok_or_else(|| Error::Storage("source unreachable".into()))
    }

    fn location(&self) -> String {
        "memory".into()
    }
}

/// Captures every written document.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents written so far, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().expect("sink log poisoned").clone()
    }
}

#[async_trait]
impl SnapshotSink for MemorySink {
    async fn write(&self, body: &str) -> Result<()> {
        self.writes
            .lock()
            .expect("sink log poisoned")
            .push(body.to_string());
        Ok(())
    }

    fn name(&self) -> String {
        "memory".into()
    }
}

/// A sink that always fails.
#[derive(Debug, Clone, Default)]
pub struct FailingSink;

#[async_trait]
impl SnapshotSink for FailingSink {
    async fn write(&self, _body: &str) -> Result<()> {
        Err(Error::Storage("bucket rejected the write".into()))
    }

    fn name(&self) -> String {
        "failing".into()
    }
}
