//! Serialize a finished snapshot and hand it to every sink.

use tracing::{info, warn};

use crate::domain::Snapshot;
use crate::error::Result;
use crate::port::outbound::SnapshotSink;

/// Outcome of publishing to each sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Sinks that accepted the document.
    pub written: Vec<String>,
    /// Sinks that failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl PublishReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write `snapshot` to every sink.
///
/// A failing sink is logged and recorded; the remaining sinks are still
/// written.
///
/// # Errors
///
/// Returns an error only if the snapshot cannot be serialized.
pub async fn publish(snapshot: &Snapshot, sinks: &[Box<dyn SnapshotSink>]) -> Result<PublishReport> {
    let body = snapshot.to_json()?;
    let mut report = PublishReport::default();

    for sink in sinks {
        let name = sink.name();
        match sink.write(&body).await {
            Ok(()) => {
                info!(sink = %name, "Snapshot published");
                report.written.push(name);
            }
            Err(err) => {
                warn!(sink = %name, error = %err, "Failed to publish snapshot");
                report.failed.push((name, err.to_string()));
            }
        }
    }

    Ok(report)
}
