//! Application layer: section reconciliation, the run pipeline and publishing.

pub mod pipeline;
pub mod publish;
pub mod reconcile;

pub use pipeline::{load_snapshot, Pipeline, RunOutcome, RunReport, Section, SectionFailure, Sources};
pub use publish::{publish, PublishReport};
