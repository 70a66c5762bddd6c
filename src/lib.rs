//! Transparency - rebuilds the published BAT transparency snapshot.
//!
//! Each run loads the previously published document, asks every upstream
//! provider for what changed since then, merges the answers section by
//! section and publishes the result. A provider that fails costs only its
//! own section; the previous values are carried forward.
//!
//! # Architecture
//!
//! - **`domain`** - The snapshot document, purchase records and watermarks
//! - **`port`** - Traits the application fetches from and publishes to
//! - **`application`** - Reconciliation rules and the run pipeline
//! - **`adapter::outbound`** - Exchange venues, Brave metrics providers,
//!   snapshot storage
//! - **`adapter::inbound`** - The `transparency` command line
//! - **`infrastructure`** - Configuration, credentials, logging and wiring
//!
//! # Features
//!
//! - `s3` (default) - Upload the snapshot to S3-compatible object storage
//! - `testkit` - Scripted sources and in-memory sinks for tests
//!
//! # Example
//!
//! ```no_run
//! use transparency::application::reconcile::merge_transactions;
//! use transparency::domain::Snapshot;
//!
//! let (snapshot, summary) = merge_transactions(Snapshot::empty(), Vec::new());
//! assert_eq!(summary.added, 0);
//! assert!(snapshot.transactions.is_empty());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
