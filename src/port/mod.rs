//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │   Application (merge)   │
//!                    └────────────┬────────────┘
//!          ┌──────────────────────┼──────────────────────┐
//!          ▼                      ▼                      ▼
//!   ┌─────────────┐        ┌─────────────┐        ┌─────────────┐
//!   │ OrderSource │        │ Stats/Token │        │  Snapshot   │
//!   │  (venues)   │        │  sources    │        │ reader/sink │
//!   └─────────────┘        └─────────────┘        └─────────────┘
//! ```

pub mod outbound;
