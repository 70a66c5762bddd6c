//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without
//! containing business logic: configuration, credentials and runtime wiring.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading, credentials and logging

pub mod bootstrap;
pub mod config;
