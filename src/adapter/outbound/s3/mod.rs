//! Object-storage publication of the snapshot.
//!
//! The sink itself is only compiled with the `s3` feature; the settings are
//! always available so configuration files parse the same either way.

pub mod settings;
#[cfg(feature = "s3")]
pub mod sink;

pub use settings::UploadConfig;
#[cfg(feature = "s3")]
pub use sink::S3Sink;
