//! Outbound adapters (driven side).

pub mod brave;
pub mod coinbase;
pub mod gemini;
pub mod http;
pub mod paging;
pub mod resource;
pub mod s3;
pub mod snapshot;
pub mod uphold;
