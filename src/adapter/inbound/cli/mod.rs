//! Command-line interface.

pub mod build;
pub mod check;
pub mod command;
pub mod output;
