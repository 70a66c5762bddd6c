//! Command-line interface definitions.
//!
//! Defines the CLI structure for the transparency job using `clap`: one
//! command to rebuild and publish the snapshot, and diagnostic checks.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Rebuild the published BAT transparency snapshot
#[derive(Parser, Debug)]
#[command(name = "transparency")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults apply when it is absent)
    #[arg(short, long, global = true, default_value = "transparency.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every section, merge into the previous snapshot and publish it
    Build(BuildArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `transparency check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and required environment variables.
    Config,
}

/// Arguments for the `build` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Do not write the snapshot to the local output file
    #[arg(long = "no-save", action = ArgAction::SetFalse)]
    pub save: bool,

    /// Upload the snapshot to object storage (requires S3_BUCKET)
    #[arg(long)]
    pub upload: bool,

    /// Previous snapshot URL or path, overriding the configured source
    #[arg(long, value_name = "URL|PATH")]
    pub source: Option<String>,

    /// Output path, overriding the configured one
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,
}
