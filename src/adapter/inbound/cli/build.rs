//! Handler for `transparency build`.

use tracing::info;

use super::command::BuildArgs;
use super::output;
use crate::application::pipeline::{load_snapshot, RunReport};
use crate::application::{publish, PublishReport};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::{self, PublishTargets};
use crate::infrastructure::config::credentials::Credentials;
use crate::infrastructure::config::settings::Config;

/// Rebuild the snapshot and publish it to every requested target.
///
/// Sinks are resolved before anything is fetched so that a run which could
/// not be published fails fast.
///
/// # Errors
///
/// Returns an error when credentials or sinks cannot be resolved, or when
/// any sink failed to accept the snapshot.
pub async fn execute(config: &Config, args: &BuildArgs) -> Result<()> {
    let credentials = Credentials::from_env(config)?;
    let targets = PublishTargets {
        save: args.save,
        upload: args.upload,
        output: args.output.clone(),
    };
    let sinks = bootstrap::build_sinks(config, &credentials, &targets)?;
    let pipeline = bootstrap::build_pipeline(config, &credentials)?;
    let reader = bootstrap::build_reader(config, args.source.as_deref())?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Source", reader.location());

    let previous = load_snapshot(reader.as_ref()).await;
    let outcome = pipeline.run(previous).await;
    print_run(&outcome.report, outcome.snapshot.transactions.len());

    if sinks.is_empty() {
        output::note("Nothing to publish (--no-save without --upload)");
        return Ok(());
    }

    let published = publish(&outcome.snapshot, &sinks).await?;
    print_publish(&published);
    info!(
        written = published.written.len(),
        failed = published.failed.len(),
        "Run complete"
    );

    if published.is_clean() {
        Ok(())
    } else {
        Err(Error::Storage(format!(
            "{} of {} targets failed",
            published.failed.len(),
            sinks.len()
        )))
    }
}

fn print_run(report: &RunReport, total: usize) {
    output::section("Transactions");
    if report.full_rebuild {
        output::note("Full history rebuilt");
    }
    output::field("New", output::highlight(report.transactions.added));
    output::field("Total", total);

    output::section("Sections");
    if report.is_clean() {
        output::success("All sections refreshed");
    }
    for failure in &report.failures {
        let target = match failure.venue {
            Some(venue) => format!("{} ({venue})", failure.section),
            None => failure.section.to_string(),
        };
        output::warning(&format!("{target} kept previous data: {}", failure.error));
    }
}

fn print_publish(report: &PublishReport) {
    output::section("Published");
    for name in &report.written {
        output::success(name);
    }
    for (name, error) in &report.failed {
        output::error(&format!("{name}: {error}"));
    }
}
