use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::credentials::{
    Credentials, ADS_SERVER_STATS_CREDENTIAL, COINBASE_API_KEY, COINBASE_API_PASSPHRASE,
    COINBASE_API_SECRET, GEMINI_API_KEY, GEMINI_API_SECRET, S3_BUCKET, USER_STATS_CREDENTIAL,
    USER_STATS_URL,
};
use crate::infrastructure::config::settings::Config;

/// Environment variables reported by the check, with whether each one is
/// required under `config`.
fn variables(config: &Config) -> Vec<(&'static str, bool)> {
    vec![
        (COINBASE_API_KEY, config.coinbase.enabled),
        (COINBASE_API_SECRET, config.coinbase.enabled),
        (COINBASE_API_PASSPHRASE, config.coinbase.enabled),
        (GEMINI_API_KEY, config.gemini.enabled),
        (GEMINI_API_SECRET, config.gemini.enabled),
        (ADS_SERVER_STATS_CREDENTIAL, false),
        (USER_STATS_URL, false),
        (USER_STATS_CREDENTIAL, false),
        (S3_BUCKET, false),
    ]
}

fn is_set(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| !value.trim().is_empty())
}

/// Validate the configuration and report which credentials are present.
///
/// # Errors
///
/// Returns an error when an enabled venue is missing a credential.
pub fn execute(config_path: &Path, config: &Config) -> Result<()> {
    output::section("Configuration Check");
    if config_path.exists() {
        output::field("Config", config_path.display());
    } else {
        output::field("Config", output::muted("defaults (no file)"));
    }
    output::success("Configuration is valid");

    output::section("Snapshot");
    output::field("Source", &config.snapshot.source);
    output::field("Output", &config.snapshot.output);
    output::field("Venues", config.enabled_venues().join(", "));
    output::field("Cutover", &config.users.cutover_month);

    output::section("Environment");
    for (name, required) in variables(config) {
        if is_set(name) {
            output::field(name, output::highlight("set"));
        } else if required {
            output::warning(&format!("{name} is not set"));
        } else {
            output::field(name, output::muted("not set"));
        }
    }

    Credentials::from_env(config)?;
    output::success("Configuration check complete");

    Ok(())
}
