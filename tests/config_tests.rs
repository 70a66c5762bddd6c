use std::fs;
use std::path::PathBuf;

use transparency::error::{ConfigError, Error};
use transparency::infrastructure::config::credentials::Credentials;
use transparency::infrastructure::config::settings::Config;

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("transparency.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn defaults_apply_when_the_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("missing.toml")).unwrap();

    assert_eq!(config.enabled_venues(), vec!["uphold", "gemini", "coinbase"]);
    assert_eq!(config.users.cutover_month, "2025-01");
    assert!(!config.snapshot.source.is_empty());
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[snapshot]
source = "previous.json"
output = "out/transparency.json"

[users]
cutover_month = "2024-06"

[gemini]
enabled = false

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.snapshot.source, "previous.json");
    assert_eq!(config.users.cutover_month, "2024-06");
    assert_eq!(config.enabled_venues(), vec!["uphold", "coinbase"]);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn config_rejects_malformed_cutover_month() {
    let result = Config::parse_toml("[users]\ncutover_month = \"January\"\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "users.cutover_month",
            ..
        }))
    ));
}

#[test]
fn config_rejects_zero_timeout() {
    let result = Config::parse_toml("[http]\ntimeout_ms = 0\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "http.timeout_ms",
            ..
        }))
    ));
}

#[test]
fn config_rejects_empty_snapshot_output() {
    let result = Config::parse_toml("[snapshot]\noutput = \"\"\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField {
            field: "snapshot.output"
        }))
    ));
}

#[test]
fn unreadable_toml_is_a_parse_error() {
    let result = Config::parse_toml("[snapshot\nsource = 1");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn disabled_venues_need_no_credentials() {
    let config =
        Config::parse_toml("[coinbase]\nenabled = false\n[gemini]\nenabled = false\n").unwrap();
    let credentials = Credentials::resolve(&config, |_| None).unwrap();

    assert!(credentials.coinbase.is_none());
    assert!(credentials.gemini.is_none());
    assert!(credentials.s3_bucket.is_none());
}

#[test]
fn enabled_venue_without_credentials_is_rejected() {
    let config = Config::parse_toml("[coinbase]\nenabled = false\n").unwrap();
    let result = Credentials::resolve(&config, |_| None);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingCredential {
            provider: "gemini",
            ..
        }))
    ));
}
