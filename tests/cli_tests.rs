use std::fs;
use std::path::PathBuf;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

const CREDENTIAL_VARS: &[&str] = &[
    "COINBASE_API_KEY",
    "COINBASE_API_SECRET",
    "COINBASE_API_PASSPHRASE",
    "GEMINI_API_KEY",
    "GEMINI_API_SECRET",
    "ADS_SERVER_STATS_CREDENTIAL",
    "USER_STATS_URL",
    "USER_STATS_CREDENTIAL",
    "S3_BUCKET",
];

const NO_VENUES: &str = "[uphold]\nenabled = false\n[gemini]\nenabled = false\n[coinbase]\nenabled = false\n";

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("transparency.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

/// The binary, run from `dir` with every credential variable cleared.
fn transparency(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_transparency"));
    cmd.current_dir(dir.path());
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[users]\ncutover_month = \"2025\"\n");

    let output = transparency(&dir)
        .args(["check", "config", "--config"])
        .arg(&path)
        .output()
        .expect("run transparency");

    assert!(!output.status.success(), "Expected nonzero exit code");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{stdout}{stderr}");
    assert!(
        combined.contains("users.cutover_month"),
        "Expected error message about invalid config.\nstdout: {stdout}\nstderr: {stderr}"
    );
}

#[test]
fn check_config_fails_when_venue_credentials_are_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[uphold]\nenabled = false\n[coinbase]\nenabled = false\n");

    transparency(&dir)
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn check_config_passes_without_venues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, NO_VENUES);

    transparency(&dir)
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration check complete"));
}

#[test]
fn check_config_emits_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, NO_VENUES);

    let output = transparency(&dir)
        .args(["--json", "check", "config", "--config"])
        .arg(&path)
        .output()
        .expect("run transparency");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let value: serde_json::Value = serde_json::from_str(line).expect("json line");
        assert!(value.get("type").is_some(), "missing type in {line}");
    }
}

#[test]
fn upload_without_bucket_fails_before_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, NO_VENUES);

    transparency(&dir)
        .args(["build", "--upload", "--no-save", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("S3_BUCKET"));

    assert!(!dir.path().join("transparency.json").exists());
}

#[test]
fn missing_subcommand_prints_usage() {
    let dir = tempfile::tempdir().unwrap();

    transparency(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
