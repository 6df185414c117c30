#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These run without network access: every translating invocation either
//! fails before dispatch or has nothing to translate.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs `qtr` against an empty config directory.
#[allow(deprecated)]
fn qtr(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qtr").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Line-by-line translation CLI"))
        .stdout(predicate::str::contains("--from"))
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--discipline"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("hi-IN"))
        .stdout(predicate::str::contains("Odia"))
        .stdout(predicate::str::contains("auto"));
}

#[test]
fn test_providers_list_without_config_shows_builtin_chain() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in"))
        .stdout(predicate::str::contains("1. google"))
        .stdout(predicate::str::contains("2. mymemory"));
}

#[test]
fn test_providers_show_details() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .args(["providers", "mymemory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/mymemory/"))
        .stdout(predicate::str::contains("text"));
}

#[test]
fn test_providers_show_nonexistent() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .args(["providers", "nonexistent_provider_xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_language_code() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .args(["--to", "invalid_lang_xyz"])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language code"));
}

#[test]
fn test_missing_target_language() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'to'"));
}

#[test]
fn test_unknown_provider_rejected() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .args(["--to", "hi", "--provider", "deepl"])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provider 'deepl' not found"));
}

#[test]
fn test_whitespace_input_prints_nothing() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .args(["--to", "hi-IN"])
        .write_stdin("  \n\t\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_empty_input_prints_nothing() {
    let home = TempDir::new().unwrap();
    qtr(&home)
        .args(["--to", "hi-IN"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
