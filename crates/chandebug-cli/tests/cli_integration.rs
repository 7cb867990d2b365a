//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command with a clean debug environment
fn cli_cmd() -> Command {
    let mut cmd = Command::cargo_bin("chandebug").expect("Failed to find chandebug binary");
    cmd.env_remove("DEBUG")
        .env_remove("DEBUG_HIDE_DATE")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn test_check_with_filter_flag() {
    cli_cmd()
        .args(["--filter", "*,-verbose*", "check", "verbose:sql", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verbose:sql: disabled"))
        .stdout(predicate::str::contains("other: enabled"));
}

#[test]
fn test_check_reads_debug_env() {
    cli_cmd()
        .env("DEBUG", "api,-api:db")
        .args(["check", "api", "api:db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api: enabled"))
        .stdout(predicate::str::contains("api:db: disabled"));
}

#[test]
fn test_check_without_filter() {
    cli_cmd()
        .args(["check", "api", "boot*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api: disabled"))
        .stdout(predicate::str::contains("boot*: enabled"));
}

#[test]
fn test_check_requires_names() {
    cli_cmd().arg("check").assert().failure();
}

// ============================================================================
// Elapsed Command Tests
// ============================================================================

#[test]
fn test_elapsed_formatting() {
    cli_cmd()
        .args(["elapsed", "999", "1000", "1500", "61000", "3700000"])
        .assert()
        .success()
        .stdout("999ms\n1s\n2s\n1m\n1h\n");
}

#[test]
fn test_elapsed_rejects_non_numbers() {
    cli_cmd().args(["elapsed", "soon"]).assert().failure();
}

// ============================================================================
// Emit Command Tests
// ============================================================================

#[test]
fn test_emit_enabled_channel_with_date() {
    cli_cmd()
        .args(["--filter", "deploy", "emit", "deploy", "fetching"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z deploy fetching\n$").unwrap());
}

#[test]
fn test_emit_hide_date() {
    cli_cmd()
        .args(["--filter", "deploy", "--hide-date", "emit", "deploy", "one", "two"])
        .assert()
        .success()
        .stdout("deploy one\ndeploy two\n");
}

#[test]
fn test_emit_hide_date_from_env() {
    cli_cmd()
        .env("DEBUG", "deploy*")
        .env("DEBUG_HIDE_DATE", "1")
        .args(["emit", "deploy:db", "migrated"])
        .assert()
        .success()
        .stdout("deploy:db migrated\n");
}

#[test]
fn test_emit_disabled_channel_prints_nothing() {
    cli_cmd()
        .args(["emit", "quiet", "hidden"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_emit_colour_always() {
    cli_cmd()
        .args(["--filter", "tty", "--colour", "always", "emit", "tty", "first"])
        .assert()
        .success()
        .stdout("\x1b[38;5;20;1mtty\x1b[39;22m first\n");
}

#[test]
fn test_emit_with_history() {
    cli_cmd()
        .args([
            "--filter",
            "job",
            "--hide-date",
            "--history-capacity",
            "2",
            "emit",
            "job",
            "a",
            "b",
            "c",
            "--history",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("History (2 records):"))
        .stdout(predicate::str::contains(" job b"))
        .stdout(predicate::str::contains(" job c"))
        .stdout(predicate::str::contains(" job a").not());
}

#[test]
fn test_invalid_colour_mode() {
    cli_cmd()
        .args(["--colour", "sometimes", "check", "api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sometimes"));
}
