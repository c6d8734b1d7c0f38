//! CLI options interaction tests
//!
//! Validate flag parsing, conflicts and configuration errors without
//! exercising a full measurement run where possible.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    Command::cargo_bin("mlb").unwrap()
}

#[test]
fn test_help_lists_options() {
    create_test_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--delay-ms"))
        .stdout(predicate::str::contains("--size"))
        .stdout(predicate::str::contains("--session"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_version_output() {
    create_test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("map-latency-bench"));
}

#[test]
fn test_invalid_size_class_rejected() {
    create_test_cmd()
        .arg("--size")
        .arg("3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("size"));
}

#[test]
fn test_zero_count_rejected() {
    create_test_cmd()
        .arg("--count")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run count"));
}

#[test]
fn test_conflicting_color_flags_rejected() {
    create_test_cmd()
        .arg("--color")
        .arg("--no-color")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--color"));
}

#[test]
fn test_fresh_conflicts_with_session() {
    create_test_cmd()
        .arg("--fresh")
        .arg("--session")
        .arg("room-1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--fresh"));
}

#[test]
fn test_blank_session_rejected() {
    create_test_cmd()
        .arg("--session")
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("blank"));
}

#[test]
fn test_excessive_delay_rejected() {
    create_test_cmd()
        .arg("--delay-ms")
        .arg("999999")
        .assert()
        .failure()
        .stderr(predicate::str::contains("delay"));
}
