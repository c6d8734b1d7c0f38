//! End-to-end integration tests for the map latency benchmark
//!
//! These run the real binary against the in-process loopback map with
//! small write counts and short delays so a full run stays fast.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    Command::cargo_bin("mlb").unwrap()
}

/// Session file path inside a fresh temporary directory
fn temp_session(temp_dir: &TempDir) -> String {
    temp_dir
        .path()
        .join("session")
        .to_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_basic_run_reports_statistics() {
    let temp_dir = TempDir::new().unwrap();

    create_test_cmd()
        .arg("--count")
        .arg("3")
        .arg("--delay-ms")
        .arg("1")
        .arg("--session-file")
        .arg(temp_session(&temp_dir))
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Map Latency Bench"))
        .stdout(predicate::str::contains("Median"))
        .stdout(predicate::str::contains("Samples"))
        .stdout(predicate::str::contains("ms"));
}

#[test]
fn test_session_persisted_between_runs() {
    let temp_dir = TempDir::new().unwrap();
    let session_file = temp_session(&temp_dir);

    create_test_cmd()
        .arg("--count")
        .arg("2")
        .arg("--delay-ms")
        .arg("1")
        .arg("--session-file")
        .arg(&session_file)
        .arg("--no-color")
        .assert()
        .success();

    let first_id = fs::read_to_string(&session_file).unwrap().trim().to_string();
    assert!(!first_id.is_empty());

    // A second run joins the same map
    create_test_cmd()
        .arg("--count")
        .arg("2")
        .arg("--delay-ms")
        .arg("1")
        .arg("--session-file")
        .arg(&session_file)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains(&first_id));
}

#[test]
fn test_fresh_creates_new_map() {
    let temp_dir = TempDir::new().unwrap();
    let session_file = temp_session(&temp_dir);
    fs::write(&session_file, "stale-map-id\n").unwrap();

    create_test_cmd()
        .arg("--count")
        .arg("2")
        .arg("--delay-ms")
        .arg("1")
        .arg("--session-file")
        .arg(&session_file)
        .arg("--fresh")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("stale-map-id").not());

    let new_id = fs::read_to_string(&session_file).unwrap().trim().to_string();
    assert_ne!(new_id, "stale-map-id");
}

#[test]
fn test_explicit_session_joined() {
    let temp_dir = TempDir::new().unwrap();

    create_test_cmd()
        .arg("--count")
        .arg("2")
        .arg("--delay-ms")
        .arg("1")
        .arg("--session-file")
        .arg(temp_session(&temp_dir))
        .arg("--session")
        .arg("room-e2e")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("room-e2e"));
}

#[test]
fn test_json_export_contains_record_and_traces() {
    let temp_dir = TempDir::new().unwrap();
    let json_path = temp_dir.path().join("out.json");

    create_test_cmd()
        .arg("--count")
        .arg("4")
        .arg("--delay-ms")
        .arg("1")
        .arg("--session-file")
        .arg(temp_session(&temp_dir))
        .arg("--json")
        .arg(json_path.to_str().unwrap())
        .arg("--no-color")
        .assert()
        .success();

    let content = fs::read_to_string(&json_path).unwrap();
    let parsed: Value = serde_json::from_str(&content).unwrap();

    assert_eq!(parsed["record"]["durations"].as_array().unwrap().len(), 4);
    assert!(parsed["record"]["summary"]["median"].is_number());
    assert_eq!(parsed["chart"]["scatter"]["type"], "scatter");
    assert_eq!(parsed["chart"]["scatter"]["mode"], "markers");
    assert_eq!(parsed["chart"]["layout"]["yaxis"]["title"]["text"], "Latency (ms)");
}

#[test]
fn test_size_class_payload_run() {
    let temp_dir = TempDir::new().unwrap();

    create_test_cmd()
        .arg("--count")
        .arg("2")
        .arg("--delay-ms")
        .arg("1")
        .arg("--size")
        .arg("5")
        .arg("--session-file")
        .arg(temp_session(&temp_dir))
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("bytes"));
}
