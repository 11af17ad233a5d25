//! Persistence tests for bmilog.
//!
//! These tests verify that records written by one process invocation:
//! - Survive into later invocations (durability)
//! - Keep their insert order, even within the same second
//! - Stay isolated per user when invocations interleave

use assert_cmd::Command;
use tempfile::TempDir;

fn cli() -> Command {
    Command::cargo_bin("bmilog").expect("Failed to find bmilog binary")
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn add(data_dir: &std::path::Path, user: &str, weight: &str) {
    cli()
        .args(["add", "--user", user, "--weight", weight, "--height", "175"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
}

fn history_json(data_dir: &std::path::Path, user: &str) -> serde_json::Value {
    let output = cli()
        .args(["history", "--user", user, "--json"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    serde_json::from_str(stdout.trim()).expect("invalid JSON from history --json")
}

#[test]
fn test_records_survive_across_invocations() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Each CLI call is a separate process with its own store handle
    add(&data_dir, "alice", "70");

    let points = history_json(&data_dir, "alice");
    assert_eq!(points.as_array().unwrap().len(), 1);

    add(&data_dir, "alice", "72");

    let points = history_json(&data_dir, "alice");
    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["bmi"], 22.86);
    assert_eq!(points[1]["bmi"], 23.51);
}

#[test]
fn test_rapid_appends_keep_insert_order() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // These all land within a second or two of each other; ordering must
    // come from insert order, not just the second-precision timestamps
    let weights = ["60", "64", "62", "68", "66"];
    for weight in weights {
        add(&data_dir, "alice", weight);
    }

    let points = history_json(&data_dir, "alice");
    let bmis: Vec<f64> = points
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["bmi"].as_f64().unwrap())
        .collect();

    // 60..68 kg at 175 cm
    assert_eq!(bmis, vec![19.59, 20.9, 20.24, 22.2, 21.55]);
}

#[test]
fn test_interleaved_users_stay_isolated() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    add(&data_dir, "alice", "70");
    add(&data_dir, "bob", "95");
    add(&data_dir, "alice", "71");
    add(&data_dir, "bob", "94");

    let alice = history_json(&data_dir, "alice");
    let alice = alice.as_array().unwrap();
    assert_eq!(alice.len(), 2);
    assert_eq!(alice[0]["bmi"], 22.86);
    assert_eq!(alice[1]["bmi"], 23.18);

    let bob = history_json(&data_dir, "bob");
    let bob = bob.as_array().unwrap();
    assert_eq!(bob.len(), 2);
    assert_eq!(bob[0]["bmi"], 31.02);
    assert_eq!(bob[1]["bmi"], 30.69);
}

#[test]
fn test_failed_add_leaves_existing_records_intact() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    add(&data_dir, "alice", "70");

    // Rejected input must not disturb what is already stored
    cli()
        .args(["add", "--user", "alice", "--weight", "0", "--height", "175"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure();

    let points = history_json(&data_dir, "alice");
    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["bmi"], 22.86);
}

#[test]
fn test_database_file_lives_in_data_dir() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("nested").join("data");

    add(&data_dir, "alice", "70");

    // The data directory is created on demand, one database file inside
    assert!(data_dir.join("bmi_data.db").exists());
}
