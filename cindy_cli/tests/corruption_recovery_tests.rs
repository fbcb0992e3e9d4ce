//! Corruption recovery tests for the cindy binary.
//!
//! These tests verify the system can handle:
//! - Corrupted session files
//! - Corrupted last-targets files
//! - Empty and truncated files
//! - Blobs written by older versions
//! - Blobs whose counters are inconsistent

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cindy"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    temp_dir
}

#[test]
fn test_corrupted_session_file() {
    let temp_dir = setup_test_dir();
    let session_path = temp_dir.path().join("data/cindy_workout.json");
    fs::write(&session_path, "{ invalid json }}}}").expect("Failed to write corrupted session");

    cli(temp_dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout in progress"));

    // A new workout replaces the unreadable blob
    cli(temp_dir.path())
        .args(["start", "--pullups", "3", "--pushups", "3", "--squats", "3"])
        .assert()
        .success();

    let contents = fs::read_to_string(&session_path).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(saved["pullups"]["current"], 3);
}

#[test]
fn test_empty_session_file() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("data/cindy_workout.json"), "").unwrap();

    cli(temp_dir.path())
        .args(["rep", "pullups"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no workout in progress"));
}

#[test]
fn test_truncated_session_file() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("data/cindy_workout.json"),
        r#"{"pullups":{"total":10,"current":4,"originalTarget":10},"pushups":{"tot"#,
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout in progress"));
}

#[test]
fn test_corrupted_last_targets_file() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("data/cindy_last_reps.json"),
        "invalid json",
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("new")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout in progress"));

    // Falls back to configured defaults
    cli(temp_dir.path()).arg("start").assert().success();
    let contents = fs::read_to_string(temp_dir.path().join("data/cindy_workout.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(saved["pullups"]["originalTarget"], 20);
}

#[test]
fn test_session_without_timer_fields() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("data/cindy_workout.json"),
        r#"{
            "pullups": {"total": 10, "current": 4, "originalTarget": 10},
            "pushups": {"total": 20, "current": 20, "originalTarget": 20},
            "squats": {"total": 30, "current": 30, "originalTarget": 30}
        }"#,
    )
    .unwrap();

    cli(temp_dir.path())
        .args(["rep", "pullups", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0:00"));

    let contents = fs::read_to_string(temp_dir.path().join("data/cindy_workout.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(saved["pullups"]["current"], 0);
    assert_eq!(saved["isTimerPaused"], true);
}

#[test]
fn test_session_with_inconsistent_counters() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("data/cindy_workout.json"),
        r#"{
            "pullups": {"total": 1, "current": 5, "originalTarget": 1},
            "pushups": {"total": 2, "current": 2, "originalTarget": 2},
            "squats": {"total": 3, "current": 3, "originalTarget": 3}
        }"#,
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("complete")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no workout in progress"));

    cli(temp_dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout in progress"));

    assert!(!temp_dir.path().join("data/cindy_last_reps.json").exists());
}
