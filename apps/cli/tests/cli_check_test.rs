//! Integration tests for the `terra check` command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const REQUIRED_SUBDIRS: [&str; 4] =
    ["train/images", "train/labels", "valid/images", "valid/labels"];

fn create_dataset(base: &std::path::Path) {
    for sub in REQUIRED_SUBDIRS {
        fs::create_dir_all(base.join("datasets").join("eco-detection").join(sub)).unwrap();
    }
}

#[test]
fn test_check_missing_dataset_exits_with_precondition_code() {
    let temp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("terra").unwrap();
    cmd.current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("missing"))
        .stderr(predicate::str::contains("dataset not found"));
}

#[test]
fn test_check_reports_every_missing_subdir() {
    let temp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("terra").unwrap();
    let mut assert = cmd.current_dir(temp.path()).arg("check").assert().code(2);

    for sub in REQUIRED_SUBDIRS {
        assert = assert.stderr(predicate::str::contains(sub));
    }
}

#[test]
fn test_check_complete_layout_succeeds() {
    let temp = TempDir::new().unwrap();
    create_dataset(temp.path());

    let mut cmd = Command::cargo_bin("terra").unwrap();
    cmd.current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset layout is complete"))
        .stdout(predicate::str::contains("terra train"));
}

#[test]
fn test_check_partial_layout_flags_only_missing_dirs() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(
        temp.path().join("datasets").join("eco-detection").join("train").join("images"),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("terra").unwrap();
    cmd.current_dir(temp.path())
        .arg("check")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("✓ train/images"))
        .stdout(predicate::str::contains("✗ valid/images"));
}
