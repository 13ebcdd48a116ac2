//! Integration tests for the `terra quick-test` command.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

struct Project {
    _temp: TempDir,
    base: PathBuf,
}

impl Project {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("training");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(base.join("../frontend/public/models")).unwrap();
        Self { _temp: temp, base }
    }

    /// Stub `yolo` that fabricates the artifact the toolchain would write
    /// next to the fetched pretrained weights (the base dir).
    fn write_stub_yolo(&self) -> PathBuf {
        let script = self.base.join("yolo");
        fs::write(&script, "#!/bin/sh\n: > yolov8n.onnx\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    fn terra(&self) -> Command {
        let mut cmd = Command::cargo_bin("terra").unwrap();
        cmd.current_dir(&self.base);
        cmd
    }
}

#[test]
fn test_quick_test_enumerates_undetectable_categories() {
    let project = Project::new();
    let stub = project.write_stub_yolo();

    let assert = project
        .terra()
        .arg("quick-test")
        .arg("--yolo-bin")
        .arg(&stub)
        .assert()
        .success()
        .stdout(predicate::str::contains("TESTING ONLY"))
        .stdout(predicate::str::contains("CANNOT detect"));

    let assert = ["tree", "solar_panel", "ev_charger", "recycling_bin", "reusable_bag"]
        .into_iter()
        .fold(assert, |a, label| a.stdout(predicate::str::contains(label)));

    // Overlapping generic classes are listed with their class indices.
    assert
        .stdout(predicate::str::contains("bicycle (class 1)"))
        .stdout(predicate::str::contains("potted_plant (class 58)"));
}

#[test]
fn test_quick_test_publishes_disposable_model() {
    let project = Project::new();
    let stub = project.write_stub_yolo();

    project
        .terra()
        .arg("quick-test")
        .arg("--yolo-bin")
        .arg(&stub)
        .assert()
        .success()
        .stdout(predicate::str::contains("Published to frontend"));

    assert!(project.base.join("../frontend/public/models/yolov8n-eco.onnx").is_file());
}

#[test]
fn test_quick_test_failure_propagates() {
    let project = Project::new();
    let stub = project.base.join("yolo");
    fs::write(&stub, "#!/bin/sh\nexit 1\n").unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    project
        .terra()
        .arg("quick-test")
        .arg("--yolo-bin")
        .arg(&stub)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("export"));
}
