//! CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn sample_model() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../core/tests/fixtures/utopia.txt")
}

fn osydata() -> Command {
    Command::cargo_bin("osydata").unwrap()
}

#[test]
fn convert_writes_bundle_json_to_stdout() {
    let output = osydata()
        .arg("convert")
        .arg(sample_model())
        .output()
        .unwrap();
    assert!(output.status.success());

    let bundle: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bundle["genData"]["osy-mo"], "2");
    assert_eq!(bundle["genData"]["osy-tech"][0]["TechId"], "T_0");
    assert!(bundle["RYT"]["CC"]["SC_0"].is_array());
}

#[test]
fn convert_reports_diagnostics_on_stderr() {
    osydata()
        .arg("convert")
        .arg(sample_model())
        .assert()
        .success()
        .stderr(predicate::str::contains("1 unknown params"));
}

#[test]
fn quiet_suppresses_diagnostics() {
    osydata()
        .arg("convert")
        .arg("--quiet")
        .arg(sample_model())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn convert_populates_a_case_directory() {
    let dir = tempfile::tempdir().unwrap();
    osydata()
        .arg("convert")
        .arg(sample_model())
        .arg("--case-dir")
        .arg(dir.path())
        .assert()
        .success();

    for doc in ["genData", "RYT", "RYTCM", "RYCn"] {
        assert!(dir.path().join(format!("{}.json", doc)).exists());
    }
    let gen: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("genData.json")).unwrap()).unwrap();
    assert_eq!(gen["osy-scenarios"][0]["ScenarioId"], "SC_0");
}

#[test]
fn empty_input_is_a_user_facing_error() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.txt");
    std::fs::write(&empty, "# only comments\n").unwrap();

    osydata()
        .arg("convert")
        .arg(&empty)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no set or param declarations"));
}

#[test]
fn missing_file_fails_cleanly() {
    osydata()
        .arg("convert")
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn inspect_summarizes_structure() {
    osydata()
        .arg("inspect")
        .arg(sample_model())
        .assert()
        .success()
        .stdout(predicate::str::contains("TECHNOLOGY: 5 members"))
        .stdout(predicate::str::contains("CapitalCost"));
}

#[test]
fn inspect_emits_json_when_asked() {
    let output = osydata()
        .arg("--output")
        .arg("json")
        .arg("inspect")
        .arg(sample_model())
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["sets"]["YEAR"], 3);
}
