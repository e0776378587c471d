//! Integration tests for the docoracle CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Test helper to get the CLI binary
fn docoracle_cmd() -> Command {
    Command::cargo_bin("docoracle").unwrap()
}

fn fixture_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("collections.yml")
}

#[test]
fn test_cli_help() {
    docoracle_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("translate"));
}

#[test]
fn test_print_default_config() {
    docoracle_cmd()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("equivalence_phrases"))
        .stdout(predicate::str::contains("result_placeholder"));
}

#[test]
fn test_init_config_refuses_to_overwrite() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("docoracle.yml");

    docoracle_cmd()
        .args(["init-config", "--output"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved"));
    assert!(config_path.exists());

    docoracle_cmd()
        .args(["init-config", "--output"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    docoracle_cmd()
        .args(["init-config", "--force", "--output"])
        .arg(&config_path)
        .assert()
        .success();
}

#[test]
fn test_validate_config() {
    let temp_dir = tempdir().unwrap();
    let valid = temp_dir.path().join("valid.yml");
    docoracle_cmd()
        .args(["init-config", "--output"])
        .arg(&valid)
        .assert()
        .success();

    docoracle_cmd()
        .args(["validate-config", "--config"])
        .arg(&valid)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"));

    let invalid = temp_dir.path().join("invalid.yml");
    fs::write(&invalid, "synthesis:\n  result_placeholder: ''\n  argument_placeholder: 'args[{index}]'\n  oracle_selection: last\n").unwrap();
    docoracle_cmd()
        .args(["validate-config", "--config"])
        .arg(&invalid)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}

#[test]
fn test_analyze_json_report() {
    let temp_dir = tempdir().unwrap();
    let out = temp_dir.path().join("report.json");

    docoracle_cmd()
        .arg("analyze")
        .arg(fixture_catalog())
        .args(["--format", "json", "--out"])
        .arg(&out)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["summary"]["members"], 6);
    assert_eq!(report["summary"]["resolved"], 4);
    assert_eq!(
        report["members"][0]["signature"],
        "java.util.ArrayList#isEmptyList()"
    );
    assert_eq!(
        report["members"][0]["matches"][1]["oracle"],
        "if (isEmpty()) {RESULT==isEmpty()}"
    );
}

#[test]
fn test_analyze_table_report() {
    docoracle_cmd()
        .arg("analyze")
        .arg(fixture_catalog())
        .assert()
        .success()
        .stdout(predicate::str::contains("RESULT==!isEmpty()"))
        .stdout(predicate::str::contains("no matching member"))
        .stdout(predicate::str::contains("6 members"));
}

#[cfg(unix)]
#[test]
fn test_analyze_with_rejecting_validator() {
    docoracle_cmd()
        .arg("analyze")
        .arg(fixture_catalog())
        .args(["--format", "json", "--validator-cmd", "sh", "-c", "exit 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resolved\": 0"))
        .stdout(predicate::str::contains("validation_rejected"));
}

#[test]
fn test_translate_with_comment_override() {
    docoracle_cmd()
        .arg("translate")
        .arg(fixture_catalog())
        .args([
            "--member",
            "java.util.ArrayList#count",
            "--comment",
            "Returns the same as size().",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("RESULT==size()"));
}

#[test]
fn test_translate_unknown_member_fails() {
    docoracle_cmd()
        .arg("translate")
        .arg(fixture_catalog())
        .args(["--member", "java.util.ArrayList#frobnicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot select member"));
}

#[test]
fn test_missing_catalog_fails() {
    docoracle_cmd()
        .args(["analyze", "does-not-exist.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}
