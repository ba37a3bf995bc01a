//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.
//!
//! # Coverage Exclusion
//! These tests are skipped during coverage runs because the binary is not
//! rebuilt with instrumentation there.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// `sheets` command rooted in a scratch directory
fn sheets(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sheets").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("SHEETS_DATA_DIR")
        .env_remove("SHEETS_EXPORT_DIR")
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--export-dir")
        .arg(dir.path());
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("sheets").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheets"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("sheets").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheets"));
}

#[test]
fn test_download_help() {
    let mut cmd = Command::cargo_bin("sheets").unwrap();
    cmd.args(["download", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sheet1"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EDITING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_show_fresh_sheet() {
    let dir = TempDir::new().unwrap();
    sheets(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 rows x 5 columns"))
        .stdout(predicate::str::contains("| A "))
        .stdout(predicate::str::contains("| E "));
}

#[test]
fn test_set_persists_between_runs() {
    let dir = TempDir::new().unwrap();

    sheets(&dir)
        .args(["set", "B3", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B3 = \"hello\""));

    let stored = fs::read_to_string(dir.path().join("data").join("gridData.json")).unwrap();
    assert!(stored.contains("hello"));

    sheets(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"));
}

#[test]
fn test_set_beyond_column_e_is_ignored() {
    let dir = TempDir::new().unwrap();

    sheets(&dir)
        .args(["set", "F1", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("beyond column E"));

    assert!(!dir.path().join("data").join("gridData.json").exists());
}

#[test]
fn test_set_last_cell_grows() {
    let dir = TempDir::new().unwrap();

    sheets(&dir)
        .args(["set", "E10", "more"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added a column"));
}

#[test]
fn test_set_invalid_reference_fails() {
    let dir = TempDir::new().unwrap();

    sheets(&dir)
        .args(["set", "B0", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidCellRef"));
}

#[test]
fn test_clear_keeps_corner() {
    let dir = TempDir::new().unwrap();

    sheets(&dir).args(["set", "A1", "corner"]).assert().success();
    sheets(&dir).args(["set", "C4", "gone"]).assert().success();
    sheets(&dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sheet cleared"));

    let stored = fs::read_to_string(dir.path().join("data").join("gridData.json")).unwrap();
    assert!(stored.starts_with(r#"[["corner","","","",""],[null,"#));
    assert!(!stored.contains("gone"));
}

#[test]
fn test_reset() {
    let dir = TempDir::new().unwrap();

    sheets(&dir).args(["set", "A1", "x"]).assert().success();
    sheets(&dir)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sheet reset"));

    let stored = fs::read_to_string(dir.path().join("data").join("gridData.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(value, serde_json::json!(vec![vec![""; 5]; 10]));
}

// ═══════════════════════════════════════════════════════════════════════════
// DOWNLOAD AND IMPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_download_default_path() {
    let dir = TempDir::new().unwrap();

    sheets(&dir).args(["set", "A1", "x"]).assert().success();
    sheets(&dir)
        .arg("download")
        .assert()
        .success()
        .stdout(predicate::str::contains("downloaded successfully"));

    assert!(dir.path().join("sheets.xlsx").exists());
}

#[test]
fn test_download_custom_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("reports").join("q1.xlsx");

    sheets(&dir)
        .arg("download")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
}

#[test]
fn test_download_failure_is_not_fatal() {
    let dir = TempDir::new().unwrap();

    // A directory where the file should go makes the write fail
    sheets(&dir)
        .arg("download")
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Download failed"));
}

#[test]
fn test_import_round_trip() {
    let source = TempDir::new().unwrap();
    sheets(&source).args(["set", "D2", "imported"]).assert().success();
    sheets(&source).arg("download").assert().success();

    let target = TempDir::new().unwrap();
    sheets(&target)
        .arg("import")
        .arg(source.path().join("sheets.xlsx"))
        .assert()
        .success()
        .stdout(predicate::str::contains("10 rows x 5 columns"));

    sheets(&target)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("imported"));
}

#[test]
fn test_import_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    sheets(&dir)
        .args(["import", "no-such-file.xlsx"])
        .assert()
        .failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// SHELL
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_shell_session() {
    let dir = TempDir::new().unwrap();

    sheets(&dir)
        .arg("shell")
        .write_stdin("set A1 one\nset B1 two\nshow\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("A1 = \"one\""))
        .stdout(predicate::str::contains("1 | one"));

    let stored = fs::read_to_string(dir.path().join("data").join("gridData.json")).unwrap();
    assert!(stored.starts_with(r#"[["one","two","#));
}
