//! Smoke tests for the tcalc binary
//!
//! These run the real executable with piped stdin, so the TUI is never
//! entered and output stays uncolored.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the tcalc binary
fn tcalc() -> Command {
    let mut cmd = Command::cargo_bin("tcalc").expect("tcalc binary should exist");
    cmd.env_remove("TCALC_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    tcalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    tcalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transcript"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("eval"));
}

#[test]
fn test_tui_without_terminal_fails_cleanly() {
    tcalc()
        .arg("tui")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Terminal error"));
}

// ============================================================================
// Repl Tests
// ============================================================================

#[test]
fn test_repl_piped_reads_like_a_transcript() {
    tcalc()
        .args(["repl", "--color", "never"])
        .write_stdin("2+2\n")
        .assert()
        .success()
        .stdout(">>> 2+2\n    4\n");
}

#[test]
fn test_repl_skips_blank_lines_and_records_errors() {
    tcalc()
        .args(["--color", "never", "repl"])
        .write_stdin("\n1/0\n   \nsqrt(9)\n")
        .assert()
        .success()
        .stdout(">>> 1/0\n    Error: Division by zero\n>>> sqrt(9)\n    3\n");
}

#[test]
fn test_repl_empty_input() {
    tcalc()
        .arg("repl")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// Eval Tests
// ============================================================================

#[test]
fn test_eval_text() {
    tcalc()
        .args(["eval", "42 * (3 + 7)", "2 > 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(">>> 42 * (3 + 7)\n    420"))
        .stdout(predicate::str::contains("    true"));
}

#[test]
fn test_eval_json() {
    let output = tcalc()
        .args(["eval", "10/4", "sin", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["result"], "2.5");
    assert_eq!(entries[1]["result"], "Error: Invalid Expression");
}

#[test]
fn test_eval_strict_fails_on_error() {
    tcalc()
        .args(["eval", "1/0", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Division by zero"))
        .stderr(predicate::str::contains("1 of 1 expressions failed"));
}

#[test]
fn test_eval_errors_without_strict_succeed() {
    tcalc().args(["eval", "1/0"]).assert().success();
}

#[test]
fn test_eval_requires_expressions() {
    tcalc().arg("eval").assert().failure();
}

#[test]
fn test_eval_output_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.txt");

    tcalc()
        .args(["eval", "2^10", "--output"])
        .arg(&path)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), ">>> 2^10\n    1024\n");
}

#[test]
fn test_verbose_summary_on_stderr() {
    tcalc()
        .args(["-v", "eval", "1", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("2 evaluated, 1 ok, 1 failed"));
}
