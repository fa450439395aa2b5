//! Integration tests for the `slotplan` binary.
//!
//! Exercised through `assert_cmd` and `predicates`: stdin/stdout piping,
//! file I/O, exit codes, and the validate/expand subcommands. Every run pins
//! `--today` so the past-day checks are reproducible.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the valid_plan.json fixture.
fn valid_plan_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid_plan.json")
}

/// Helper: path to the overlapping_plan.json fixture.
fn overlapping_plan_path() -> &'static str {
    concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/overlapping_plan.json"
    )
}

fn valid_plan() -> String {
    std::fs::read_to_string(valid_plan_path()).expect("valid_plan.json fixture must exist")
}

// ─────────────────────────────────────────────────────────────────────────────
// Validate subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_accepts_a_valid_plan() {
    Command::cargo_bin("slotplan")
        .unwrap()
        .args(["validate", "-i", valid_plan_path(), "--today", "2025-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan is valid"))
        .stdout(predicate::str::contains("2 day(s)"));
}

#[test]
fn validate_reads_from_stdin() {
    Command::cargo_bin("slotplan")
        .unwrap()
        .args(["validate", "--today", "2025-06-01"])
        .write_stdin(valid_plan())
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan is valid"));
}

#[test]
fn validate_reports_overlap_with_both_fields_tagged() {
    Command::cargo_bin("slotplan")
        .unwrap()
        .args([
            "validate",
            "-i",
            overlapping_plan_path(),
            "--today",
            "2025-06-01",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Plan is invalid"))
        .stderr(predicate::str::contains("shifts[1].startTime"))
        .stderr(predicate::str::contains("shifts[0].endTime"))
        .stderr(predicate::str::contains("overlaps"));
}

#[test]
fn validate_rejects_past_dates() {
    Command::cargo_bin("slotplan")
        .unwrap()
        .args(["validate", "-i", valid_plan_path(), "--today", "2025-06-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in the past"));
}

#[test]
fn validate_rejects_malformed_json() {
    Command::cargo_bin("slotplan")
        .unwrap()
        .args(["validate", "--today", "2025-06-01"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse plan JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Expand subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_emits_the_full_request_list() {
    let output = Command::cargo_bin("slotplan")
        .unwrap()
        .args(["expand", "-i", valid_plan_path(), "--today", "2025-06-01"])
        .output()
        .unwrap();

    assert!(output.status.success());

    let requests: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let requests = requests.as_array().unwrap();

    // 2 dates × 1 shift × 6 slots × 2 weeks.
    assert_eq!(requests.len(), 24);
    assert_eq!(
        requests[0]["startTime"].as_str().unwrap(),
        "2025-06-02T08:00:00Z"
    );
    // Index 12 opens week 1: the first date shifted by 7 days.
    assert_eq!(
        requests[12]["startTime"].as_str().unwrap(),
        "2025-06-09T08:00:00Z"
    );
    assert_eq!(requests[0]["slotDurationInMinutes"].as_u64().unwrap(), 30);
}

#[test]
fn expand_writes_to_a_file() {
    let output_path = "/tmp/slotplan-test-expand-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("slotplan")
        .unwrap()
        .args([
            "expand",
            "-i",
            valid_plan_path(),
            "-o",
            output_path,
            "--today",
            "2025-06-01",
        ])
        .assert()
        .success();

    let written = std::fs::read_to_string(output_path).expect("output file must exist");
    let requests: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(requests.as_array().unwrap().len(), 24);

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn expand_summary_counts_slots_per_day() {
    Command::cargo_bin("slotplan")
        .unwrap()
        .args([
            "expand",
            "-i",
            valid_plan_path(),
            "--summary",
            "--today",
            "2025-06-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-06-02  6 slot(s)"))
        .stdout(predicate::str::contains("2025-06-09  6 slot(s)"))
        .stdout(predicate::str::contains("Total: 24 slot(s)"));
}

#[test]
fn expand_refuses_an_invalid_plan() {
    Command::cargo_bin("slotplan")
        .unwrap()
        .args([
            "expand",
            "-i",
            overlapping_plan_path(),
            "--today",
            "2025-06-01",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Plan is invalid"));
}
