//! End-to-end tests for the `impacts` subcommand

#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = "Impact,Publishing version (from Pub)";

fn repeat(rows: &mut Vec<&'static str>, row: &'static str, n: usize) {
    for _ in 0..n {
        rows.push(row);
    }
}

/// v1.0: 18 comments (2 unrated, 17 impacts), v2.0: 14 comments (1 unrated,
/// 13 impacts)
///
/// With the default threshold of 10, "Typo/small error" (13) and "Influenced
/// our thinking" (12 across versions) survive; the rest fold into Other.
fn sample_rows() -> Vec<&'static str> {
    let mut rows = Vec::new();
    repeat(&mut rows, "Typo/small error,v1.0", 12);
    repeat(&mut rows, "Sparked new analysis,v1.0", 3);
    rows.push("\"Influenced our thinking, Typo/small error\",v1.0");
    repeat(&mut rows, ",v1.0", 2);
    repeat(&mut rows, "Influenced our thinking,v2.0", 11);
    repeat(&mut rows, "No real impact,v2.0", 2);
    rows.push(",v2.0");
    rows
}

fn write_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("impacts.csv");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    fs::write(&path, content).unwrap();
    path
}

// ============================================================
// Text report
// ============================================================

#[test]
fn test_impacts_text_report_sections() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &sample_rows());

    let mut cmd = Command::cargo_bin("pubstats").unwrap();
    cmd.arg("impacts").arg(&csv);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Statistics Before Grouping into 'Other' ===",
        ))
        .stdout(predicate::str::contains(
            "=== Statistics After Grouping into 'Other' ===",
        ))
        .stdout(predicate::str::contains("Comment and Impact Counts by Version:"))
        .stdout(predicate::str::is_match("Total Comments\\s+18\\s+14").unwrap())
        .stdout(predicate::str::is_match("Rated Comments\\s+16\\s+13").unwrap())
        .stdout(predicate::str::is_match("Total Impacts\\s+17\\s+13").unwrap())
        .stdout(predicate::str::contains("Sparked new analysis"))
        .stdout(predicate::str::contains("Other"));
}

// ============================================================
// Grouping behavior
// ============================================================

#[test]
fn test_impacts_threshold_folds_rare_labels() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &sample_rows());

    let mut cmd = Command::cargo_bin("pubstats").unwrap();
    cmd.arg("impacts").arg(&csv).arg("--format").arg("json");
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    // "Influenced our thinking" survives in v1.0 only via its v2.0 count
    let v1_after = value["after"][0]["impacts"].as_array().unwrap();
    assert_eq!(v1_after[0]["impact"], "Typo/small error");
    assert_eq!(v1_after[0]["count"], 13);
    assert!(v1_after
        .iter()
        .any(|i| i["impact"] == "Other" && i["count"] == 3));
    assert!(v1_after
        .iter()
        .any(|i| i["impact"] == "Influenced our thinking" && i["count"] == 1));
    // the pre-grouping listing keeps the raw label
    let v1_before = value["before"][0]["impacts"].as_array().unwrap();
    assert!(v1_before
        .iter()
        .any(|i| i["impact"] == "Sparked new analysis" && i["count"] == 3));
}

#[test]
fn test_impacts_manual_grouping() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &sample_rows());

    let mut cmd = Command::cargo_bin("pubstats").unwrap();
    cmd.arg("impacts")
        .arg(&csv)
        .arg("--grouping")
        .arg("manual")
        .arg("--other-impacts")
        .arg("Typo/small error")
        .arg("--format")
        .arg("json");
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let v1_after = value["after"][0]["impacts"].as_array().unwrap();
    assert!(v1_after
        .iter()
        .any(|i| i["impact"] == "Other" && i["count"] == 13));
    // manual mode leaves every unnamed label alone, rare or not
    assert!(v1_after
        .iter()
        .any(|i| i["impact"] == "Sparked new analysis" && i["count"] == 3));
    assert!(!v1_after.iter().any(|i| i["impact"] == "Typo/small error"));
}

// ============================================================
// Chart output
// ============================================================

#[test]
fn test_impacts_donut_chart_written() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &sample_rows());
    let svg_path = dir.path().join("impacts.svg");

    let mut cmd = Command::cargo_bin("pubstats").unwrap();
    cmd.arg("impacts").arg(&csv).arg("--chart").arg(&svg_path);
    cmd.assert().success();

    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Comment Impact Distribution by Version"));
    // donut centers carry per-version impact totals
    assert!(svg.contains("n = 17"));
    assert!(svg.contains("n = 13"));
}

#[test]
fn test_impacts_bar_chart_with_ordering_flags() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &sample_rows());
    let svg_path = dir.path().join("impacts.svg");

    let mut cmd = Command::cargo_bin("pubstats").unwrap();
    cmd.arg("impacts")
        .arg(&csv)
        .arg("--chart")
        .arg(&svg_path)
        .arg("--chart-type")
        .arg("bar")
        .arg("--sort-version")
        .arg("v2")
        .arg("--other-position")
        .arg("natural");
    cmd.assert().success();

    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("Percentage of Impacts (%)"));
    assert!(svg.contains("Publishing Version"));
}

// ============================================================
// JSON output
// ============================================================

#[test]
fn test_impacts_json_counts() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &sample_rows());

    let mut cmd = Command::cargo_bin("pubstats").unwrap();
    cmd.arg("impacts").arg(&csv).arg("--format").arg("json");
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["format"], "pubstats-impacts-v1");
    assert_eq!(value["counts"][0]["total_comments"], 18);
    assert_eq!(value["counts"][0]["unrated_comments"], 2);
    assert_eq!(value["counts"][1]["total_comments"], 14);
    assert_eq!(value["counts"][1]["total_impacts"], 13);
}

// ============================================================
// Failure modes
// ============================================================

#[test]
fn test_impacts_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "Impact\nTypo/small error").unwrap();

    let mut cmd = Command::cargo_bin("pubstats").unwrap();
    cmd.arg("impacts").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Publishing version (from Pub)"));
}
