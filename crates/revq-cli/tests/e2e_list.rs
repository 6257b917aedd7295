//! E2E tests for `rq list` and `rq show` over a snapshot file.
//!
//! Each test runs the binary as a subprocess against a snapshot written to a
//! temp directory, with config redirected there so a developer's real config
//! can't leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;

fn rq_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rq").expect("binary builds");
    cmd.current_dir(dir);
    cmd.env("XDG_CONFIG_HOME", dir.join("config"));
    cmd.env("REVQ_LOG", "error");
    cmd
}

fn write_snapshot(dir: &Path, records: &Value) -> std::path::PathBuf {
    let path = dir.join("homeworks.json");
    std::fs::write(&path, serde_json::to_vec(records).expect("serializes")).expect("writes");
    path
}

fn record(key: &str, status: &str, summary: &str) -> Value {
    json!({
        "issue_key": key,
        "lesson_name": "Sprint finale: delivery service",
        "summary": summary,
        "cohort": "16",
        "status": status,
        "status_updated": "2020-09-23T22:14:37.658+0000",
        "description": "",
        "number": 1,
        "course": "backend-developer",
    })
}

#[test]
fn list_json_shows_open_tickets_sorted_by_status() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(
        dir.path(),
        &json!([
            record("PCR-3", "closed", "[1] Ada L"),
            record("PCR-1", "open", "[2] Bob M"),
            record("PCR-2", "inReview", "[3] Cyd N"),
        ]),
    );

    let output = rq_cmd(dir.path())
        .args(["list", "--file"])
        .arg(&snapshot)
        .arg("--json")
        .output()
        .expect("runs");
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let keys: Vec<&str> = parsed
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v["issue_key"].as_str().expect("key"))
        .collect();
    // Closed is filtered out by default; in-review sorts before open.
    assert_eq!(keys, ["PCR-2", "PCR-1"]);
}

#[test]
fn list_all_includes_resolved_tickets() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(
        dir.path(),
        &json!([
            record("PCR-3", "closed", "[1] Ada L"),
            record("PCR-1", "open", "[2] Bob M"),
        ]),
    );

    let output = rq_cmd(dir.path())
        .args(["list", "--all", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(parsed.as_array().expect("array").len(), 2);
}

fn listed_keys(output: &std::process::Output) -> Vec<String> {
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    parsed
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v["issue_key"].as_str().expect("key").to_string())
        .collect()
}

#[test]
fn resolved_filter_shows_only_finished_tickets() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(
        dir.path(),
        &json!([
            record("PCR-1", "open", "[2] Bob M"),
            record("PCR-2", "resolved", "[3] Cyd N"),
            record("PCR-3", "closed", "[1] Ada L"),
            record("PCR-4", "onTheSideOfUser", "[4] Dee O"),
        ]),
    );

    let output = rq_cmd(dir.path())
        .args(["list", "--resolved", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    // Only resolved/closed survive, in status-ordinal order.
    assert_eq!(listed_keys(&output), ["PCR-2", "PCR-3"]);
}

#[test]
fn cohort_and_problem_filters_narrow_the_table() {
    let dir = TempDir::new().expect("tempdir");
    let mut other_cohort = record("PCR-2", "open", "[2] Cyd N");
    other_cohort["cohort"] = json!("7");
    let snapshot = write_snapshot(
        dir.path(),
        &json!([
            record("PCR-1", "open", "[2] Bob M"),
            other_cohort,
            record("PCR-3", "open", "[5] Ada L"),
        ]),
    );

    let output = rq_cmd(dir.path())
        .args(["list", "--cohort", "7", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(listed_keys(&output), ["PCR-2"]);

    let output = rq_cmd(dir.path())
        .args(["list", "--problem", "5", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(listed_keys(&output), ["PCR-3"]);
}

#[test]
fn last_keeps_only_the_sorted_tail() {
    let dir = TempDir::new().expect("tempdir");
    let mut first = record("PCR-1", "open", "[1] Ada L");
    first["status_updated"] = json!("2020-09-21T10:00:00.000+0000");
    let mut second = record("PCR-2", "open", "[2] Bob M");
    second["status_updated"] = json!("2020-09-22T10:00:00.000+0000");
    let mut third = record("PCR-3", "open", "[3] Cyd N");
    third["status_updated"] = json!("2020-09-23T10:00:00.000+0000");
    // Input order is shuffled; the tail is taken after sorting.
    let snapshot = write_snapshot(dir.path(), &json!([second, third, first]));

    let output = rq_cmd(dir.path())
        .args(["list", "-n", "1", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    // All open: sorted by deadline ascending, so the tail is the latest one.
    assert_eq!(listed_keys(&output), ["PCR-3"]);

    let output = rq_cmd(dir.path())
        .args(["list", "--last", "2", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(listed_keys(&output), ["PCR-2", "PCR-3"]);
}

#[test]
fn last_larger_than_table_keeps_everything() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(
        dir.path(),
        &json!([
            record("PCR-1", "open", "[1] Ada L"),
            record("PCR-2", "inReview", "[2] Bob M"),
        ]),
    );

    let output = rq_cmd(dir.path())
        .args(["list", "-n", "10", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(listed_keys(&output), ["PCR-2", "PCR-1"]);
}

#[test]
fn malformed_record_is_skipped_not_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(
        dir.path(),
        &json!([
            record("PCR-1", "open", "no brackets here"),
            record("PCR-2", "open", "[2] Bob M"),
        ]),
    );

    let output = rq_cmd(dir.path())
        .env("REVQ_LOG", "warn")
        .args(["list", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let keys: Vec<&str> = parsed
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v["issue_key"].as_str().expect("key"))
        .collect();
    assert_eq!(keys, ["PCR-2"]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("PCR-1"));
}

#[test]
fn open_ticket_carries_deadline_and_left() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(dir.path(), &json!([record("PCR-1", "open", "[2] Bob M")]));

    let output = rq_cmd(dir.path())
        .args(["list", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let row = &parsed[0];
    // The 2020 snapshot deadline is long gone.
    assert_eq!(row["deadline_missed"], true);
    assert!(row["left"].as_str().expect("left").starts_with('-'));
    assert!(row["deadline"].is_string());
}

#[test]
fn text_mode_prints_plain_rows() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(dir.path(), &json!([record("PCR-1", "open", "[2] Bob M")]));

    rq_cmd(dir.path())
        .args(["list", "--format", "text", "--file"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("PCR-1"))
        .stdout(predicate::str::contains("Bob M"));
}

#[test]
fn show_finds_ticket_by_numeric_suffix() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(dir.path(), &json!([record("PCR-69105", "open", "[2] Bob M")]));

    let output = rq_cmd(dir.path())
        .args(["show", "69105", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(parsed["issue_key"], "PCR-69105");
    assert_eq!(parsed["student_name"], "Bob M");
}

#[test]
fn show_unknown_key_fails() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(dir.path(), &json!([record("PCR-1", "open", "[2] Bob M")]));

    rq_cmd(dir.path())
        .args(["show", "PCR-999", "--file"])
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PCR-999"));
}

#[test]
fn unknown_status_degrades_instead_of_failing() {
    let dir = TempDir::new().expect("tempdir");
    let snapshot = write_snapshot(
        dir.path(),
        &json!([record("PCR-1", "needsInfo", "[2] Bob M")]),
    );

    let output = rq_cmd(dir.path())
        .args(["list", "--all", "--json", "--file"])
        .arg(&snapshot)
        .output()
        .expect("runs");
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(parsed[0]["status"], "UNKNOWN");
    assert_eq!(parsed[0]["pretty_status"], "⁉️");
}
