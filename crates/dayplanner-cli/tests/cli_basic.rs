//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "dayplanner-cli", "--"])
        .args(args)
        .env("DAYPLANNER_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_layout_json() {
    let (stdout, stderr, code) = run_cli(&["layout", &fixture("day.json")]);
    assert_eq!(code, 0, "layout failed: {stderr}");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = parsed.as_array().unwrap();
    let ids: Vec<_> = items.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["A", "C", "B", "lunch"]);

    assert_eq!(items[0]["totalColumns"], 2);
    assert_eq!(items[1]["columnIndex"], 1);
    assert_eq!(items[2]["columnIndex"], 1);
    assert_eq!(items[3]["totalColumns"], 1);
    assert_eq!(items[3]["width"], 100.0);
}

#[test]
fn test_layout_table() {
    let (stdout, _, code) = run_cli(&["layout", &fixture("day.json"), "--table"]);
    assert_eq!(code, 0, "layout --table failed");
    assert!(stdout.contains("COLUMN"));
    assert!(stdout.contains("13:00"));
    assert!(!stdout.contains("someday"));
}

#[test]
fn test_layout_rejects_bad_time() {
    let (_, stderr, code) = run_cli(&["layout", &fixture("bad_time.json")]);
    assert_ne!(code, 0);
    assert!(stderr.contains("broken"));
}

#[test]
fn test_layout_lenient_skips_bad_time() {
    let (stdout, stderr, code) = run_cli(&["layout", &fixture("bad_time.json"), "--lenient"]);
    assert_eq!(code, 0, "lenient layout failed: {stderr}");
    assert_eq!(stderr.matches("task #1").count(), 1, "rejection reported more than once: {stderr}");
    assert!(stderr.contains("skipped task #1"));

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["id"], "ok");
}

#[test]
fn test_layout_missing_file() {
    let (_, stderr, code) = run_cli(&["layout", "does-not-exist.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("cannot read"));
}

#[test]
fn test_config_get_default_duration() {
    let (stdout, _, code) = run_cli(&["config", "get", "layout.default_task_minutes"]);
    assert_eq!(code, 0, "config get failed");
    let minutes: u32 = stdout.trim().parse().expect("duration is not a number");
    assert!(minutes > 0);
}

#[test]
fn test_config_get_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "layout.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}
