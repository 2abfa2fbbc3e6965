//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! (TIMELOG_ENV=dev) and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "timelog-cli", "--"])
        .args(args)
        .env("TIMELOG_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "Timer status failed");
    let snapshot: serde_json::Value =
        serde_json::from_str(&stdout).expect("status output is JSON");
    assert!(snapshot.get("running").is_some());
    assert!(snapshot.get("progress").is_some());
}

#[test]
fn test_timer_start_stop_flow() {
    // Clear any running timer left behind by an earlier run.
    let _ = run_cli(&["timer", "stop"]);

    let (stdout, _, code) = run_cli(&["timer", "start"]);
    assert_eq!(code, 0, "Timer start failed");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["running"], serde_json::Value::Bool(true));

    // Starting again while running must fail and leave the timer running.
    let (_, stderr, code) = run_cli(&["timer", "start"]);
    assert_ne!(code, 0, "Double start unexpectedly succeeded");
    assert!(stderr.contains("already running"));

    let (stdout, _, code) = run_cli(&["timer", "stop"]);
    assert_eq!(code, 0, "Timer stop failed");
    let session: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(session["duration_secs"].as_f64().is_some());
    assert!(session["ended_at"].as_str().is_some());
}

#[test]
fn test_timer_stop_while_idle_fails() {
    // Make sure the timer is idle first.
    let _ = run_cli(&["timer", "stop"]);
    let (_, stderr, code) = run_cli(&["timer", "stop"]);
    assert_ne!(code, 0, "Stop while idle unexpectedly succeeded");
    assert!(stderr.contains("not running"));
}

#[test]
fn test_log_list() {
    let (_, _, code) = run_cli(&["log", "list"]);
    assert_eq!(code, 0, "Log list failed");
}

#[test]
fn test_log_list_json() {
    let (stdout, _, code) = run_cli(&["log", "list", "--json"]);
    assert_eq!(code, 0, "Log list JSON failed");
    let sessions: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(sessions.is_array());
}

#[test]
fn test_log_delete_missing_id_is_noop() {
    let (stdout, _, code) = run_cli(&["log", "delete", "00000000-0000-0000-0000-000000000000"]);
    assert_eq!(code, 0, "Delete of missing id failed");
    assert!(stdout.contains("no session with id"));
}

#[test]
fn test_stats_today() {
    let (stdout, _, code) = run_cli(&["stats", "today", "--json"]);
    assert_eq!(code, 0, "Stats today failed");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["period"], "today");
    assert!(report["total_secs"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_stats_week() {
    let (stdout, _, code) = run_cli(&["stats", "week", "--json"]);
    assert_eq!(code, 0, "Stats week failed");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["period"], "week");
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "goal.duration_secs"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(stdout.trim().parse::<u64>().is_ok());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, _, code) = run_cli(&["config", "get", "nonsense.key"]);
    assert_ne!(code, 0, "Unknown config key unexpectedly succeeded");
}

#[test]
fn test_config_set() {
    let (stdout, _, code) = run_cli(&["config", "set", "week.starts_on", "monday"]);
    assert_eq!(code, 0, "Config set failed");
    assert!(stdout.contains("ok"));
}

#[test]
fn test_config_set_rejects_bad_value() {
    let (_, _, code) = run_cli(&["config", "set", "week.starts_on", "someday"]);
    assert_ne!(code, 0, "Bad config value unexpectedly accepted");
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(config.get("goal").is_some());
    assert!(config.get("week").is_some());
}
