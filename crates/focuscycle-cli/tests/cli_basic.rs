//! End-to-end tests for the CLI binary.
//!
//! Each test runs against its own HOME so config and database state
//! never leak between tests or into a real data directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_focuscycle-cli");

/// Run the CLI with an isolated home directory and return
/// (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(BIN)
        .args(args)
        .env("HOME", home)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_start_reports_the_new_cycle() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["start", "Write tests", "--minutes", "25"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Started 'Write tests' for 25 min"));
}

#[test]
fn test_start_rejects_a_second_cycle() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["start", "first", "-m", "10"]);
    assert_eq!(code, 0);

    let (_, stderr, code) = run_cli(home.path(), &["start", "second", "-m", "10"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already active"));
}

#[test]
fn test_start_rejects_out_of_range_minutes() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["start", "task", "--minutes", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("outside the allowed range"));
}

#[test]
fn test_status_json_reflects_the_active_cycle() {
    let home = TempDir::new().unwrap();
    run_cli(home.path(), &["start", "Write tests", "-m", "25"]);

    let (stdout, _, code) = run_cli(home.path(), &["status", "--json"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["has_active_cycle"], true);
    assert!(snapshot["remaining_seconds"].as_u64().unwrap() <= 25 * 60);
}

#[test]
fn test_status_human_when_idle() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No active cycle"));
}

#[test]
fn test_stop_without_active_cycle_is_friendly() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["stop"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No active cycle"));
}

#[test]
fn test_stop_then_history_shows_the_interrupted_cycle() {
    let home = TempDir::new().unwrap();
    run_cli(home.path(), &["start", "Write tests", "-m", "25"]);

    let (stdout, _, code) = run_cli(home.path(), &["stop"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Interrupted 'Write tests'"));

    let (stdout, _, code) = run_cli(home.path(), &["history"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Write tests"));
    assert!(stdout.contains("interrupted"));
}

#[test]
fn test_history_empty() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["history"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No cycles yet"));
}

#[test]
fn test_history_json_lists_cycles_in_order() {
    let home = TempDir::new().unwrap();
    run_cli(home.path(), &["start", "first", "-m", "5"]);
    run_cli(home.path(), &["stop"]);
    run_cli(home.path(), &["start", "second", "-m", "5"]);

    let (stdout, _, code) = run_cli(home.path(), &["history", "--json"]);
    assert_eq!(code, 0);
    let cycles: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let cycles = cycles.as_array().unwrap();
    assert_eq!(cycles.len(), 2);
    assert_eq!(cycles[0]["task"], "first");
    assert_eq!(cycles[1]["task"], "second");
    assert!(cycles[0]["interruptedDate"].is_string());
    assert!(cycles[1].get("interruptedDate").is_none());
}

#[test]
fn test_config_get_set_roundtrip() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timer.max_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "60");

    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "timer.max_minutes", "90"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timer.max_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "90");

    // The widened bound is enforced on the next start.
    let (_, _, code) = run_cli(home.path(), &["start", "long cycle", "-m", "90"]);
    assert_eq!(code, 0);
}

#[test]
fn test_config_get_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "nope.nothing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_is_json() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["timer"]["min_minutes"], 1);
    assert_eq!(config["display"]["idle_title"], "focuscycle");
}

#[test]
fn test_completions_generate_for_bash() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("focuscycle-cli"));
}

#[test]
fn test_watch_with_no_active_cycle_exits_cleanly() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["watch"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No active cycle"));
}
