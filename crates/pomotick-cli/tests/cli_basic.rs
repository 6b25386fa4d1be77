//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "pomotick-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_simulate_full_work_session() {
    let (code, stdout, _) = run_cli(&["simulate", "--ticks", "1500"]);
    assert_eq!(code, 0, "simulate failed");
    let report = parse_json(&stdout);
    assert_eq!(report["snapshot"]["phase"], "break");
    assert_eq!(report["snapshot"]["seconds_remaining"], 300);
    assert_eq!(report["snapshot"]["completed_sessions"], 1);
}

#[test]
fn test_simulate_pause_ignores_ticks() {
    let (code, stdout, _) = run_cli(&["simulate", "--ticks", "15", "--pause-after", "10"]);
    assert_eq!(code, 0, "simulate failed");
    let report = parse_json(&stdout);
    assert_eq!(report["snapshot"]["seconds_remaining"], 1490);
    assert_eq!(report["snapshot"]["formatted_time"], "24:50");
}

#[test]
fn test_simulate_work50_mode() {
    let (code, stdout, _) = run_cli(&["simulate", "--mode", "50", "--ticks", "0"]);
    assert_eq!(code, 0, "simulate failed");
    let report = parse_json(&stdout);
    assert_eq!(report["snapshot"]["work_mode"], "work50");
    assert_eq!(report["snapshot"]["seconds_remaining"], 3000);
}

#[test]
fn test_simulate_rejects_unknown_mode() {
    let (code, _, stderr) = run_cli(&["simulate", "--mode", "45", "--ticks", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("45"));
}

#[test]
fn test_completions() {
    let (code, stdout, _) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "completions failed");
    assert!(stdout.contains("pomotick"));
}
