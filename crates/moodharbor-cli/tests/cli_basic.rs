//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points HOME at its own temp directory, so tests never share state and
//! never touch a real install.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against an isolated home and return
/// (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "moodharbor-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("MOODHARBOR_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Parse stdout that may carry several concatenated JSON documents.
fn json_docs(s: &str) -> Vec<serde_json::Value> {
    serde_json::Deserializer::from_str(s)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .expect("stdout is JSON")
}

#[test]
fn test_dataset_info() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["dataset", "info"]);
    assert_eq!(code, 0, "dataset info failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("info is JSON");
    assert!(parsed["questions"].as_u64().unwrap() > 0);
    assert!(parsed["emotions"].as_array().unwrap().contains(&"平静".into()));
}

#[test]
fn test_config_list() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("list is JSON");
    assert!(parsed["quiz"]["auto_advance"].is_boolean());
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_quiz_answer_zero_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["quiz", "answer", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("numbered from 1"));
}

/// The question subset is chosen once per session: `start` must write the
/// slot, and the question it shows must be the one later invocations see.
#[test]
fn test_start_persists_the_selection() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["quiz", "start", "--seed", "1"]);
    assert_eq!(code, 0, "quiz start failed");

    let slot = home
        .path()
        .join(".config")
        .join("moodharbor-dev")
        .join("progress.json");
    assert!(slot.exists(), "start did not write the progress slot");

    let docs = json_docs(&stdout);
    assert_eq!(docs.len(), 2, "start prints the event and the snapshot");
    assert_eq!(docs[0]["type"], "SessionStarted");
    assert_eq!(docs[1]["type"], "StateSnapshot");
    let shown = docs[1]["question"]["text"].as_str().unwrap().to_string();

    // A separate invocation resumes the same subset, not a reshuffle.
    let (stdout, _, code) = run_cli(home.path(), &["quiz", "status"]);
    assert_eq!(code, 0, "quiz status failed");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).expect("status is JSON");
    assert_eq!(snapshot["resumed"], true);
    assert_eq!(snapshot["question"]["text"].as_str().unwrap(), shown);
}

#[test]
fn test_quiz_flow() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["quiz", "reset", "--seed", "7"]);
    assert_eq!(code, 0, "quiz reset failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).expect("reset is JSON");
    assert_eq!(event["type"], "SessionReset");

    let (stdout, _, code) = run_cli(home.path(), &["quiz", "status"]);
    assert_eq!(code, 0, "quiz status failed");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).expect("status is JSON");
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["answered"], 0);

    let (stdout, _, code) = run_cli(home.path(), &["quiz", "answer", "1"]);
    assert_eq!(code, 0, "quiz answer failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).expect("answer is JSON");
    assert_eq!(event["type"], "AnswerRecorded");
    assert_eq!(event["option_index"], 0);

    // the answer survives a fresh process
    let (stdout, _, _) = run_cli(home.path(), &["quiz", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).expect("status is JSON");
    assert_eq!(snapshot["answered"], 1);
    assert_eq!(snapshot["resumed"], true);

    // auto-advance moved the pointer forward, so prev goes back to 0
    let (stdout, _, code) = run_cli(home.path(), &["quiz", "prev"]);
    assert_eq!(code, 0, "quiz prev failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).expect("prev is JSON");
    assert_eq!(event["type"], "Retreated");
    assert_eq!(event["pointer"], 0);

    // at the first question another prev is a no-op and reports the snapshot
    let (stdout, _, code) = run_cli(home.path(), &["quiz", "prev"]);
    assert_eq!(code, 0, "quiz prev failed");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).expect("prev is JSON");
    assert_eq!(snapshot["type"], "StateSnapshot");
}
