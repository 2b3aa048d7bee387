//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temporary data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aliman").unwrap();
    cmd.env("ALIMAN_DATA_DIR", home.path()).env_remove("ALIMAN_LOG");
    cmd
}

fn run_json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = cli(home).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_focus_start_and_end() {
    let home = TempDir::new().unwrap();

    let started = run_json(&home, &["focus", "start", "--minutes", "30"]);
    assert_eq!(started["type"], "session_started");
    assert_eq!(started["planned_minutes"], 30);
    let id = started["session_id"].as_i64().unwrap().to_string();

    let ended = run_json(
        &home,
        &["focus", "end", &id, "--reason", "zerikdim", "--exit-type", "distracted"],
    );
    assert_eq!(ended["type"], "session_ended");
    assert_eq!(ended["category"], "distraction");
    assert_eq!(ended["actual_minutes"], 0);
    assert!(ended["response"].as_str().unwrap().contains("zerikdim"));

    let status = run_json(&home, &["focus", "status", &id]);
    assert_eq!(status["state"], "ended");
}

#[test]
fn test_focus_end_twice_fails() {
    let home = TempDir::new().unwrap();
    let started = run_json(&home, &["focus", "start"]);
    assert_eq!(started["planned_minutes"], 25);
    let id = started["session_id"].as_i64().unwrap().to_string();

    run_json(&home, &["focus", "end", &id]);
    cli(&home)
        .args(["focus", "end", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has already ended"));
}

#[test]
fn test_focus_start_rejects_non_positive_minutes() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["focus", "start", "--minutes", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("planned_minutes"));
    cli(&home)
        .args(["focus", "start", "--minutes", "-5"])
        .assert()
        .failure();
}

#[test]
fn test_focus_end_unknown_session() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["focus", "end", "77"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session 77 not found"));
}

#[test]
fn test_focus_analyze() {
    let home = TempDir::new().unwrap();
    let result = run_json(&home, &["focus", "analyze", "bosh og'riq"]);
    assert_eq!(result["type"], "valid");
}

#[test]
fn test_chat_send_and_history() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "set", "profile.username", "Aziz"])
        .assert()
        .success();

    let reply = run_json(&home, &["chat", "send", "salom"]);
    assert_eq!(reply["type"], "chat_replied");
    assert_eq!(reply["intent"], "greeting");
    assert_eq!(reply["context"], "dashboard");
    assert!(reply["reply"].as_str().unwrap().contains("Aziz"));

    let focus = run_json(&home, &["chat", "send", "chiqib ketaman", "--context", "focus"]);
    assert_eq!(focus["intent"], "stay_in_focus");

    let history = run_json(&home, &["chat", "history"]);
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "salom");
}

#[test]
fn test_chat_rejects_blank_message() {
    let home = TempDir::new().unwrap();
    cli(&home).args(["chat", "send", "   "]).assert().failure();
}

#[test]
fn test_plans_and_review() {
    let home = TempDir::new().unwrap();
    let added = run_json(&home, &["plan", "add", "hisobot yozish"]);
    let id = added["plan_id"].as_i64().unwrap().to_string();
    run_json(&home, &["plan", "add", "sport"]);
    let completed = run_json(&home, &["plan", "complete", &id]);
    assert_eq!(completed["type"], "plan_completed");
    assert_eq!(completed["plan_id"].to_string(), id);

    let plans = run_json(&home, &["plan", "list"]);
    assert_eq!(plans.as_array().unwrap().len(), 2);

    let summary = run_json(&home, &["review", "--json"]);
    assert_eq!(summary["completed_plan_count"], 1);
    assert_eq!(summary["total_plan_count"], 2);
    assert_eq!(summary["verdict"], "no_sessions");

    cli(&home)
        .arg("review")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bajarilgan rejalar: 1/2"));
}

#[test]
fn test_review_of_empty_past_day() {
    let home = TempDir::new().unwrap();
    let summary = run_json(&home, &["review", "--date", "2024-01-01", "--json"]);
    assert_eq!(summary["total_focus_minutes"], 0);
    assert_eq!(summary["verdict"], "no_sessions");
}

#[test]
fn test_dashboard() {
    let home = TempDir::new().unwrap();
    run_json(&home, &["focus", "start"]);
    let dashboard = run_json(&home, &["dashboard"]);
    assert_eq!(dashboard["username"], "user");
    assert_eq!(dashboard["stats"]["sessions"], 1);
    assert!(dashboard["question"].as_str().is_some());
}

#[test]
fn test_config_get_set_reset() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "get", "session.default_planned_minutes"])
        .assert()
        .success()
        .stdout("25\n");
    cli(&home)
        .args(["config", "set", "session.default_planned_minutes", "50"])
        .assert()
        .success();
    let started = run_json(&home, &["focus", "start"]);
    assert_eq!(started["planned_minutes"], 50);

    cli(&home)
        .args(["config", "set", "session.nope", "1"])
        .assert()
        .failure();
    cli(&home).args(["config", "reset"]).assert().success();
    cli(&home)
        .args(["config", "get", "session.default_planned_minutes"])
        .assert()
        .success()
        .stdout("25\n");
}
