//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data dir.

use serde_json::Value;
use std::path::Path;
use std::process::Command;

const TODAY: &str = "2025-03-20";

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitrack-cli"))
        .env("HABITRACK_DATA_DIR", dir)
        .env_remove("RUST_LOG")
        .args(["--today", TODAY])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let (code, stdout, stderr) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

#[test]
fn test_habit_create_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let habit = run_json(dir.path(), &["habit", "create", "Drink water"]);
    assert_eq!(habit["id"], 1);
    assert_eq!(habit["name"], "Drink water");
    assert_eq!(habit["icon"], "fas fa-check");
    assert_eq!(habit["currentStreak"], 0);

    let list = run_json(dir.path(), &["habit", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[test]
fn test_toggle_updates_streaks() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["habit", "create", "Read"]);

    for date in ["2025-03-18", "2025-03-19", "2025-03-20"] {
        let completion = run_json(dir.path(), &["habit", "toggle", "1", "--date", date]);
        assert_eq!(completion["completed"], true);
    }

    let habit = run_json(dir.path(), &["habit", "get", "1"]);
    assert_eq!(habit["currentStreak"], 3);
    assert_eq!(habit["longestStreak"], 3);

    let completion = run_json(dir.path(), &["habit", "toggle", "1"]);
    assert_eq!(completion["date"], TODAY);
    assert_eq!(completion["completed"], false);

    let habit = run_json(dir.path(), &["habit", "get", "1"]);
    assert_eq!(habit["currentStreak"], 0);
    assert_eq!(habit["longestStreak"], 3);
}

#[test]
fn test_stats_list_reports_rate() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["habit", "create", "Walk"]);
    run_json(dir.path(), &["habit", "toggle", "1", "--date", "2025-03-19"]);
    run_json(dir.path(), &["habit", "toggle", "1", "--date", TODAY]);
    run_json(dir.path(), &["habit", "toggle", "1", "--date", TODAY]);

    let stats = run_json(dir.path(), &["stats", "list"]);
    assert_eq!(stats[0]["completionRate"], 50);
    assert_eq!(stats[0]["completedToday"], false);
}

#[test]
fn test_unknown_habit_exits_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["habit", "toggle", "99"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("not found"));

    let (code, _, _) = run_cli(dir.path(), &["habit", "delete", "99"]);
    assert_eq!(code, 2);
}

#[test]
fn test_invalid_input_exits_validation() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["habit", "create", "   "]);
    assert_eq!(code, 3);

    run_json(dir.path(), &["habit", "create", "Stretch"]);
    let (code, _, _) = run_cli(dir.path(), &["habit", "toggle", "1", "--date", "2025-13-01"]);
    assert_eq!(code, 3);
    let (code, _, _) = run_cli(dir.path(), &["habit", "get", "abc"]);
    assert_eq!(code, 3);
}

#[test]
fn test_delete_removes_completions() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["habit", "create", "Meditate"]);
    run_json(dir.path(), &["habit", "toggle", "1"]);
    run_json(dir.path(), &["habit", "delete", "1"]);

    let completions = run_json(dir.path(), &["completion", "list"]);
    assert!(completions.as_array().unwrap().is_empty());

    let habit = run_json(dir.path(), &["habit", "create", "Journal"]);
    assert_eq!(habit["id"], 2);
}

#[test]
fn test_seed_and_overview() {
    let dir = tempfile::tempdir().unwrap();
    let seeded = run_json(dir.path(), &["seed"]);
    assert_eq!(seeded.as_array().unwrap().len(), 4);

    let overview = run_json(dir.path(), &["stats", "overview"]);
    assert_eq!(overview["habitCount"], 4);
    assert_eq!(overview["bestStreak"], 7);

    let (code, _, _) = run_cli(dir.path(), &["seed"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "habits.default_color", "blue"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "habits.default_color"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "blue");

    let habit = run_json(dir.path(), &["habit", "create", "Floss"]);
    assert_eq!(habit["color"], "blue");
}

#[test]
fn test_strict_palette_rejects_unknown_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "palette.strict", "true"]);
    assert_eq!(code, 0);

    let (code, _, stderr) = run_cli(
        dir.path(),
        &["habit", "create", "Walk", "--color", "chartreuse"],
    );
    assert_eq!(code, 3, "{stderr}");

    let habit = run_json(
        dir.path(),
        &["habit", "create", "Read", "--icon", " fas fa-book", "--color", "green"],
    );
    assert_eq!(habit["icon"], "fas fa-book");

    let (code, _, _) = run_cli(dir.path(), &["habit", "update", "1", "--icon", "fas fa-rocket"]);
    assert_eq!(code, 3);
}

#[test]
fn test_palette_lists_entries() {
    let dir = tempfile::tempdir().unwrap();
    let palette = run_json(dir.path(), &["palette"]);
    assert!(!palette.as_array().unwrap().is_empty());
}
