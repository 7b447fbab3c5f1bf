//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

mod common;

use common::*;
use tempfile::TempDir;

#[test]
fn test_timer_status_fresh() {
    let dir = TempDir::new().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "status"]));
    assert_eq!(json["type"], "StateSnapshot");
    assert_eq!(json["mode"], "focus");
    assert_eq!(json["seconds_left"], 1500);
    assert_eq!(json["seconds_total"], 1500);
    assert_eq!(json["is_running"], false);
    assert_eq!(json["completed_focus_count"], 0);
}

#[test]
fn test_timer_reset() {
    let dir = TempDir::new().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "reset"]));
    assert_eq!(json["type"], "TimerReset");
    assert_eq!(json["mode"], "focus");
    assert_eq!(json["seconds_left"], 1500);
}

#[test]
fn test_timer_clear() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["settings", "set", "--focus", "10"]);
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "clear"]));
    assert_eq!(json["mode"], "focus");
    assert_eq!(json["seconds_left"], 600);
    assert_eq!(json["completed_focus_count"], 0);
}

#[test]
fn test_no_persist_uses_defaults() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["settings", "set", "--focus", "40"]);
    let json = parse_json(&run_cli_success(
        dir.path(),
        &["--no-persist", "timer", "status"],
    ));
    assert_eq!(json["seconds_left"], 1500);
}

#[test]
fn test_config_list() {
    let dir = TempDir::new().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["config", "list"]));
    assert_eq!(json["notifications"]["enabled"], true);
    assert_eq!(json["logging"]["filter"], "warn");
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["config", "set", "notifications.bell", "false"]);
    assert_contains(&out, "ok");
    let out = run_cli_success(dir.path(), &["config", "get", "notifications.bell"]);
    assert_eq!(out.trim(), "false");
}

#[test]
fn test_config_invalid_value() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli_failure(dir.path(), &["config", "set", "notifications.bell", "maybe"]);
    assert_eq!(code, 1);
    assert_contains(&stderr, "notifications.bell");
}

#[test]
fn test_config_unknown_key() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["config", "get", "theme"]);
    assert_contains(&stderr, "theme");
}

#[test]
fn test_broken_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "notifications = [").unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["mode"], "focus");
    assert_contains(&stderr, "config.toml");
    assert_contains(&stderr, "using default configuration");
}

#[test]
fn test_broken_config_reported_once_for_config_list() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "notifications = [").unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["logging"]["filter"], "warn");
    assert_eq!(stderr.matches("config.toml").count(), 1, "{stderr}");
}

#[test]
fn test_config_reset() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["config", "set", "logging.filter", "debug"]);
    run_cli_success(dir.path(), &["config", "reset"]);
    let out = run_cli_success(dir.path(), &["config", "get", "logging.filter"]);
    assert_eq!(out.trim(), "warn");
}
