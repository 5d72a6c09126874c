//! Integration tests for the `transync` CLI.

#![allow(clippy::unwrap_used)] // Tests can use unwrap for cleaner assertions

mod common;
mod keys;
mod remote;
mod sync;

use assert_cmd::Command;
use common::{Workspace, json_stdout};
use predicates::prelude::*;

/// Helper to create a command for the transync binary.
fn transync_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("transync"))
}

/// Test that the CLI shows help.
#[test]
fn test_help() {
    transync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("translation catalogs"));
}

/// Test that the CLI shows version.
#[test]
fn test_version() {
    transync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that unrecognized commands fail as usage errors.
#[test]
fn test_unknown_command() {
    transync_cmd().arg("unknown-command").assert().failure().code(2);
}

#[test]
fn test_completion() {
    transync_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("transync"));
}

#[test]
fn test_config_show_reflects_overrides() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["--locales-path", "elsewhere", "-o", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config = json_stdout(&output);
    assert_eq!(config["locales_path"], "elsewhere");
    assert_eq!(config["languages"][1]["code"], "uk");
    assert_eq!(config["sync"]["environment"], "ci");
}

#[test]
fn test_env_overrides_config_file() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .env("TRANSYNC_ENV", "production")
        .args(["-o", "json", "config", "show"])
        .output()
        .unwrap();

    assert_eq!(json_stdout(&output)["sync"]["environment"], "production");
}

#[test]
fn test_invalid_config_is_usage_error() {
    let ws = Workspace::new();
    std::fs::write(ws.config_path(), "languages: []\n").unwrap();

    ws.cmd()
        .arg("stats")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("At least one language"));
}

#[test]
fn test_config_init_writes_project_file() {
    let ws = Workspace::new();
    // Run without --config so the project file is the target.
    transync_cmd()
        .current_dir(ws.root())
        .env("XDG_CONFIG_HOME", ws.root().join("xdg"))
        .args(["config", "init"])
        .assert()
        .success();

    let written = std::fs::read_to_string(ws.root().join(".transync.yaml")).unwrap();
    assert!(written.contains("translations-sync"));

    transync_cmd()
        .current_dir(ws.root())
        .env("XDG_CONFIG_HOME", ws.root().join("xdg"))
        .args(["config", "init"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_stats_json() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"nav": {"home": "Home", "about": "About"}, "title": "App"}"#);
    ws.locale("uk", r#"{"nav": {"home": "Головна", "about": ""}}"#);

    let output = ws.cmd().args(["-o", "json", "stats", "--groups"]).output().unwrap();
    assert!(output.status.success());

    let stats = json_stdout(&output);
    assert_eq!(stats["global"]["total"], 3);
    assert_eq!(stats["global"]["missing_en"], 0);
    assert_eq!(stats["global"]["missing_uk"], 2);
    assert_eq!(stats["groups"]["nav"]["missing_uk"], 1);
    assert_eq!(stats["groups"]["other"]["total"], 1);
}

#[test]
fn test_stats_table() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"a": "1", "b": "2"}"#);
    ws.locale("uk", r#"{"a": "1"}"#);

    ws.cmd()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("MISSING UK Ukrainian"))
        .stdout(predicate::str::contains("1 (50.0%)"));
}

#[test]
fn test_malformed_catalog_is_reported() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"nav": {"home": 42}}"#);

    ws.cmd()
        .arg("stats")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed catalog"))
        .stderr(predicate::str::contains("nav.home"));
}
