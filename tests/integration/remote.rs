//! `push`, `pull` and `status` against a filesystem store.

use predicates::prelude::*;

use crate::common::{Workspace, json_stdout};

#[test]
fn test_push_copies_files_and_versions_metadata() {
    let ws = Workspace::new();
    let en = "{\"b\": \"2\",\n \"a\": \"1\"}";
    ws.locale("en", en);
    ws.locale("uk", "{}");

    ws.cmd().arg("push").assert().success().stderr(predicate::str::contains("version 1"));
    assert_eq!(ws.read_shared("en.json"), en);

    let meta: serde_json::Value = serde_json::from_str(&ws.read_shared("_meta.json")).unwrap();
    assert_eq!(meta["version"], 1);
    assert_eq!(meta["pushed_from"], "ci");
    assert_eq!(meta["languages"], serde_json::json!(["en", "uk"]));

    ws.cmd().args(["push", "--lang", "en"]).assert().success();

    let output = ws.cmd().args(["-o", "json", "status"]).output().unwrap();
    let status = json_stdout(&output);
    assert_eq!(status["version"], 2);
    assert_eq!(status["languages"], serde_json::json!(["en"]));
}

#[test]
fn test_push_without_local_files_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("push")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No translation files were pushed."));

    assert!(!ws.shared().join("translations-sync").join("_meta.json").exists());
}

#[test]
fn test_push_unknown_language_fails() {
    let ws = Workspace::new();
    ws.locale("en", "{}");

    ws.cmd()
        .args(["push", "--lang", "fr"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("'fr' is not configured"));
}

#[test]
fn test_status_before_any_push() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing has been pushed yet"));
}

#[test]
fn test_pull_with_empty_remote_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("pull")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No translation files were pulled."));
}

#[test]
fn test_pull_merges_without_clobbering() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"a": "local", "keep": "mine"}"#);
    ws.put_shared("en.json", r#"{"a": "remote", "b": "new"}"#);
    ws.put_shared("uk.json", r#"{"a": "віддалений"}"#);

    ws.cmd().arg("pull").assert().success();

    assert_eq!(
        ws.read_locale("en"),
        "{\n    \"a\": \"local\",\n    \"b\": \"new\",\n    \"keep\": \"mine\"\n}\n"
    );
    // No local file: taken from the remote as is.
    assert_eq!(ws.read_locale("uk"), "{\n    \"a\": \"віддалений\"\n}\n");
}

#[test]
fn test_pull_overwrite_and_force() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"a": "local", "keep": "mine"}"#);
    ws.put_shared("en.json", r#"{"a": "remote"}"#);

    ws.cmd().args(["pull", "--lang", "en", "--overwrite"]).assert().success();
    assert_eq!(ws.read_locale("en"), "{\n    \"a\": \"remote\",\n    \"keep\": \"mine\"\n}\n");

    ws.cmd().args(["pull", "--lang", "en", "--force"]).assert().success();
    assert_eq!(ws.read_locale("en"), "{\n    \"a\": \"remote\"\n}\n");
}

#[test]
fn test_pull_reports_per_locale_outcomes() {
    let ws = Workspace::new();
    ws.put_shared("en.json", r#"{"a": "A"}"#);
    ws.put_shared("uk.json", r#"{"a": ["not", "a", "string"]}"#);

    let output = ws.cmd().args(["-o", "json", "pull"]).output().unwrap();
    assert!(output.status.success());

    let report = json_stdout(&output);
    assert_eq!(report["operation"], "pull");
    assert_eq!(report["outcomes"][0]["code"], "en");
    assert_eq!(report["outcomes"][0]["status"], "replaced");
    assert_eq!(report["outcomes"][1]["status"], "failed");
    assert!(!ws.locale_path("uk").exists());
}

#[test]
fn test_round_trip_between_environments() {
    let staging = Workspace::new();
    staging.locale("en", r#"{"nav": {"home": "Home"}}"#);
    staging.locale("uk", r#"{"nav": {"home": "Головна"}}"#);
    staging.cmd().arg("push").assert().success();

    // A second checkout sharing the same store.
    let production = Workspace::sharing(&staging);

    production.cmd().arg("pull").assert().success();
    assert_eq!(
        production.read_locale("uk"),
        "{\n    \"nav\": {\n        \"home\": \"Головна\"\n    }\n}\n"
    );
}

#[test]
fn test_missing_sync_root_is_config_error() {
    let ws = Workspace::new();
    std::fs::write(
        ws.config_path(),
        format!("locales_path: '{}'\nscan:\n  paths: []\n", ws.lang().display()),
    )
    .unwrap();

    ws.cmd()
        .arg("push")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("sync.root is not set"));
}
