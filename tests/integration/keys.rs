//! `keys list|set|add|delete`.

use predicates::prelude::*;

use crate::common::{Workspace, json_stdout};

#[test]
fn test_set_creates_key_in_every_language() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"title": "App"}"#);

    ws.cmd()
        .args(["keys", "set", "nav.home", "--value", "en=Home"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 'nav.home'"));

    assert_eq!(
        ws.read_locale("en"),
        "{\n    \"nav\": {\n        \"home\": \"Home\"\n    },\n    \"title\": \"App\"\n}\n"
    );
    assert_eq!(ws.read_locale("uk"), "{\n    \"nav\": {\n        \"home\": \"\"\n    }\n}\n");
}

#[test]
fn test_set_json_output_and_existing_values() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"a": "old"}"#);
    ws.locale("uk", r#"{"a": "старий"}"#);

    let output = ws
        .cmd()
        .args(["-o", "json", "keys", "set", "a", "--value", "en=new"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entry = json_stdout(&output);
    assert_eq!(entry["key"], "a");
    assert_eq!(entry["en"], "new");
    assert_eq!(entry["uk"], "старий");
}

#[test]
fn test_set_rejects_bad_input() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["keys", "set", "bad key", "--value", "en=x"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid key"));

    ws.cmd()
        .args(["keys", "set", "ok", "--value", "fr=x"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("'fr' is not configured"));

    assert!(!ws.locale_path("en").exists());
}

#[test]
fn test_add_existing_key_fails() {
    let ws = Workspace::new();
    ws.locale("uk", r#"{"dup": "є"}"#);

    ws.cmd()
        .args(["keys", "add", "dup"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_set_conflicting_key_fails() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"nav": {"home": "Home"}}"#);

    ws.cmd().args(["keys", "set", "nav", "--value", "en=Nav"]).assert().failure().code(6);
    assert_eq!(ws.read_locale("en"), r#"{"nav": {"home": "Home"}}"#);
}

#[test]
fn test_delete_requires_confirmation() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"a": "A", "b": "B"}"#);

    ws.cmd().args(["keys", "delete", "a"]).write_stdin("n\n").assert().failure();
    assert!(ws.read_locale("en").contains("\"a\""));

    ws.cmd().args(["keys", "delete", "a"]).write_stdin("y\n").assert().success();
    assert_eq!(ws.read_locale("en"), "{\n    \"b\": \"B\"\n}\n");
}

#[test]
fn test_delete_unknown_key() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"a": "A"}"#);

    ws.cmd()
        .args(["-y", "keys", "delete", "missing.key"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_list_filters() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"nav": {"home": "Home", "about": "About"}, "footer": "Bye"}"#);
    ws.locale("uk", r#"{"nav": {"home": "Головна"}, "footer": "Бувай"}"#);

    let all = json_stdout(&ws.cmd().args(["-o", "json", "keys", "list"]).output().unwrap());
    let keys: Vec<&str> = all.as_array().unwrap().iter().map(|e| e["key"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["footer", "nav.about", "nav.home"]);

    let missing =
        json_stdout(&ws.cmd().args(["-o", "json", "keys", "list", "--missing"]).output().unwrap());
    assert_eq!(missing.as_array().unwrap().len(), 1);
    assert_eq!(missing[0]["key"], "nav.about");
    assert_eq!(missing[0]["uk"], "");

    let search = json_stdout(
        &ws.cmd().args(["-o", "json", "keys", "list", "--search", "ГОЛОВНА"]).output().unwrap(),
    );
    assert_eq!(search[0]["key"], "nav.home");

    let group = json_stdout(
        &ws.cmd().args(["-o", "json", "keys", "list", "--group", "other"]).output().unwrap(),
    );
    assert_eq!(group[0]["key"], "footer");
}

#[test]
fn test_list_table() {
    let ws = Workspace::new();
    ws.locale("en", r#"{"greeting": "Hello"}"#);

    ws.cmd()
        .args(["keys", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KEY"))
        .stdout(predicate::str::contains("UK Ukrainian"))
        .stdout(predicate::str::contains("Hello"));
}
