//! `sync` and `missing`.

use predicates::prelude::*;

use crate::common::Workspace;

#[test]
fn test_sync_adds_placeholders() {
    let ws = Workspace::new();
    ws.source("app.js", "t('nav.home')\n$t('nav.about')\n");
    ws.source("views/Page.vue", "{{ $t('page.title') }}");
    ws.locale("en", r#"{"nav": {"home": "Home"}}"#);

    ws.cmd()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("nav.about"))
        .stdout(predicate::str::contains("page.title"));

    assert_eq!(
        ws.read_locale("en"),
        "{\n    \"nav\": {\n        \"about\": \"\",\n        \"home\": \"Home\"\n    },\n    \"page\": {\n        \"title\": \"\"\n    }\n}\n"
    );
    assert_eq!(
        ws.read_locale("uk"),
        "{\n    \"nav\": {\n        \"about\": \"\",\n        \"home\": \"\"\n    },\n    \"page\": {\n        \"title\": \"\"\n    }\n}\n"
    );

    // Second run: keys now exist (empty), so nothing is written.
    let before = ws.read_locale("en");
    ws.cmd().arg("sync").assert().success();
    assert_eq!(ws.read_locale("en"), before);
}

#[test]
fn test_sync_dry_run_writes_nothing() {
    let ws = Workspace::new();
    ws.source("app.ts", "t('greeting')");

    ws.cmd()
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("greeting"))
        .stderr(predicate::str::contains("Dry run"));

    assert!(!ws.locale_path("en").exists());
    assert!(!ws.locale_path("uk").exists());
}

#[test]
fn test_sync_nothing_missing() {
    let ws = Workspace::new();
    ws.source("app.js", "t('ok')");
    ws.locale("en", r#"{"ok": "OK"}"#);
    ws.locale("uk", r#"{"ok": "Гаразд"}"#);

    ws.cmd()
        .arg("sync")
        .assert()
        .success()
        .stderr(predicate::str::contains("All 1 keys used in sources are translated"));
}

#[test]
fn test_sync_missing_scan_path_fails() {
    let ws = Workspace::new();
    std::fs::remove_dir_all(ws.src()).unwrap();

    ws.cmd()
        .arg("sync")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Scan path not found"));
}

#[test]
fn test_sync_conflict_leaves_files_untouched() {
    let ws = Workspace::new();
    ws.source("app.js", "t('nav.home')");
    ws.locale("en", r#"{"nav": "Navigation"}"#);

    ws.cmd()
        .arg("sync")
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("Key conflict"));

    assert_eq!(ws.read_locale("en"), r#"{"nav": "Navigation"}"#);
    assert!(!ws.locale_path("uk").exists());
}

#[test]
fn test_missing_lists_empty_values() {
    let ws = Workspace::new();
    ws.source("app.js", "t('a')\nt('b')");
    ws.locale("en", r#"{"a": "A", "b": "B"}"#);
    ws.locale("uk", r#"{"a": "", "b": "Б"}"#);

    let output = ws.cmd().args(["-o", "json", "missing"]).output().unwrap();
    assert!(output.status.success());

    let rows = crate::common::json_stdout(&output);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["key"], "a");
    assert_eq!(rows[0]["missing_in"][0], "uk");

    // missing never writes
    assert_eq!(ws.read_locale("uk"), r#"{"a": "", "b": "Б"}"#);
}
