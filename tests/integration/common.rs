//! Common test utilities.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway project: sources, locale files, a shared store directory and
/// a config file pointing at all three.
pub struct Workspace {
    dir: TempDir,
    shared: Option<PathBuf>,
}

impl Workspace {
    /// Create a workspace configured for `en` and `uk`.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a workspace that pushes to and pulls from `other`'s store.
    pub fn sharing(other: &Self) -> Self {
        Self::build(Some(other.shared()))
    }

    fn build(shared: Option<PathBuf>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let ws = Self { dir, shared };
        fs::create_dir_all(ws.src()).unwrap();
        fs::create_dir_all(ws.lang()).unwrap();
        ws.write_config("");
        ws
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Scanned source directory.
    pub fn src(&self) -> PathBuf {
        self.root().join("src")
    }

    /// Locale directory.
    pub fn lang(&self) -> PathBuf {
        self.root().join("lang")
    }

    /// Root of the filesystem object store.
    pub fn shared(&self) -> PathBuf {
        self.shared.clone().unwrap_or_else(|| self.root().join("shared"))
    }

    /// Path of the config file passed with `--config`.
    pub fn config_path(&self) -> PathBuf {
        self.root().join("transync.yaml")
    }

    /// Write the config file; `extra` is appended verbatim.
    pub fn write_config(&self, extra: &str) {
        let config = format!(
            "locales_path: '{}'
languages:
  - code: en
    name: English
  - code: uk
    name: Ukrainian
scan:
  paths:
    - '{}'
sync:
  backend: fs
  root: '{}'
  environment: ci
{extra}",
            self.lang().display(),
            self.src().display(),
            self.shared().display(),
        );
        fs::write(self.config_path(), config).unwrap();
    }

    /// Write a source file below `src/`.
    pub fn source(&self, name: &str, contents: &str) {
        let path = self.src().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Write a locale file verbatim.
    pub fn locale(&self, code: &str, contents: &str) {
        fs::write(self.locale_path(code), contents).unwrap();
    }

    /// Path of a locale file.
    pub fn locale_path(&self, code: &str) -> PathBuf {
        self.lang().join(format!("{code}.json"))
    }

    /// Read a locale file.
    pub fn read_locale(&self, code: &str) -> String {
        fs::read_to_string(self.locale_path(code)).unwrap()
    }

    /// Read an object from the shared store.
    pub fn read_shared(&self, name: &str) -> String {
        fs::read_to_string(self.shared().join("translations-sync").join(name)).unwrap()
    }

    /// Write an object into the shared store.
    pub fn put_shared(&self, name: &str, contents: &str) {
        let dir = self.shared().join("translations-sync");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    /// A `transync` command isolated from the user's environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("transync"));
        cmd.current_dir(self.root())
            .env("XDG_CONFIG_HOME", self.root().join("xdg"))
            .env_remove("TRANSYNC_CONFIG")
            .env_remove("TRANSYNC_LOCALES_PATH")
            .env_remove("TRANSYNC_ENV")
            .env_remove("TRANSYNC_SYNC_ROOT")
            .env_remove("TRANSYNC_SYNC_URL")
            .env_remove("TRANSYNC_SYNC_TOKEN")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_path())
            .arg("--color")
            .arg("never");
        cmd
    }
}

/// Parse command stdout as JSON.
pub fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
