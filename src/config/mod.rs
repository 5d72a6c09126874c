//! Configuration system for transync.
//!
//! The configuration follows XDG Base Directory Specification and supports:
//! - User config: `~/.config/transync/config.yaml`
//! - Project config: `.transync.yaml` in current directory
//! - An explicit `--config` file (replaces the two discovered files)
//! - Environment variables: `TRANSYNC_*`
//! - Command-line flags (highest precedence)
//!
//! Layers are merged at the YAML level: mappings merge key by key, any other
//! value (including lists) replaces the lower layer wholesale.

mod language;

use std::path::{Path, PathBuf};

pub use language::{Language, default_languages};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Name of the project-local config file.
pub const PROJECT_CONFIG_FILE: &str = ".transync.yaml";

/// Main transync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one `<code>.json` file per language.
    pub locales_path: PathBuf,

    /// Configured languages, in display order.
    pub languages: Vec<Language>,

    /// Source scanning settings (used by `sync` and `missing`).
    pub scan: ScanConfig,

    /// Remote object store settings (used by `push`, `pull` and `status`).
    pub sync: SyncConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Source scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directories scanned recursively for translation calls.
    pub paths: Vec<PathBuf>,

    /// File extensions (without the dot) that are scanned.
    pub extensions: Vec<String>,

    /// Regular expressions with exactly one capture group yielding the key.
    pub patterns: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extensions: ["js", "jsx", "ts", "tsx", "vue"].map(String::from).to_vec(),
            patterns: vec![
                r#"(?m)(?:^|[^a-zA-Z$])t\(\s*['"]([a-zA-Z0-9_.]+)['"]\s*(?:,|\))"#.to_string(),
                r#"\$t\(\s*['"]([a-zA-Z0-9_.]+)['"]\s*(?:,|\))"#.to_string(),
                r#"__\(\s*['"]([a-zA-Z0-9_.]+)['"]\s*(?:,|\))"#.to_string(),
            ],
        }
    }
}

/// Object store backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncBackend {
    /// A directory on a (possibly shared) filesystem.
    #[default]
    Fs,
    /// Plain HTTP GET/HEAD/PUT against a base URL.
    Http,
}

/// Remote sync settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Which object store backend to use.
    pub backend: SyncBackend,

    /// Root directory of the `fs` backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Base URL of the `http` backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Bearer token sent by the `http` backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Prefix under which catalogs and `_meta.json` are stored.
    pub path: String,

    /// Environment label recorded as `pushed_from`.
    pub environment: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            backend: SyncBackend::Fs,
            root: None,
            url: None,
            token: None,
            path: "translations-sync".to_string(),
            environment: "unknown".to_string(),
        }
    }
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format (table, json, yaml, jsonl).
    #[serde(default = "default_format")]
    pub format: String,

    /// Color output mode (auto, always, never).
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_format() -> String {
    "table".to_string()
}

fn default_color() -> String {
    "auto".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: default_format(), color: default_color() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_path: PathBuf::from("resources").join("lang"),
            languages: default_languages(),
            scan: ScanConfig::default(),
            sync: SyncConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Resolution order (highest to lowest):
    /// 1. CLI flags (handled separately)
    /// 2. Environment variables
    /// 3. Explicit config file, or else project config (`.transync.yaml`)
    /// 4. User config (`~/.config/transync/config.yaml`), skipped with an explicit file
    /// 5. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut layers = Vec::new();

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::config(format!("Config file {} not found", path.display())));
            }
            layers.push(path.to_path_buf());
        } else {
            if let Some(path) = Self::user_config_path()
                && path.exists()
            {
                layers.push(path);
            }

            let project_path = PathBuf::from(PROJECT_CONFIG_FILE);
            if project_path.exists() {
                layers.push(project_path);
            }
        }

        let mut merged = serde_yaml::to_value(Self::default())?;
        for path in &layers {
            tracing::debug!(path = %path.display(), "loading config layer");
            merge(&mut merged, Self::read_layer(path)?);
        }

        let mut config: Self = serde_yaml::from_value(merged)
            .map_err(|e| Error::config(format!("Invalid configuration: {e}")))?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a single YAML file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut merged = serde_yaml::to_value(Self::default())?;
        merge(&mut merged, Self::read_layer(path)?);

        let config: Self = serde_yaml::from_value(merged).map_err(|e| {
            Error::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn read_layer(path: &Path) -> Result<Value> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let value: Value = serde_yaml::from_str(&contents).map_err(|e| {
            Error::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        // An empty file parses as null; treat it as "no overrides".
        Ok(if value.is_null() { Value::Mapping(serde_yaml::Mapping::new()) } else { value })
    }

    /// Write this configuration as YAML to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(path) = env_var("TRANSYNC_LOCALES_PATH") {
            self.locales_path = PathBuf::from(path);
        }
        if let Some(env) = env_var("TRANSYNC_ENV") {
            self.sync.environment = env;
        }
        if let Some(root) = env_var("TRANSYNC_SYNC_ROOT") {
            self.sync.backend = SyncBackend::Fs;
            self.sync.root = Some(PathBuf::from(root));
        }
        if let Some(url) = env_var("TRANSYNC_SYNC_URL") {
            self.sync.backend = SyncBackend::Http;
            self.sync.url = Some(url);
        }
        if let Some(token) = env_var("TRANSYNC_SYNC_TOKEN") {
            self.sync.token = Some(token);
        }
    }

    /// Reject configurations the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(Error::config("At least one language must be configured"));
        }

        let mut seen = std::collections::BTreeSet::new();
        for lang in &self.languages {
            if lang.code.trim().is_empty() {
                return Err(Error::config("Language code cannot be empty"));
            }
            if lang.code.contains(['/', '\\', '.']) {
                return Err(Error::config(format!(
                    "Language code '{}' must not contain path separators or dots",
                    lang.code
                )));
            }
            if !seen.insert(lang.code.as_str()) {
                return Err(Error::config(format!("Language '{}' is configured twice", lang.code)));
            }
        }

        Ok(())
    }

    /// Configured language codes, in order.
    pub fn language_codes(&self) -> Vec<String> {
        self.languages.iter().map(|l| l.code.clone()).collect()
    }

    /// Look up a configured language by code.
    pub fn language(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// Languages selected by an optional `--lang` filter.
    ///
    /// An unknown code selects nothing; callers report that as an empty result.
    pub fn select_languages(&self, filter: Option<&str>) -> Vec<Language> {
        self.languages
            .iter()
            .filter(|l| filter.is_none_or(|code| l.code == code))
            .cloned()
            .collect()
    }

    /// Get the path to the user config file.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.yaml"))
    }

    /// Get the path to the user config directory.
    ///
    /// Cross-platform behavior:
    /// - If `XDG_CONFIG_HOME` is set, uses `$XDG_CONFIG_HOME/transync`
    /// - Linux/macOS: Falls back to `~/.config/transync` (XDG default)
    /// - Windows: Falls back to `%APPDATA%\transync`
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(PathBuf::from(xdg_config).join("transync"));
        }

        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join("transync"))
        }

        #[cfg(not(windows))]
        {
            dirs::home_dir().map(|p| p.join(".config").join("transync"))
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Merge `overlay` into `base` (overlay takes precedence).
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    },
                }
            }
        },
        (base, overlay) => *base = overlay,
    }
}
