//! Configured languages.
//!
//! The set of locales is closed: it comes from configuration and is never
//! discovered from the files present on disk.

use serde::{Deserialize, Serialize};

/// A configured locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Locale code, also the catalog file stem (e.g. `en` for `en.json`).
    pub code: String,

    /// Display name.
    pub name: String,

    /// Optional flag glyph shown next to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl Language {
    /// Create a language without a flag.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into(), flag: None }
    }

    /// Attach a flag glyph.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Human-readable label, flag first when present.
    pub fn label(&self) -> String {
        match &self.flag {
            Some(flag) => format!("{flag} {}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Languages shipped in a fresh config.
pub fn default_languages() -> Vec<Language> {
    vec![
        Language::new("en", "English").with_flag("🇬🇧"),
        Language::new("uk", "Ukrainian").with_flag("🇺🇦"),
    ]
}
