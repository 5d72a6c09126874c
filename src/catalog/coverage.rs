//! Coverage analysis across languages.
//!
//! A value counts as missing when the key is absent from a language or its
//! value is the empty string. Keys are grouped by their first dot-segment for
//! statistics and listings only; grouping never affects storage.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::{LocaleCatalogs, codec::SEPARATOR};

/// Group assigned to keys without a dot.
pub const OTHER_GROUP: &str = "other";

/// Group of a key: its first dot-segment, or [`OTHER_GROUP`].
pub fn group_of(key: &str) -> &str {
    match key.split_once(SEPARATOR) {
        Some((group, _)) => group,
        None => OTHER_GROUP,
    }
}

/// Keys with at least one language where the value is empty or absent,
/// mapped to those languages.
pub fn missing_keys<'a, I>(known: I, catalogs: &LocaleCatalogs) -> BTreeMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut missing = BTreeMap::new();
    for key in known {
        let locales: BTreeSet<String> = catalogs
            .iter()
            .filter(|(_, catalog)| catalog.get(key).is_none_or(String::is_empty))
            .map(|(code, _)| code.to_string())
            .collect();
        if !locales.is_empty() {
            missing.insert(key.clone(), locales);
        }
    }
    missing
}

/// One row per key, with a value for every language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Dotted key.
    pub key: String,
    /// First dot-segment, or `other`.
    pub group: String,
    /// `(code, value)` in configured order; absent values are empty strings.
    pub values: Vec<(String, String)>,
}

impl TranslationEntry {
    /// Value for a language, empty when missing.
    pub fn value(&self, code: &str) -> &str {
        self.values.iter().find(|(c, _)| c == code).map_or("", |(_, v)| v.as_str())
    }

    /// Whether any language lacks a value.
    pub fn is_incomplete(&self) -> bool {
        self.values.iter().any(|(_, v)| v.is_empty())
    }
}

impl Serialize for TranslationEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.values.len()))?;
        map.serialize_entry("key", &self.key)?;
        map.serialize_entry("group", &self.group)?;
        for (code, value) in &self.values {
            map.serialize_entry(code, value)?;
        }
        map.end()
    }
}

/// Build sorted entries over the union of keys of every language.
pub fn entries(catalogs: &LocaleCatalogs) -> Vec<TranslationEntry> {
    catalogs
        .all_keys()
        .into_iter()
        .map(|key| {
            let values = catalogs
                .iter()
                .map(|(code, catalog)| {
                    (code.to_string(), catalog.get(&key).cloned().unwrap_or_default())
                })
                .collect();
            TranslationEntry { group: group_of(&key).to_string(), key, values }
        })
        .collect()
}

/// Listing filter.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Case-insensitive substring matched against the key and every value.
    pub search: Option<String>,
    /// Keep only entries with at least one empty value.
    pub missing_only: bool,
    /// Keep only entries of this group.
    pub group: Option<String>,
}

impl EntryFilter {
    /// Whether an entry passes every configured criterion.
    pub fn matches(&self, entry: &TranslationEntry) -> bool {
        if self.missing_only && !entry.is_incomplete() {
            return false;
        }

        if let Some(group) = &self.group
            && entry.group != *group
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                entry.key.to_lowercase().contains(&needle)
                    || entry.values.iter().any(|(_, v)| v.to_lowercase().contains(&needle))
            },
        }
    }

    /// Keep the matching entries.
    pub fn apply(&self, entries: Vec<TranslationEntry>) -> Vec<TranslationEntry> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Key count and per-language missing counts for one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageStats {
    /// Number of keys in scope.
    pub total: usize,
    /// `(code, missing count)` in configured order.
    pub missing: Vec<(String, usize)>,
}

impl CoverageStats {
    fn for_codes<'a>(codes: impl Iterator<Item = &'a str>) -> Self {
        Self { total: 0, missing: codes.map(|c| (c.to_string(), 0)).collect() }
    }

    fn record(&mut self, entry: &TranslationEntry) {
        self.total += 1;
        for (code, count) in &mut self.missing {
            if entry.value(code).is_empty() {
                *count += 1;
            }
        }
    }

    /// Missing values for a language.
    pub fn missing_for(&self, code: &str) -> usize {
        self.missing.iter().find(|(c, _)| c == code).map_or(0, |(_, n)| *n)
    }

    /// Fraction of keys translated for a language, `1.0` for an empty scope.
    pub fn coverage(&self, code: &str) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.total - self.missing_for(code)) as f64 / self.total as f64
    }
}

impl Serialize for CoverageStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.missing.len()))?;
        map.serialize_entry("total", &self.total)?;
        for (code, count) in &self.missing {
            map.serialize_entry(&format!("missing_{code}"), count)?;
        }
        map.end()
    }
}

/// Global and per-group statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Statistics over every key.
    pub global: CoverageStats,
    /// Statistics per group, sorted by group name.
    pub groups: BTreeMap<String, CoverageStats>,
}

/// Compute coverage statistics over the union of keys.
pub fn stats(catalogs: &LocaleCatalogs) -> CoverageReport {
    let mut global = CoverageStats::for_codes(catalogs.codes());
    let mut groups: BTreeMap<String, CoverageStats> = BTreeMap::new();

    for entry in entries(catalogs) {
        global.record(&entry);
        groups
            .entry(entry.group.clone())
            .or_insert_with(|| CoverageStats::for_codes(catalogs.codes()))
            .record(&entry);
    }

    CoverageReport { global, groups }
}
