//! Translation catalogs: the flat/nested codec, the on-disk store, merging,
//! coverage analysis and single-key editing.

pub mod codec;
pub mod coverage;
pub mod editor;
pub mod merge;
pub mod store;

use std::collections::BTreeSet;

pub use codec::{FlatCatalog, Node, flatten, nest};
pub use coverage::{
    CoverageReport, CoverageStats, EntryFilter, TranslationEntry, group_of, missing_keys,
};
pub use editor::CatalogEditor;
pub use merge::{MergeOutcome, MergePolicy, merge};
pub use store::CatalogStore;

/// Flat catalogs for a set of languages, kept in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleCatalogs {
    entries: Vec<(String, FlatCatalog)>,
}

impl LocaleCatalogs {
    /// Add or replace the catalog for `code`.
    pub fn insert(&mut self, code: impl Into<String>, catalog: FlatCatalog) {
        let code = code.into();
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some((_, existing)) => *existing = catalog,
            None => self.entries.push((code, catalog)),
        }
    }

    /// Catalog for a language code.
    pub fn get(&self, code: &str) -> Option<&FlatCatalog> {
        self.entries.iter().find(|(c, _)| c == code).map(|(_, catalog)| catalog)
    }

    /// Mutable catalog for a language code.
    pub fn get_mut(&mut self, code: &str) -> Option<&mut FlatCatalog> {
        self.entries.iter_mut().find(|(c, _)| c == code).map(|(_, catalog)| catalog)
    }

    /// Language codes in order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(code, _)| code.as_str())
    }

    /// `(code, catalog)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatCatalog)> {
        self.entries.iter().map(|(code, catalog)| (code.as_str(), catalog))
    }

    /// Union of keys over every language, sorted.
    pub fn all_keys(&self) -> BTreeSet<String> {
        self.entries.iter().flat_map(|(_, catalog)| catalog.keys().cloned()).collect()
    }

    /// Number of languages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no languages are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, FlatCatalog)> for LocaleCatalogs {
    fn from_iter<I: IntoIterator<Item = (String, FlatCatalog)>>(iter: I) -> Self {
        let mut catalogs = Self::default();
        for (code, catalog) in iter {
            catalogs.insert(code, catalog);
        }
        catalogs
    }
}
