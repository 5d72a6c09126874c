//! Single-key edits across every configured language.
//!
//! Every edit is read-modify-write over all language files: the files are
//! reloaded, one key is changed, and every language is written back. There is
//! no locking between processes; the last writer wins.

use super::{LocaleCatalogs, codec, store::CatalogStore};
use crate::{
    config::Language,
    error::{Error, Result},
};

/// Applies single-key changes to the catalogs of the configured languages.
#[derive(Debug, Clone)]
pub struct CatalogEditor<'a> {
    store: &'a CatalogStore,
    languages: &'a [Language],
}

impl<'a> CatalogEditor<'a> {
    /// Create an editor over `languages` stored in `store`.
    pub fn new(store: &'a CatalogStore, languages: &'a [Language]) -> Self {
        Self { store, languages }
    }

    /// Set values for a key, creating it where absent.
    ///
    /// Languages not named in `values` keep their current value; where the
    /// key is absent they receive an empty placeholder so the key exists in
    /// every language afterwards.
    pub fn upsert(&self, key: &str, values: &[(String, String)]) -> Result<LocaleCatalogs> {
        codec::validate_key(key)?;
        self.check_languages(values)?;

        let mut catalogs = self.store.load_all(self.languages)?;
        for lang in self.languages {
            if let Some(catalog) = catalogs.get_mut(&lang.code) {
                let provided = values.iter().find(|(code, _)| *code == lang.code);
                match provided {
                    Some((_, value)) => {
                        catalog.insert(key.to_string(), value.clone());
                    },
                    None => {
                        catalog.entry(key.to_string()).or_default();
                    },
                }
            }
        }

        self.persist(&catalogs)?;
        tracing::info!(key, "upserted translation key");
        Ok(catalogs)
    }

    /// Create a key that must not exist in any language yet.
    pub fn create(&self, key: &str, values: &[(String, String)]) -> Result<LocaleCatalogs> {
        codec::validate_key(key)?;
        self.check_languages(values)?;

        let catalogs = self.store.load_all(self.languages)?;
        if catalogs.iter().any(|(_, catalog)| catalog.contains_key(key)) {
            return Err(Error::KeyExists(key.to_string()));
        }

        self.upsert(key, values)
    }

    /// Remove a key from every language.
    pub fn delete(&self, key: &str) -> Result<LocaleCatalogs> {
        let mut catalogs = self.store.load_all(self.languages)?;

        let mut removed = false;
        for lang in self.languages {
            if let Some(catalog) = catalogs.get_mut(&lang.code) {
                removed |= catalog.remove(key).is_some();
            }
        }
        if !removed {
            return Err(Error::KeyNotFound(key.to_string()));
        }

        self.persist(&catalogs)?;
        tracing::info!(key, "deleted translation key");
        Ok(catalogs)
    }

    fn check_languages(&self, values: &[(String, String)]) -> Result<()> {
        for (code, _) in values {
            if !self.languages.iter().any(|l| l.code == *code) {
                return Err(Error::UnknownLanguage(code.clone()));
            }
        }
        Ok(())
    }

    /// Validate every catalog before writing any, so a conflict in one
    /// language does not leave the others half-updated.
    fn persist(&self, catalogs: &LocaleCatalogs) -> Result<()> {
        for (_, catalog) in catalogs.iter() {
            codec::nest(catalog)?;
        }
        for (code, catalog) in catalogs.iter() {
            self.store.save(code, catalog)?;
        }
        Ok(())
    }
}
