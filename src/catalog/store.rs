//! On-disk catalog files, one `<code>.json` per language.
//!
//! Output is deterministic: keys are sorted at every level, the document is
//! pretty-printed with four-space indentation, non-ASCII text is written as-is
//! and the file ends with a newline. Saving the same catalog twice produces
//! identical bytes.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};

use super::{
    LocaleCatalogs,
    codec::{self, FlatCatalog},
};
use crate::{
    config::Language,
    error::{Error, Result},
};

/// Reads and writes the per-language catalog files under one directory.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    /// Create a store rooted at the locales directory. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locales directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the catalog file for a language code.
    pub fn path_for(&self, code: &str) -> PathBuf {
        self.root.join(format!("{code}.json"))
    }

    /// Whether a catalog file exists for a language code.
    pub fn exists(&self, code: &str) -> bool {
        self.path_for(code).is_file()
    }

    /// Load one language; a missing file is an empty catalog.
    pub fn load(&self, code: &str) -> Result<FlatCatalog> {
        Self::load_path(&self.path_for(code))
    }

    /// Load every configured language, in configured order.
    pub fn load_all(&self, languages: &[Language]) -> Result<LocaleCatalogs> {
        let mut catalogs = LocaleCatalogs::default();
        for lang in languages {
            catalogs.insert(lang.code.clone(), self.load(&lang.code)?);
        }
        Ok(catalogs)
    }

    /// Read the raw bytes of a language file, `None` when it does not exist.
    pub fn read_raw(&self, code: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(code)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Load a catalog from an explicit path.
    pub fn load_path(path: &Path) -> Result<FlatCatalog> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "catalog file missing, treating as empty");
                return Ok(FlatCatalog::new());
            },
            Err(e) => return Err(e.into()),
        };

        let catalog = parse(&contents, path)?;
        tracing::debug!(path = %path.display(), keys = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Persist one language atomically.
    pub fn save(&self, code: &str, catalog: &FlatCatalog) -> Result<()> {
        Self::save_path(&self.path_for(code), catalog)
    }

    /// Persist a catalog atomically to an explicit path.
    ///
    /// The document is written to a sibling temporary file and renamed over
    /// the target, so readers see either the old or the new file.
    pub fn save_path(path: &Path, catalog: &FlatCatalog) -> Result<()> {
        let rendered = render(catalog)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, rendered.as_bytes())?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), keys = catalog.len(), "saved catalog");
        Ok(())
    }
}

/// Parse catalog bytes; `origin` names the source in errors.
pub fn parse(bytes: &[u8], origin: &Path) -> Result<FlatCatalog> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| Error::malformed(origin, format!("invalid JSON: {e}")))?;
    codec::flatten_json(&value, origin)
}

/// Render a catalog exactly as it is written to disk.
pub fn render(catalog: &FlatCatalog) -> Result<String> {
    let tree = codec::nest(catalog)?.to_json();

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tree.serialize(&mut ser)?;

    let mut out = String::from_utf8(buf).map_err(|e| Error::other(e.to_string()))?;
    out.push('\n');
    Ok(out)
}
