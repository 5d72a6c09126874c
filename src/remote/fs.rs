//! Filesystem-backed object store, e.g. a mounted shared volume.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::fs;

use super::store::ObjectStore;
use crate::error::{Error, Result};

/// Objects stored as files below a root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment == ".." || segment == "." {
                return Err(Error::remote(path, "object paths must not contain '.' or '..'"));
            }
            resolved.push(segment);
        }
        Ok(resolved)
    }
}

impl ObjectStore for FsStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        let file = self.resolve(path)?;
        fs::try_exists(&file).await.map_err(|e| Error::remote(path, e))
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let file = self.resolve(path)?;
        match fs::read(&file).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::remote(path, e)),
        }
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<()> {
        let file = self.resolve(path)?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).await.map_err(|e| Error::remote(path, e))?;
        }

        let mut tmp_name = file.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = file.with_file_name(tmp_name);

        fs::write(&tmp_path, bytes).await.map_err(|e| Error::remote(path, e))?;
        fs::rename(&tmp_path, &file).await.map_err(|e| Error::remote(path, e))?;

        tracing::debug!(object = path, file = %file.display(), "stored object");
        Ok(())
    }

    fn describe(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }
}
