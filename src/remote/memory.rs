//! In-process object store.
//!
//! Lets push and pull run without any backend. Individual paths can be made
//! to fail to exercise partial-failure handling.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex, MutexGuard},
};

use super::store::ObjectStore;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct Inner {
    objects: BTreeMap<String, Vec<u8>>,
    failing: BTreeSet<String>,
    failing_reads: BTreeSet<String>,
}

/// Objects kept in memory. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-call; the map is still usable.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Make every call on `path` fail.
    pub fn fail_on(&self, path: impl Into<String>) {
        self.lock().failing.insert(path.into());
    }

    /// Make reads of `path` fail while writes still succeed.
    pub fn fail_reads_on(&self, path: impl Into<String>) {
        self.lock().failing_reads.insert(path.into());
    }

    /// Insert an object directly.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.lock().objects.insert(path.into(), bytes.into());
    }

    /// Read an object directly.
    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().objects.get(path).cloned()
    }

    /// Stored object paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.lock().objects.keys().cloned().collect()
    }

    fn check(&self, path: &str, read: bool) -> Result<()> {
        let inner = self.lock();
        if inner.failing.contains(path) || (read && inner.failing_reads.contains(path)) {
            return Err(Error::remote(path, "simulated failure"));
        }
        Ok(())
    }
}

impl ObjectStore for MemoryStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        self.check(path, true)?;
        Ok(self.lock().objects.contains_key(path))
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        self.check(path, true)?;
        Ok(self.object(path))
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<()> {
        self.check(path, false)?;
        self.insert(path, bytes);
        Ok(())
    }

    fn describe(&self, path: &str) -> String {
        format!("memory://{path}")
    }
}
