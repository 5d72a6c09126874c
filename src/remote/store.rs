//! The object store abstraction behind push and pull.
//!
//! A store is a flat namespace of `/`-separated object paths supporting
//! `exists`, `get` and `put`. Every failure is reported as
//! [`Error::RemoteUnavailable`](crate::Error::RemoteUnavailable).

use super::{fs::FsStore, http::HttpStore};
use crate::error::Result;

/// Minimal key → bytes object store.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    /// Whether an object exists.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Fetch an object, `None` when it does not exist.
    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Create or replace an object.
    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<()>;

    /// Human-readable location of an object, for messages.
    fn describe(&self, path: &str) -> String;
}

/// The configured store backend.
#[derive(Debug, Clone)]
pub enum Store {
    /// Directory on disk.
    Fs(FsStore),
    /// HTTP endpoint.
    Http(HttpStore),
}

impl ObjectStore for Store {
    async fn exists(&self, path: &str) -> Result<bool> {
        match self {
            Self::Fs(store) => store.exists(path).await,
            Self::Http(store) => store.exists(path).await,
        }
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self {
            Self::Fs(store) => store.get(path).await,
            Self::Http(store) => store.get(path).await,
        }
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<()> {
        match self {
            Self::Fs(store) => store.put(path, bytes).await,
            Self::Http(store) => store.put(path, bytes).await,
        }
    }

    fn describe(&self, path: &str) -> String {
        match self {
            Self::Fs(store) => store.describe(path),
            Self::Http(store) => store.describe(path),
        }
    }
}
