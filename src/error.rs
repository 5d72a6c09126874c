//! Error types for transync.
//!
//! This module provides structured error handling with semantic exit codes.
//! Catalog and sync failures carry the file or object path they concern so
//! the operator is told exactly what to fix.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Transync error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (invalid config file, missing required values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A locale file exists but is not a JSON object tree of strings.
    #[error("Malformed catalog {}: {reason}", path.display())]
    MalformedCatalog {
        /// File (or remote object) that failed to parse.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A key is both a leaf and a prefix of another key.
    #[error("Key conflict: '{key}' is used both as a value and as a group")]
    KeyConflict {
        /// The key whose prefix collides.
        key: String,
    },

    /// A key is empty or has an empty dot-segment.
    #[error("Invalid key '{0}': segments must be non-empty and use only letters, digits and '_'")]
    InvalidKey(String),

    /// An object-store call failed.
    #[error("Remote store unavailable for {path}: {reason}")]
    RemoteUnavailable {
        /// Object path inside the store.
        path: String,
        /// Underlying failure.
        reason: String,
    },

    /// A configured scan root does not exist or is not a directory.
    #[error("Scan path not found: {}", .0.display())]
    ScanPathInvalid(PathBuf),

    /// No scan roots are configured.
    #[error("No scan paths configured. Set scan.paths in your transync config.")]
    NoScanPaths,

    /// A file or directory under a scan root could not be read.
    #[error("Failed to read {} while scanning: {source}", path.display())]
    ScanRead {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },

    /// A scan pattern failed to compile or does not have exactly one capture group.
    #[error("Invalid scan pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Pattern as written in config.
        pattern: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Push or pull touched zero locales.
    #[error("No translation files were {0}.")]
    EmptyResult(&'static str),

    /// Key already exists in at least one locale.
    #[error("Key '{0}' already exists")]
    KeyExists(String),

    /// Key is not present in any locale.
    #[error("Key '{0}' not found in any locale")]
    KeyNotFound(String),

    /// Locale code is not among the configured languages.
    #[error("Language '{0}' is not configured. Run 'transync config show' to list languages.")]
    UnknownLanguage(String),

    /// IO error (file operations).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// User cancelled an operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// General/unspecified error.
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type alias for transync operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the exit code for this error type.
    ///
    /// - 0: Success
    /// - 1: General error, empty push/pull, invalid or missing scan paths
    /// - 2: Invalid configuration or arguments
    /// - 5: Key not found
    /// - 6: Key exists / key conflict
    /// - 10: Remote store or IO failure
    pub fn exit_code(&self) -> i32 {
        match self {
            // Argument/config errors
            Self::Config(_)
            | Self::InvalidArgument(_)
            | Self::InvalidKey(_)
            | Self::InvalidPattern { .. }
            | Self::UnknownLanguage(_) => 2,

            // Conflicts
            Self::KeyExists(_) | Self::KeyConflict { .. } => 6,
            Self::KeyNotFound(_) => 5,

            // Remote/IO
            Self::RemoteUnavailable { .. } | Self::Io(_) => 10,

            // Scan, empty result, catalog shape and fallbacks
            Self::ScanPathInvalid(_)
            | Self::NoScanPaths
            | Self::ScanRead { .. }
            | Self::EmptyResult(_)
            | Self::MalformedCatalog { .. }
            | Self::Json(_)
            | Self::Yaml(_)
            | Self::Cancelled
            | Self::Other(_) => 1,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a malformed catalog error.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedCatalog { path: path.into(), reason: reason.into() }
    }

    /// Create a remote store error.
    pub fn remote(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::RemoteUnavailable { path: path.into(), reason: reason.to_string() }
    }

    /// Create a general error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::EmptyResult("pushed").exit_code(), 1);
        assert_eq!(Error::ScanPathInvalid(PathBuf::from("src")).exit_code(), 1);
        assert_eq!(Error::NoScanPaths.exit_code(), 1);
        let read = std::io::Error::from(std::io::ErrorKind::IsADirectory);
        assert_eq!(Error::ScanRead { path: PathBuf::from("src/x.js"), source: read }.exit_code(), 1);
        assert_eq!(Error::KeyNotFound("a".into()).exit_code(), 5);
        assert_eq!(Error::remote("sync/en.json", "timeout").exit_code(), 10);
    }

    #[test]
    fn test_messages_name_the_file() {
        let err = Error::malformed("lang/en.json", "expected an object");
        assert_eq!(err.to_string(), "Malformed catalog lang/en.json: expected an object");

        assert_eq!(Error::EmptyResult("pulled").to_string(), "No translation files were pulled.");
    }
}
