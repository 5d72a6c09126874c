//! Push and pull of language catalogs against a shared object store.
//!
//! Each locale lives at `<sync_path>/<code>.json` next to a
//! `<sync_path>/_meta.json` record describing the last push. Locales are
//! processed one by one and independently: a failure on one locale is
//! recorded in the [`SyncReport`] and the next locale is attempted.

pub mod fs;
pub mod http;
pub mod memory;
mod store;

use std::path::Path;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

pub use self::{
    fs::FsStore,
    http::HttpStore,
    memory::MemoryStore,
    store::{ObjectStore, Store},
};
use crate::{
    catalog::{CatalogStore, MergePolicy, store as catalog_store},
    config::Language,
    error::{Error, Result},
};

/// Object name of the metadata record.
pub const META_OBJECT: &str = "_meta.json";

/// Record of the last successful push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMetadata {
    /// When the push happened.
    pub pushed_at: DateTime<Utc>,
    /// Environment label of the pushing installation.
    pub pushed_from: String,
    /// Starts at 1, incremented on every push.
    pub version: u64,
    /// Locales included in the push.
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Which direction a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Local → remote.
    Push,
    /// Remote → local.
    Pull,
}

impl Operation {
    /// Verb used in the empty-result error.
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Push => "pushed",
            Self::Pull => "pulled",
        }
    }
}

/// What happened to one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Local file uploaded.
    Pushed,
    /// Local file replaced by the remote catalog.
    Replaced {
        /// Keys in the written catalog.
        keys: usize,
    },
    /// Remote catalog merged into the local one.
    Merged {
        /// Keys taken from the remote side.
        added: usize,
        /// Local values replaced by remote ones.
        overwritten: usize,
    },
    /// Nothing to transfer.
    Skipped {
        /// Why nothing was transferred.
        reason: String,
    },
    /// Transfer failed; other locales were still attempted.
    Failed {
        /// Error message.
        reason: String,
    },
}

impl Outcome {
    /// Whether the locale was transferred.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Pushed | Self::Replaced { .. } | Self::Merged { .. })
    }

    /// Short status word.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pushed => "pushed",
            Self::Replaced { .. } => "replaced",
            Self::Merged { .. } => "merged",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }

    /// Human-readable detail for tables.
    pub fn detail(&self) -> String {
        match self {
            Self::Pushed => String::new(),
            Self::Replaced { keys } => format!("{keys} keys"),
            Self::Merged { added, overwritten } => {
                format!("{added} added, {overwritten} overwritten")
            },
            Self::Skipped { reason } | Self::Failed { reason } => reason.clone(),
        }
    }
}

/// Outcome for one locale code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleOutcome {
    /// Locale code.
    pub code: String,
    /// What happened.
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Aggregate result of a push or pull.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Direction of the transfer.
    pub operation: Operation,
    /// One entry per requested locale, in request order.
    pub outcomes: Vec<LocaleOutcome>,
    /// Non-fatal problems, e.g. metadata that could not be read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Metadata written by a push, or observed before a pull.
    pub metadata: Option<SyncMetadata>,
}

impl SyncReport {
    fn new(operation: Operation) -> Self {
        Self { operation, outcomes: Vec::new(), warnings: Vec::new(), metadata: None }
    }

    fn record(&mut self, code: &str, outcome: Outcome) {
        match &outcome {
            Outcome::Skipped { reason } => tracing::warn!(code, %reason, "locale skipped"),
            Outcome::Failed { reason } => tracing::warn!(code, %reason, "locale failed"),
            _ => tracing::info!(code, status = outcome.label(), "locale done"),
        }
        self.outcomes.push(LocaleOutcome { code: code.to_string(), outcome });
    }

    fn fail(&mut self, code: &str, error: &Error) {
        self.record(code, Outcome::Failed { reason: error.to_string() });
    }

    fn warn(&mut self, warning: String) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Number of locales transferred.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_success()).count()
    }

    /// A push or pull succeeds when at least one locale was transferred.
    pub fn is_success(&self) -> bool {
        self.succeeded() > 0
    }

    /// Turn a report with no transferred locale into an error.
    pub fn ensure_success(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Error::EmptyResult(self.operation.past_tense()))
        }
    }
}

/// Moves catalogs between a [`CatalogStore`] and an [`ObjectStore`].
#[derive(bon::Builder)]
pub struct RemoteSync<'a, S: ObjectStore> {
    store: S,
    catalogs: &'a CatalogStore,
    /// Prefix of every object path.
    #[builder(into, default = String::from("translations-sync"))]
    sync_path: String,
    /// Recorded as `pushed_from` in the metadata.
    #[builder(into, default = String::from("unknown"))]
    environment: String,
}

impl<S: ObjectStore> RemoteSync<'_, S> {
    /// Full object path for `name` below the sync prefix.
    pub fn object_path(&self, name: &str) -> String {
        let prefix = self.sync_path.trim_matches('/');
        if prefix.is_empty() { name.to_string() } else { format!("{prefix}/{name}") }
    }

    fn locale_path(&self, code: &str) -> String {
        self.object_path(&format!("{code}.json"))
    }

    /// Upload the local file of every language, then bump the metadata version.
    pub async fn push(&self, languages: &[Language]) -> SyncReport {
        let mut report = SyncReport::new(Operation::Push);
        let mut pushed = Vec::new();

        for lang in languages {
            let code = lang.code.as_str();
            let bytes = match self.catalogs.read_raw(code) {
                Ok(Some(bytes)) => bytes,
                Ok(None) => {
                    let reason = format!(
                        "local file not found: {}",
                        self.catalogs.path_for(code).display()
                    );
                    report.record(code, Outcome::Skipped { reason });
                    continue;
                },
                Err(e) => {
                    report.fail(code, &e);
                    continue;
                },
            };

            let path = self.locale_path(code);
            match self.store.put(&path, bytes).await {
                Ok(()) => {
                    pushed.push(code.to_string());
                    report.record(code, Outcome::Pushed);
                },
                Err(e) => report.fail(code, &e),
            }
        }

        if pushed.is_empty() {
            return report;
        }

        // Only a missing or unparsable record restarts the count; a failed read
        // must not overwrite a newer version.
        let meta_path = self.object_path(META_OBJECT);
        let previous = match self.store.get(&meta_path).await {
            Ok(None) => 0,
            Ok(Some(bytes)) => match serde_json::from_slice::<SyncMetadata>(&bytes) {
                Ok(metadata) => metadata.version,
                Err(e) => {
                    report.warn(format!("Remote metadata is invalid, starting at version 1: {e}"));
                    0
                },
            },
            Err(e) => {
                report.warn(format!("Metadata not updated: could not read current version: {e}"));
                return report;
            },
        };

        let metadata = SyncMetadata {
            pushed_at: Utc::now().trunc_subsecs(0),
            pushed_from: self.environment.clone(),
            version: previous + 1,
            languages: pushed,
        };

        match self.write_metadata(&metadata).await {
            Ok(()) => report.metadata = Some(metadata),
            Err(e) => report.warn(format!("Failed to write remote metadata: {e}")),
        }

        report
    }

    /// Download every language and combine it with the local file under `policy`.
    pub async fn pull(&self, languages: &[Language], policy: MergePolicy) -> SyncReport {
        let mut report = SyncReport::new(Operation::Pull);

        match self.remote_status().await {
            Ok(metadata) => report.metadata = metadata,
            Err(e) => report.warn(format!("Could not read remote metadata: {e}")),
        }

        for lang in languages {
            let code = lang.code.as_str();
            match self.pull_locale(code, policy).await {
                Ok(outcome) => report.record(code, outcome),
                Err(e) => report.fail(code, &e),
            }
        }

        report
    }

    async fn pull_locale(&self, code: &str, policy: MergePolicy) -> Result<Outcome> {
        let path = self.locale_path(code);
        let Some(bytes) = self.store.get(&path).await? else {
            let reason = format!("remote file not found: {}", self.store.describe(&path));
            return Ok(Outcome::Skipped { reason });
        };

        let remote = catalog_store::parse(&bytes, Path::new(&path))?;

        if policy == MergePolicy::Replace || !self.catalogs.exists(code) {
            self.catalogs.save(code, &remote)?;
            return Ok(Outcome::Replaced { keys: remote.len() });
        }

        let local = self.catalogs.load(code)?;
        let merged = policy.apply(&local, &remote);
        self.catalogs.save(code, &merged.catalog)?;

        Ok(Outcome::Merged { added: merged.added, overwritten: merged.overwritten })
    }

    /// Read the metadata record, `None` when nothing was pushed yet.
    pub async fn remote_status(&self) -> Result<Option<SyncMetadata>> {
        let path = self.object_path(META_OBJECT);
        let Some(bytes) = self.store.get(&path).await? else {
            return Ok(None);
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| Error::remote(path, format!("invalid metadata: {e}")))
    }

    async fn write_metadata(&self, metadata: &SyncMetadata) -> Result<()> {
        let mut bytes = serde_json::to_vec_pretty(metadata)?;
        bytes.push(b'\n');
        self.store.put(&self.object_path(META_OBJECT), bytes).await
    }
}
