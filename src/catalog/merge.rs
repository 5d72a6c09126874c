//! Merging a remote catalog into a local one.
//!
//! The default policy is add-only: keys missing locally are taken from the
//! remote side and every existing local value is kept, so a pull never
//! clobbers local edits unless explicitly asked to.

use serde::Serialize;

use super::codec::FlatCatalog;

/// How remote values are combined with local ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Add remote-only keys; local values always win.
    #[default]
    AddOnly,
    /// Add remote-only keys and replace local values that differ.
    Overwrite,
    /// Discard the local catalog and take the remote one wholesale.
    Replace,
}

impl MergePolicy {
    /// Policy selected by the `--force` and `--overwrite` pull flags.
    ///
    /// `force` wins over `overwrite`.
    pub fn from_flags(force: bool, overwrite: bool) -> Self {
        match (force, overwrite) {
            (true, _) => Self::Replace,
            (false, true) => Self::Overwrite,
            (false, false) => Self::AddOnly,
        }
    }

    /// Apply this policy to a local/remote pair.
    pub fn apply(self, local: &FlatCatalog, remote: &FlatCatalog) -> MergeOutcome {
        match self {
            Self::AddOnly => merge(local, remote, false),
            Self::Overwrite => merge(local, remote, true),
            Self::Replace => MergeOutcome {
                catalog: remote.clone(),
                added: remote.keys().filter(|k| !local.contains_key(*k)).count(),
                overwritten: remote
                    .iter()
                    .filter(|(k, v)| local.get(*k).is_some_and(|local| local != *v))
                    .count(),
            },
        }
    }
}

/// Result of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The merged catalog.
    pub catalog: FlatCatalog,
    /// Number of keys taken from the remote side because they were missing locally.
    pub added: usize,
    /// Number of local values replaced by differing remote values.
    pub overwritten: usize,
}

/// Merge `remote` into `local`.
///
/// Remote-only keys are inserted. A key present on both sides is replaced
/// only when `overwrite` is set and the values differ. Local-only keys are
/// always kept. Remote keys are visited in sorted order.
pub fn merge(local: &FlatCatalog, remote: &FlatCatalog, overwrite: bool) -> MergeOutcome {
    let mut catalog = local.clone();
    let mut added = 0;
    let mut overwritten = 0;

    for (key, value) in remote {
        match catalog.get_mut(key) {
            None => {
                catalog.insert(key.clone(), value.clone());
                added += 1;
            },
            Some(current) if overwrite && current != value => {
                current.clone_from(value);
                overwritten += 1;
            },
            Some(_) => {},
        }
    }

    MergeOutcome { catalog, added, overwritten }
}
