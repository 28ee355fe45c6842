//! Change sets: the three disjoint edit lists a client submits.

use crate::{Item, LocalId, Origin};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A removal entry. Only the identifier is meaningful; any other fields a
/// client includes are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Removal {
    /// Identifier of the item to delete
    pub local_id: LocalId,
}

impl Removal {
    pub fn new(local_id: impl Into<LocalId>) -> Self {
        Self {
            local_id: local_id.into(),
        }
    }
}

/// The edits a client submits in one sync request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    /// Items with no prior server existence
    #[serde(default)]
    pub added: Vec<Item>,
    /// Items the client believes exist server-side, with fresh `updated_at`
    #[serde(default)]
    pub modified: Vec<Item>,
    /// Items deleted locally
    #[serde(default)]
    pub removed: Vec<Removal>,
}

/// A client-side inconsistency detected in a change set.
///
/// These are diagnostics, not failures: reconciliation proceeds regardless
/// (removal takes precedence over modification, duplicates are skipped).
/// The server logs them to spot misbehaving clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangeSetIssue {
    #[error("item {0} is in both removed and modified; the removal wins")]
    RemovedAndModified(LocalId),

    #[error("item {0} appears more than once in added")]
    DuplicateAdded(LocalId),

    #[error("added item {0} is already marked as persisted")]
    AddedAlreadyPersisted(LocalId),
}

impl ChangeSet {
    /// A change set containing only removals.
    pub fn removals(local_ids: impl IntoIterator<Item = LocalId>) -> Self {
        Self {
            removed: local_ids.into_iter().map(Removal::new).collect(),
            ..Self::default()
        }
    }

    /// True when the client submitted no edits at all.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    /// Detect client-side bugs in this change set.
    pub fn lint(&self) -> Vec<ChangeSetIssue> {
        let mut issues = Vec::new();

        let removed_ids: HashSet<&str> =
            self.removed.iter().map(|r| r.local_id.as_str()).collect();
        for item in &self.modified {
            if removed_ids.contains(item.local_id.as_str()) {
                issues.push(ChangeSetIssue::RemovedAndModified(item.local_id.clone()));
            }
        }

        let mut seen_added: HashSet<&str> = HashSet::new();
        for item in &self.added {
            if !seen_added.insert(item.local_id.as_str()) {
                issues.push(ChangeSetIssue::DuplicateAdded(item.local_id.clone()));
            }
            if item.origin == Origin::Persisted || item.remote.is_some() {
                issues.push(ChangeSetIssue::AddedAlreadyPersisted(item.local_id.clone()));
            }
        }

        issues
    }
}
