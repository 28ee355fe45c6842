//! Item types for room to-do entries.

use crate::LocalId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an item already exists on the server.
///
/// The prototype inferred this from the presence of a server-assigned id;
/// here it is an explicit tag carried with the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Exists only on the client so far
    #[default]
    Pending,
    /// Has been persisted by the server
    Persisted,
}

/// Server-side persistence identity.
///
/// Opaque to the engine: it is carried through reconciliation untouched and
/// only ever assigned or interpreted by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRef {
    /// Server-assigned document id
    pub id: String,
    /// Server-side version counter
    pub revision: u64,
}

/// A to-do entry in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Client-generated identifier, stable across edits. The sole key used
    /// to match client and server copies of an item.
    pub local_id: LocalId,
    /// Display text
    pub title: String,
    /// Checked-off state
    pub is_checked: bool,
    /// Sort key. Fractional values appear transiently when a client inserts
    /// between two existing items; reconciliation renumbers to 0..N-1.
    pub index_order: f64,
    /// Last mutation time (ISO-8601 on the wire). The sole conflict signal.
    pub updated_at: DateTime<Utc>,
    /// Whether the item exists server-side yet
    #[serde(default)]
    pub origin: Origin,
    /// Server persistence identity, if assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteRef>,
}

impl Item {
    /// Create a new, unchecked, client-side item.
    pub fn new(
        local_id: impl Into<LocalId>,
        title: impl Into<String>,
        index_order: f64,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            local_id: local_id.into(),
            title: title.into(),
            is_checked: false,
            index_order,
            updated_at,
            origin: Origin::Pending,
            remote: None,
        }
    }

    /// `updated_at` as milliseconds since the Unix epoch. Timestamps are
    /// compared at this precision everywhere in the engine.
    pub fn updated_at_millis(&self) -> i64 {
        self.updated_at.timestamp_millis()
    }

    /// Whether this item's edit is strictly newer than `other`'s.
    pub fn newer_than(&self, other: &Item) -> bool {
        self.updated_at_millis() > other.updated_at_millis()
    }

    /// Overwrite the mutable content fields from `src`.
    ///
    /// This is a full replace of everything a client may edit. Identity
    /// (`local_id`, `remote`) stays with the server entry: clients cannot
    /// rewrite persistence identity through a modification.
    pub fn replace_content(&mut self, src: &Item) {
        self.title = src.title.clone();
        self.is_checked = src.is_checked;
        self.index_order = src.index_order;
        self.updated_at = src.updated_at;
    }
}
