//! Reconciliation: merging a client change set into the canonical list.
//!
//! This is the one piece of the system with real invariants. Given the
//! server's current list and a client's (added, modified, removed) triple,
//! it produces the new canonical list.
//!
//! # Algorithm
//!
//! 1. Drop every base item whose `local_id` appears in `removed`
//! 2. Apply each modification to its surviving match, last-writer-wins on
//!    `updated_at` at millisecond precision (server wins ties)
//! 3. Append `added` items, skipping ids that would collide
//! 4. Stable-sort by `index_order` and renumber to a dense 0..N-1
//!
//! The function is pure and total: unknown removals and modifications are
//! no-ops, never errors. A modification that finds no target lost to a
//! removal, real or racing, and the removal wins.

use crate::{ChangeSet, Item, LocalId, Origin};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Why a modification was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictReason {
    /// No surviving item with this `local_id`: it was deleted (in this very
    /// change set or by another client) or never existed
    TargetMissing,
    /// The server copy's `updated_at` is as new or newer
    StaleTimestamp,
}

/// A modification that lost during reconciliation.
///
/// The canonical list is still produced; conflicts are reported so the sync
/// endpoint can echo them to the client, which may re-fetch and retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// Identifier of the modification that was dropped
    pub local_id: LocalId,
    /// Why it was dropped
    pub reason: ConflictReason,
}

/// Result of a detailed reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOutcome {
    /// The new canonical list: sorted, renumbered, ready to persist
    pub items: Vec<Item>,
    /// Modifications that were dropped, with reasons
    pub conflicts: Vec<Conflict>,
}

/// Merge a change set into the canonical list.
///
/// Returns the new canonical list, already stable-sorted by `index_order`
/// and renumbered to a dense zero-based sequence. Renumbering runs on every
/// call, so even an empty change set normalizes sparse or fractional
/// ordering left over from client-side inserts.
///
/// Tie-break: a modification replaces the server copy only when its
/// `updated_at` is strictly newer at millisecond precision; equal or older
/// timestamps leave the server copy untouched.
pub fn reconcile(base: Vec<Item>, changes: ChangeSet) -> Vec<Item> {
    reconcile_detailed(base, changes).items
}

/// Like [`reconcile`], but also reports dropped modifications.
pub fn reconcile_detailed(base: Vec<Item>, changes: ChangeSet) -> ReconcileOutcome {
    let ChangeSet {
        added,
        modified,
        removed,
    } = changes;

    // 1. Drop removed items.
    let removed_ids: HashSet<LocalId> = removed.into_iter().map(|r| r.local_id).collect();
    let mut survivors: Vec<Item> = base
        .into_iter()
        .filter(|item| !removed_ids.contains(&item.local_id))
        .collect();

    // Position index over survivors; their positions are stable through the
    // modification pass since it only rewrites fields in place.
    let positions: HashMap<LocalId, usize> = survivors
        .iter()
        .enumerate()
        .map(|(idx, item)| (item.local_id.clone(), idx))
        .collect();

    // 2. Apply modifications, last-writer-wins.
    let mut conflicts = Vec::new();
    for m in modified {
        match positions.get(&m.local_id) {
            None => conflicts.push(Conflict {
                local_id: m.local_id,
                reason: ConflictReason::TargetMissing,
            }),
            Some(&idx) => {
                let current = &mut survivors[idx];
                if m.newer_than(current) {
                    current.replace_content(&m);
                } else {
                    conflicts.push(Conflict {
                        local_id: m.local_id,
                        reason: ConflictReason::StaleTimestamp,
                    });
                }
            }
        }
    }

    // 3. Append additions, preserving localId uniqueness.
    let mut known_ids: HashSet<LocalId> = positions.into_keys().collect();
    for item in added {
        if known_ids.insert(item.local_id.clone()) {
            survivors.push(item);
        }
    }

    // 4. Stable sort, then renumber to a dense sequence. total_cmp keeps the
    // sort deterministic even for non-finite index_order values.
    survivors.sort_by(|a, b| a.index_order.total_cmp(&b.index_order));
    for (idx, item) in survivors.iter_mut().enumerate() {
        item.index_order = idx as f64;
        item.origin = Origin::Persisted;
    }

    ReconcileOutcome {
        items: survivors,
        conflicts,
    }
}
