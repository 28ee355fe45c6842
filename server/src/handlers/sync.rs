//! Sync handler - reconciles a client change set against a room's
//! canonical to-do list.
//!
//! The engine does the merging; this handler owns the contract around it:
//! read the current list, reconcile, and write the result back inside one
//! transaction with the room row locked, so concurrent syncs from
//! different clients serialize instead of losing updates.

use crate::auth::RoomSession;
use crate::db;
use crate::error::{AppError, Result};
use serde::Serialize;
use sqlx::PgPool;
use tandem_engine::{reconcile_detailed, ChangeSet, Conflict, Item, RemoteRef};
use uuid::Uuid;

/// Response for a sync request: the new canonical list plus any
/// modifications that were dropped during reconciliation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub todos: Vec<Item>,
    pub conflicts: Vec<Conflict>,
    pub revision: i64,
}

/// Process a sync request for a room.
pub async fn handle_sync(
    pool: &PgPool,
    session: &RoomSession,
    name: &str,
    changes: ChangeSet,
) -> Result<SyncResponse> {
    let room = db::find_room(pool, name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {name} not found")))?;

    if !session.grants(room.id) {
        return Err(AppError::Unauthorized);
    }

    for issue in changes.lint() {
        tracing::warn!(room = %room.name, "Inconsistent change set: {issue}");
    }

    let mut tx = pool.begin().await?;

    // Re-read under the row lock; the pre-lock read only resolved the name.
    let locked = db::lock_room(&mut *tx, room.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {name} not found")))?;

    let base = locked.todos()?;
    let outcome = reconcile_detailed(base, changes);

    let todos = assign_remote_identity(outcome.items, locked.revision + 1);
    let revision = db::write_todos(&mut *tx, room.id, &todos).await?;

    tx.commit().await?;

    tracing::debug!(
        room = %room.name,
        items = todos.len(),
        conflicts = outcome.conflicts.len(),
        revision,
        "Sync applied"
    );

    Ok(SyncResponse {
        todos,
        conflicts: outcome.conflicts,
        revision,
    })
}

/// Give newly persisted items their server-side identity.
///
/// The engine passes `remote` through untouched; items that arrive without
/// one were just added, so they get a fresh document id stamped with the
/// revision this sync will persist as.
fn assign_remote_identity(mut items: Vec<Item>, revision: i64) -> Vec<Item> {
    for item in &mut items {
        if item.remote.is_none() {
            item.remote = Some(RemoteRef {
                id: Uuid::new_v4().to_string(),
                revision: revision as u64,
            });
        }
    }
    items
}
