//! # Tandem Engine
//!
//! The reconciliation core for Tandem, a collaborative anonymous to-do
//! service. Rooms hold a canonical list of to-do items; clients edit their
//! local copy offline and submit a change set (added, modified, removed).
//! This crate merges a change set against the canonical list and produces
//! the new canonical list.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of HTTP, sessions, or storage
//! - **Total**: reconciliation never fails; malformed change sets degrade
//!   to no-ops or reported conflicts, never errors
//! - **Deterministic**: the same inputs always produce the same list
//!
//! ## Core Concepts
//!
//! ### Items
//!
//! An [`Item`] is identified by its client-generated `local_id`, which is
//! stable across edits and is the sole key used to correlate client and
//! server copies. Server-side identity ([`RemoteRef`]) is opaque
//! pass-through data the engine never interprets.
//!
//! ### Change sets
//!
//! A [`ChangeSet`] carries three disjoint lists: `added` (items with no
//! server existence yet), `modified` (items with a fresh `updated_at`),
//! and `removed` (only the `local_id` matters). [`ChangeSet::lint`]
//! flags client-side bugs such as an id appearing in both `removed` and
//! `modified`, without turning them into failures.
//!
//! ### Reconciliation
//!
//! [`reconcile`] applies removals, merges modifications with
//! last-writer-wins on `updated_at` (millisecond precision, server wins
//! ties), appends additions, then stable-sorts by `index_order` and
//! renumbers to a dense `0..N-1` sequence. [`reconcile_detailed`]
//! additionally reports which modifications were dropped and why.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use tandem_engine::{reconcile, ChangeSet, Item};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let t1 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
//!
//! let base = vec![Item::new("a", "buy milk", 0.0, t0)];
//! let changes = ChangeSet {
//!     added: vec![Item::new("b", "water plants", 0.5, t1)],
//!     modified: vec![],
//!     removed: vec![],
//! };
//!
//! let merged = reconcile(base, changes);
//! assert_eq!(merged.len(), 2);
//! // Fractional insert positions are normalized back to a dense sequence.
//! assert_eq!(merged[1].local_id, "b");
//! assert_eq!(merged[1].index_order, 1.0);
//! ```

pub mod changeset;
pub mod item;
pub mod reconcile;

// Re-export main types at crate root
pub use changeset::{ChangeSet, ChangeSetIssue, Removal};
pub use item::{Item, Origin, RemoteRef};
pub use reconcile::{reconcile, reconcile_detailed, Conflict, ConflictReason, ReconcileOutcome};

/// Type alias for clarity
pub type LocalId = String;
