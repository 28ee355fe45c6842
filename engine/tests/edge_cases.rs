//! Edge case tests for tandem-engine
//!
//! These tests cover boundary conditions and unusual inputs.

use chrono::{DateTime, TimeZone, Utc};
use tandem_engine::{
    reconcile, reconcile_detailed, ChangeSet, ConflictReason, Item, Origin, Removal, RemoteRef,
};

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn persisted(local_id: &str, title: &str, index_order: f64, secs: i64) -> Item {
    let mut item = Item::new(local_id, title, index_order, ts(secs));
    item.origin = Origin::Persisted;
    item.remote = Some(RemoteRef {
        id: format!("doc-{local_id}"),
        revision: 1,
    });
    item
}

// ============================================================================
// Empty Inputs
// ============================================================================

#[test]
fn everything_empty() {
    let result = reconcile(vec![], ChangeSet::default());
    assert!(result.is_empty());
}

#[test]
fn empty_base_with_changes() {
    let outcome = reconcile_detailed(
        vec![],
        ChangeSet {
            added: vec![Item::new("a", "new", 3.0, ts(100))],
            modified: vec![Item::new("ghost", "edit", 0.0, ts(100))],
            removed: vec![Removal::new("also-ghost")],
        },
    );

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].local_id, "a");
    assert_eq!(outcome.items[0].index_order, 0.0);
    assert_eq!(outcome.conflicts.len(), 1);
    assert_eq!(outcome.conflicts[0].reason, ConflictReason::TargetMissing);
}

#[test]
fn removing_every_item() {
    let base = vec![
        persisted("a", "one", 0.0, 100),
        persisted("b", "two", 1.0, 100),
    ];

    let result = reconcile(
        base,
        ChangeSet::removals(["a".to_string(), "b".to_string()]),
    );
    assert!(result.is_empty());
}

// ============================================================================
// String Edge Cases
// ============================================================================

#[test]
fn unicode_titles() {
    let titles = [
        "日本語テスト",
        "Привет мир",
        "مرحبا بالعالم",
        "🎉🚀💯",
        "Hello\nWorld\tTab",
    ];

    let added: Vec<Item> = titles
        .iter()
        .enumerate()
        .map(|(idx, title)| Item::new(format!("item-{idx}"), *title, idx as f64, ts(100)))
        .collect();

    let result = reconcile(
        vec![],
        ChangeSet {
            added,
            ..Default::default()
        },
    );

    assert_eq!(result.len(), titles.len());
    for (item, title) in result.iter().zip(&titles) {
        assert_eq!(item.title, *title);
    }
}

#[test]
fn empty_title_is_preserved() {
    let result = reconcile(
        vec![],
        ChangeSet {
            added: vec![Item::new("a", "", 0.0, ts(100))],
            ..Default::default()
        },
    );
    assert_eq!(result[0].title, "");
}

// ============================================================================
// Clock Skew
// ============================================================================

#[test]
fn client_clock_far_in_future_still_wins() {
    // A skewed client clock years ahead wins LWW. Accepted limitation of a
    // timestamp-based design; the merge must still be deterministic.
    let base = vec![persisted("a", "server", 0.0, 100)];
    let skewed = Item::new("a", "from the future", 0.0, ts(4_102_444_800)); // 2100

    let result = reconcile(
        base,
        ChangeSet {
            modified: vec![skewed],
            ..Default::default()
        },
    );
    assert_eq!(result[0].title, "from the future");
}

#[test]
fn client_clock_before_epoch_loses() {
    let base = vec![persisted("a", "server", 0.0, 100)];
    let skewed = Item::new("a", "from the past", 0.0, ts(-86_400));

    let outcome = reconcile_detailed(
        base,
        ChangeSet {
            modified: vec![skewed],
            ..Default::default()
        },
    );
    assert_eq!(outcome.items[0].title, "server");
    assert_eq!(outcome.conflicts[0].reason, ConflictReason::StaleTimestamp);
}

#[test]
fn repeated_submission_of_winning_edit_is_idempotent() {
    // Client retries the same modification after it already won: the second
    // pass ties on updated_at and leaves the (identical) server copy alone.
    let base = vec![persisted("a", "old", 0.0, 100)];
    let edit = Item::new("a", "new", 0.0, ts(200));

    let changes = ChangeSet {
        modified: vec![edit],
        ..Default::default()
    };

    let first = reconcile(base, changes.clone());
    let second = reconcile(first.clone(), changes);
    assert_eq!(first, second);
    assert_eq!(second[0].title, "new");
}

// ============================================================================
// Ordering Edge Cases
// ============================================================================

#[test]
fn negative_and_fractional_orders() {
    let base = vec![
        persisted("b", "middle", 0.0, 100),
        persisted("c", "last", 10.0, 100),
    ];
    let before_everything = Item::new("a", "first", -1.5, ts(100));

    let result = reconcile(
        base,
        ChangeSet {
            added: vec![before_everything],
            ..Default::default()
        },
    );

    let ids: Vec<&str> = result.iter().map(|i| i.local_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    let orders: Vec<f64> = result.iter().map(|i| i.index_order).collect();
    assert_eq!(orders, vec![0.0, 1.0, 2.0]);
}

#[test]
fn non_finite_orders_are_deterministic() {
    // Garbage in, deterministic out: NaN sorts last under total_cmp and the
    // renumber pass erases it.
    let base = vec![persisted("a", "fine", 0.0, 100)];
    let mut weird = Item::new("b", "nan order", f64::NAN, ts(100));
    weird.is_checked = true;
    let inf = Item::new("c", "inf order", f64::INFINITY, ts(100));

    let result = reconcile(
        base,
        ChangeSet {
            added: vec![weird, inf],
            ..Default::default()
        },
    );

    let ids: Vec<&str> = result.iter().map(|i| i.local_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
    assert!(result.iter().all(|i| i.index_order.is_finite()));
}

#[test]
fn large_list_renumbering() {
    let base: Vec<Item> = (0..1000)
        .map(|idx| persisted(&format!("item-{idx}"), "t", (idx as f64) * 2.5, 100))
        .collect();

    let result = reconcile(base, ChangeSet::default());

    assert_eq!(result.len(), 1000);
    for (idx, item) in result.iter().enumerate() {
        assert_eq!(item.index_order, idx as f64);
    }
}

// ============================================================================
// Identity Edge Cases
// ============================================================================

#[test]
fn base_pass_through_fields_survive_winning_edit() {
    let mut base_item = persisted("a", "old", 0.0, 100);
    base_item.remote = Some(RemoteRef {
        id: "mongo-4af".into(),
        revision: 7,
    });

    let result = reconcile(
        vec![base_item],
        ChangeSet {
            modified: vec![Item::new("a", "new", 0.0, ts(500))],
            ..Default::default()
        },
    );

    let remote = result[0].remote.as_ref().unwrap();
    assert_eq!(remote.id, "mongo-4af");
    assert_eq!(remote.revision, 7);
}

#[test]
fn output_is_all_persisted() {
    let outcome = reconcile_detailed(
        vec![persisted("a", "kept", 0.0, 100)],
        ChangeSet {
            added: vec![Item::new("b", "fresh", 1.0, ts(100))],
            ..Default::default()
        },
    );

    assert!(outcome
        .items
        .iter()
        .all(|item| item.origin == Origin::Persisted));
}
