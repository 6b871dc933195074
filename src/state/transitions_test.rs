use super::*;

type List = TransitionList<&'static str, (&'static str, u32)>;

fn key(item: &(&'static str, u32)) -> &'static str {
    item.0
}

fn keys(list: &List) -> Vec<&'static str> {
    list.entries().iter().map(|e| e.key).collect()
}

fn phases(list: &List) -> Vec<Phase> {
    list.entries().iter().map(|e| e.phase).collect()
}

fn instance_of(list: &List, k: &str) -> u64 {
    list.entries().iter().find(|e| e.key == k).map(|e| e.instance).expect("key listed")
}

fn abc() -> List {
    let mut list = List::default();
    list.reconcile([("A", 1), ("B", 1), ("C", 1)], key, 0.0);
    list.settle(TRANSITION_MS);
    list
}

// =============================================================
// Enter
// =============================================================

#[test]
fn new_rows_enter_then_become_visible() {
    let mut list = List::default();
    list.reconcile([("A", 1), ("B", 1)], key, 0.0);
    assert_eq!(phases(&list), vec![Phase::Entering, Phase::Entering]);
    assert_eq!(list.next_deadline(), Some(TRANSITION_MS));

    assert!(!list.settle(TRANSITION_MS - 1.0));
    assert!(list.settle(TRANSITION_MS));
    assert_eq!(phases(&list), vec![Phase::Visible, Phase::Visible]);
    assert_eq!(list.next_deadline(), None);
}

#[test]
fn first_row_is_primary() {
    let list = abc();
    let entries = list.entries();
    assert!(list.is_primary(&entries[0]));
    assert!(!list.is_primary(&entries[1]));
}

// =============================================================
// Exit
// =============================================================

#[test]
fn removed_row_exits_in_place_while_survivors_keep_identity() {
    let mut list = abc();
    let a = instance_of(&list, "A");
    let c = instance_of(&list, "C");

    list.reconcile([("A", 1), ("C", 1)], key, 1_000.0);
    assert_eq!(keys(&list), vec!["A", "B", "C"]);
    assert_eq!(phases(&list), vec![Phase::Visible, Phase::Exiting, Phase::Visible]);
    assert_eq!(instance_of(&list, "A"), a);
    assert_eq!(instance_of(&list, "C"), c);

    list.settle(1_000.0 + TRANSITION_MS - 1.0);
    assert_eq!(keys(&list), vec!["A", "B", "C"]);
    list.settle(1_000.0 + TRANSITION_MS);
    assert_eq!(keys(&list), vec!["A", "C"]);
}

#[test]
fn exiting_first_row_stays_in_front_and_is_not_primary() {
    let mut list = abc();
    list.reconcile([("B", 1), ("C", 1)], key, 1_000.0);
    assert_eq!(keys(&list), vec!["A", "B", "C"]);
    let entries = list.entries();
    assert!(!list.is_primary(&entries[0]));
    assert!(list.is_primary(&entries[1]));
}

#[test]
fn row_returning_while_exiting_reuses_its_instance() {
    let mut list = abc();
    let b = instance_of(&list, "B");
    list.reconcile([("A", 1), ("C", 1)], key, 1_000.0);
    list.reconcile([("A", 1), ("B", 2), ("C", 1)], key, 1_200.0);

    let entry = list.by_instance(b).expect("B still listed");
    assert_eq!(entry.phase, Phase::Entering);
    assert_eq!(entry.item, ("B", 2));
    assert_eq!(entry.since_ms, 1_200.0);
}

#[test]
fn empty_snapshot_exits_everything() {
    let mut list = abc();
    list.reconcile([], key, 1_000.0);
    assert_eq!(phases(&list), vec![Phase::Exiting; 3]);
    list.settle(1_000.0 + TRANSITION_MS);
    assert!(list.entries().is_empty());
}

// =============================================================
// Reorder and update
// =============================================================

#[test]
fn reorder_moves_rows_without_new_instances() {
    let mut list = abc();
    let before: Vec<u64> = ["A", "B", "C"].iter().map(|k| instance_of(&list, k)).collect();

    list.reconcile([("C", 1), ("A", 1), ("B", 1)], key, 1_000.0);
    assert_eq!(keys(&list), vec!["C", "A", "B"]);
    assert_eq!(phases(&list), vec![Phase::Visible; 3]);
    let after: Vec<u64> = ["A", "B", "C"].iter().map(|k| instance_of(&list, k)).collect();
    assert_eq!(before, after);
}

#[test]
fn surviving_row_takes_new_value_immediately() {
    let mut list = abc();
    list.reconcile([("A", 7), ("B", 1), ("C", 1)], key, 1_000.0);
    assert_eq!(list.entries()[0].item, ("A", 7));
    assert_eq!(list.entries()[0].phase, Phase::Visible);
}

#[test]
fn duplicate_keys_keep_first_occurrence() {
    let mut list = List::default();
    list.reconcile([("A", 1), ("A", 2), ("B", 1)], key, 0.0);
    assert_eq!(keys(&list), vec!["A", "B"]);
    assert_eq!(list.entries()[0].item, ("A", 1));
}
