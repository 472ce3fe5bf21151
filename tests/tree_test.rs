//! Behavioural tests for TaskTree: insert, find, delete, move, listing

use rstest::{fixture, rstest};

use tasktree::domain::{Extractor, InsertOutcome, MoveError, MoveOutcome, Task, TaskTree};
use tasktree::util::testing;

fn ids(tree: &TaskTree<Task>) -> Vec<u64> {
    tree.payloads().map(|t| t.id).collect()
}

//          1
//        / | \
//       2  4  6
//       |  |
//       3  5
#[fixture]
fn tree() -> TaskTree<Task> {
    testing::init_test_setup();
    let mut tree = TaskTree::new();
    tree.insert(Task::new(1, "release"), None);
    tree.insert(Task::new(2, "docs"), Some(1));
    tree.insert(Task::new(3, "changelog"), Some(2));
    tree.insert(Task::new(4, "build"), Some(1));
    tree.insert(Task::new(5, "sign"), Some(4));
    tree.insert(Task::new(6, "announce"), Some(1));
    tree
}

// ============================================================
// Insert
// ============================================================

#[rstest]
#[case(None)]
#[case(Some(1))]
#[case(Some(999))]
fn given_empty_tree_when_inserting_then_becomes_root_regardless_of_parent(#[case] parent: Option<u64>) {
    let mut tree = TaskTree::new();
    let outcome = tree.insert(Task::new(10, "first"), parent);
    assert_eq!(outcome, InsertOutcome::BecameRoot);
    assert_eq!(tree.get(tree.root().unwrap()).unwrap().id, 10);
    assert_eq!(tree.len(), 1);
}

#[rstest]
fn given_root_when_inserting_without_parent_then_attached_to_root(mut tree: TaskTree<Task>) {
    let outcome = tree.insert(Task::new(7, "extra"), None);
    assert_eq!(outcome, InsertOutcome::AttachedToRoot);
    let root = tree.root().unwrap();
    let last = *tree.children(root).last().unwrap();
    assert_eq!(tree.get(last).unwrap().id, 7);
}

#[rstest]
fn given_missing_parent_when_inserting_then_falls_back_to_root(mut tree: TaskTree<Task>) {
    let outcome = tree.insert(Task::new(7, "stray"), Some(999));
    assert_eq!(outcome, InsertOutcome::ParentNotFoundAttachedToRoot(999));
    assert!(!outcome.is_exact());
    let node = tree.find_node(&7).unwrap();
    assert_eq!(tree.parent(node), tree.root());
}

#[rstest]
fn given_valid_parents_when_inserting_then_listing_is_preorder(tree: TaskTree<Task>) {
    assert_eq!(ids(&tree), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn given_scenario_root_and_child_when_listing_then_both_in_order() {
    let mut tree = TaskTree::new();
    assert_eq!(tree.insert(Task::new(1, "a"), None), InsertOutcome::BecameRoot);
    assert_eq!(tree.insert(Task::new(2, "b"), Some(1)), InsertOutcome::AttachedTo(1));
    assert_eq!(ids(&tree), vec![1, 2]);
}

// ============================================================
// Find
// ============================================================

#[rstest]
fn given_existing_id_when_finding_then_returns_matching_payload(tree: TaskTree<Task>) {
    assert_eq!(tree.find(&5).map(|t| t.title.as_str()), Some("sign"));
}

#[rstest]
fn given_absent_id_when_finding_then_none(tree: TaskTree<Task>) {
    assert_eq!(tree.find(&42), None);
    assert_eq!(TaskTree::<Task>::new().find(&1), None);
}

#[test]
fn given_duplicate_ids_when_finding_then_first_in_preorder_wins() {
    let mut tree = TaskTree::new();
    tree.insert(Task::new(1, "root"), None);
    tree.insert(Task::new(2, "branch"), Some(1));
    tree.insert(Task::new(9, "deep"), Some(2));
    tree.insert(Task::new(9, "shallow"), Some(1));
    assert_eq!(tree.find(&9).unwrap().title, "deep");
}

// ============================================================
// Delete
// ============================================================

#[rstest]
fn given_root_id_when_deleting_then_tree_is_empty(mut tree: TaskTree<Task>) {
    assert!(tree.delete(&1));
    assert!(tree.is_empty());
    assert!(tree.list_payloads().is_empty());
    assert_eq!(tree.len(), 0);
}

#[rstest]
fn given_inner_node_when_deleting_then_subtree_goes_and_siblings_stay(mut tree: TaskTree<Task>) {
    assert!(tree.delete(&4));
    assert_eq!(ids(&tree), vec![1, 2, 3, 6]);
    assert_eq!(tree.find(&5), None);
}

#[rstest]
fn given_absent_id_when_deleting_then_false_and_unchanged(mut tree: TaskTree<Task>) {
    let before = tree.list_payloads();
    assert!(!tree.delete(&42));
    assert_eq!(tree.list_payloads(), before);
    assert!(!TaskTree::<Task>::new().delete(&1));
}

#[rstest]
fn given_deleted_tree_when_inserting_then_new_root(mut tree: TaskTree<Task>) {
    tree.delete(&1);
    assert_eq!(tree.insert(Task::new(8, "again"), Some(1)), InsertOutcome::BecameRoot);
    assert_eq!(ids(&tree), vec![8]);
}

// ============================================================
// Move
// ============================================================

#[rstest]
fn given_child_of_root_when_moving_to_top_level_then_reattached_under_root(mut tree: TaskTree<Task>) {
    assert_eq!(tree.try_move(&2, None), Ok(MoveOutcome::AttachedToRoot));
    // moved to the end of the root's children, with its own subtree
    assert_eq!(ids(&tree), vec![1, 4, 5, 6, 2, 3]);
}

#[test]
fn given_chain_when_moving_middle_to_top_level_then_preorder_unchanged() {
    let mut tree = TaskTree::new();
    tree.insert(Task::new(1, "a"), None);
    tree.insert(Task::new(2, "b"), Some(1));
    tree.insert(Task::new(3, "c"), Some(2));
    assert!(tree.move_node(&2, None));
    assert_eq!(ids(&tree), vec![1, 2, 3]);
}

#[rstest]
fn given_valid_destination_when_moving_then_subtree_travels_along(mut tree: TaskTree<Task>) {
    let mut before = ids(&tree);
    assert_eq!(tree.try_move(&4, Some(&3)), Ok(MoveOutcome::AttachedTo(3)));
    assert_eq!(ids(&tree), vec![1, 2, 3, 4, 5, 6]);

    let four = tree.find_node(&4).unwrap();
    assert_eq!(tree.parent(four), tree.find_node(&3));
    let subtree: Vec<u64> = tree.descendants(four).map(|(_, t)| t.id).collect();
    assert_eq!(subtree, vec![4, 5]);

    let mut after = ids(&tree);
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[rstest]
fn given_missing_node_when_moving_then_false_and_unchanged(mut tree: TaskTree<Task>) {
    let before = tree.list_payloads();
    assert!(!tree.move_node(&99, Some(&1)));
    assert_eq!(tree.try_move(&99, None), Err(MoveError::SourceNotFound(99)));
    assert_eq!(tree.list_payloads(), before);
}

#[rstest]
fn given_missing_destination_when_moving_then_false_and_unchanged(mut tree: TaskTree<Task>) {
    let before = tree.list_payloads();
    assert_eq!(tree.try_move(&4, Some(&99)), Err(MoveError::DestinationNotFound(99)));
    assert_eq!(tree.list_payloads(), before);
}

#[rstest]
#[case(2, 3)]
#[case(1, 5)]
#[case(4, 4)]
fn given_destination_inside_subtree_when_moving_then_cycle_rejected(
    mut tree: TaskTree<Task>,
    #[case] moved: u64,
    #[case] destination: u64,
) {
    let before = tree.list_payloads();
    assert_eq!(
        tree.try_move(&moved, Some(&destination)),
        Err(MoveError::CycleDetected { moved, destination })
    );
    assert_eq!(tree.list_payloads(), before);
}

#[rstest]
fn given_root_when_moving_to_top_level_then_nothing_changes(mut tree: TaskTree<Task>) {
    let before = tree.list_payloads();
    assert_eq!(tree.try_move(&1, None), Ok(MoveOutcome::Root));
    assert_eq!(tree.list_payloads(), before);
}

#[rstest]
fn given_root_when_moving_to_missing_destination_then_root_and_tree_unchanged(
    mut tree: TaskTree<Task>,
) {
    let before = tree.list_payloads();
    let root = tree.root();

    assert_eq!(tree.try_move(&1, Some(&99)), Err(MoveError::DestinationNotFound(99)));
    assert!(!tree.move_node(&1, Some(&99)));

    assert_eq!(tree.root(), root);
    assert_eq!(tree.find(&1).map(|t| t.title.as_str()), Some("release"));
    assert_eq!(tree.list_payloads(), before);
    assert_eq!(tree.depth(), 3);
}

#[test]
fn given_duplicate_destination_inside_and_outside_subtree_when_moving_then_uses_outside() {
    let mut tree = TaskTree::new();
    tree.insert(Task::new(1, "root"), None);
    tree.insert(Task::new(2, "moved"), Some(1));
    tree.insert(Task::new(9, "inside"), Some(2));
    tree.insert(Task::new(9, "outside"), Some(1));

    assert_eq!(tree.try_move(&2, Some(&9)), Ok(MoveOutcome::AttachedTo(9)));
    let moved = tree.find_node(&2).unwrap();
    let parent = tree.parent(moved).unwrap();
    assert_eq!(tree.get(parent).unwrap().title, "outside");
}

// ============================================================
// Custom extractors
// ============================================================

#[derive(Debug, Clone, PartialEq)]
struct Note {
    slug: Option<&'static str>,
}

#[test]
fn given_closure_extractor_when_building_then_keys_by_closure() {
    let mut tree = TaskTree::with_extractor(Extractor::new(|n: &Note| n.slug));
    tree.insert(Note { slug: Some("inbox") }, None);
    tree.insert(Note { slug: None }, Some("inbox"));
    tree.insert(Note { slug: Some("later") }, Some("inbox"));

    assert_eq!(tree.find(&"later"), Some(&Note { slug: Some("later") }));
    assert!(tree.delete(&"later"));
    assert_eq!(tree.len(), 2);
}
