use rbtree_core::{Color, Error, Key, RbTree};
use rbtree_test_support::{assert_tree_matches, tree_from};

#[test]
fn insert_then_export_round_trip() {
    let tree = tree_from(&[5, 3, 8, 1, 4, 7, 9]);
    let mut buffer = [0; 7];
    let written = tree.export_inorder(&mut buffer).unwrap();
    assert_eq!(written, 7);
    assert_eq!(buffer, [1, 3, 4, 5, 7, 8, 9]);
    tree.validate_invariants().unwrap();
}

#[test]
fn find_returns_matching_handles() {
    let keys = [50, 20, 80, 10, 30, 70, 90, 25, 35];
    let tree = tree_from(&keys);
    for key in keys {
        let handle = tree.find(key).unwrap();
        assert_eq!(tree.key(handle).unwrap(), key);
    }
    for missing in [0, 15, 55, 100, -5] {
        assert!(tree.find(missing).is_none(), "found {missing}");
        assert!(!tree.contains(missing));
    }
}

#[test]
fn erase_then_find_reports_not_found() {
    let mut tree = tree_from(&[4, 2, 6, 1, 3]);
    let before = tree.len();

    let handle = tree.insert(5).unwrap();
    assert_eq!(tree.len(), before + 1);
    tree.erase(handle).unwrap();

    assert!(tree.find(5).is_none());
    assert_eq!(tree.len(), before);
    assert_tree_matches(&tree, &[4, 2, 6, 1, 3]);
}

#[test]
fn min_and_max_bracket_every_key() {
    let keys = [17, -4, 99, 0, 42, 42, -100, 8];
    let mut tree = RbTree::new();
    for key in keys {
        tree.insert(key).unwrap();
        let min = tree.key(tree.min().unwrap()).unwrap();
        let max = tree.key(tree.max().unwrap()).unwrap();
        let exported = tree.to_vec();
        assert_eq!(Some(&min), exported.first());
        assert_eq!(Some(&max), exported.last());
        assert!(exported.iter().all(|&k| min <= k && k <= max));
    }
}

#[test]
fn empty_tree_min_max_are_errors() {
    let mut tree = tree_from(&[1]);
    tree.remove(1).unwrap();
    assert!(matches!(tree.min(), Err(Error::EmptyTree)));
    assert!(matches!(tree.max(), Err(Error::EmptyTree)));
    assert_eq!(tree.to_vec(), Vec::<Key>::new());
}

#[test]
fn duplicates_are_allowed_and_removed_one_at_a_time() {
    let mut tree = tree_from(&[3, 3, 1, 3, 2]);
    assert_tree_matches(&tree, &[1, 2, 3, 3, 3]);

    assert!(tree.remove(3).unwrap());
    assert_tree_matches(&tree, &[1, 2, 3, 3]);
    assert!(tree.remove(3).unwrap());
    assert!(tree.remove(3).unwrap());
    assert!(!tree.remove(3).unwrap());
    assert_tree_matches(&tree, &[1, 2]);
}

#[test]
fn handles_survive_unrelated_erases() {
    let mut tree = tree_from(&(1..=32).collect::<Vec<_>>());
    let keep = tree.find(17).unwrap();
    for key in (1..=32).filter(|k| *k != 17) {
        tree.remove(key).unwrap();
        assert_eq!(tree.key(keep).unwrap(), 17);
    }
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.color(keep).unwrap(), Color::Black);
}

#[test]
fn export_overflow_is_reported() {
    let tree = tree_from(&[1, 2, 3, 4]);
    let mut buffer = [0; 3];
    match tree.export_inorder(&mut buffer) {
        Err(Error::ExportOverflow { needed, capacity }) => {
            assert_eq!((needed, capacity), (4, 3));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn handles_from_other_trees_are_invalid() {
    let mut a = tree_from(&[1, 2, 3]);
    let b = tree_from(&[1, 2, 3]);
    let foreign = b.find(2).unwrap();
    assert!(matches!(a.erase(foreign), Err(Error::InvalidHandle(_))));
    assert_tree_matches(&a, &[1, 2, 3]);
}

#[test]
fn debug_lists_keys_in_order() {
    let tree = tree_from(&[3, 1, 2]);
    assert_eq!(format!("{tree:?}"), "[1, 2, 3]");
}

#[test]
fn iteration_matches_export() {
    let tree = tree_from(&[9, -3, 14, 0, 6, 6]);
    let collected: Vec<Key> = (&tree).into_iter().collect();
    assert_eq!(collected, tree.to_vec());
    assert_eq!(collected, vec![-3, 0, 6, 6, 9, 14]);
}

#[test]
fn destroy_consumes_a_populated_tree() {
    let tree = tree_from(&(0..500).rev().collect::<Vec<_>>());
    tree.validate_invariants().unwrap();
    tree.destroy();
}
