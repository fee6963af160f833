use crate::ids::Key;
use crate::tree::RbTree;

/// Build a tree by inserting `keys` in order.
pub(crate) fn tree_of(keys: &[Key]) -> RbTree {
    let mut tree = RbTree::new();
    for &key in keys {
        tree.insert(key).unwrap();
    }
    tree
}
