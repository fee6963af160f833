use crate::arena::Color;
use crate::error::Result;
use crate::ids::{Key, NodeHandle, NodeIndex, NIL};
use crate::tracing_helpers::{debug_log, trace_log};
use crate::tree::RbTree;

impl RbTree {
    /// Insert `key` and return a handle to its new node.
    ///
    /// Equal keys descend right, so a duplicate lands after every existing equal key in
    /// the in-order sequence. On allocation failure the tree is left untouched.
    pub fn insert(&mut self, key: Key) -> Result<NodeHandle> {
        self.arena.reserve_one()?;

        let mut y = NIL;
        let mut x = self.root;
        while x != NIL {
            y = x;
            x = if key < self.arena.key(x) {
                self.arena.left(x)
            } else {
                self.arena.right(x)
            };
        }

        let z = self.arena.alloc(key);
        self.arena.set_parent(z, y);
        if y == NIL {
            self.root = z;
        } else if key < self.arena.key(y) {
            self.arena.set_left(y, z);
        } else {
            self.arena.set_right(y, z);
        }

        self.insert_fixup(z);
        debug_log!(key, len = self.len(), "inserted");
        Ok(self.handle(z))
    }

    /// Resolve a red `z` under a red parent. Each pass either recolors and climbs two levels
    /// or rotates and stops.
    fn insert_fixup(&mut self, mut z: NodeIndex) {
        while self.arena.is_red(self.arena.parent(z)) {
            let parent = self.arena.parent(z);
            // a red parent is never the root, so the grandparent is a real node
            let grandparent = self.arena.parent(parent);

            if parent == self.arena.left(grandparent) {
                let uncle = self.arena.right(grandparent);
                if self.arena.is_red(uncle) {
                    trace_log!(node = z, "insert fixup: red uncle, recolor");
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(uncle, Color::Black);
                    self.arena.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.arena.right(parent) {
                        trace_log!(node = z, "insert fixup: inner child, rotate left");
                        z = parent;
                        self.rotate_left(z);
                    }
                    trace_log!(node = z, "insert fixup: outer child, rotate right");
                    let parent = self.arena.parent(z);
                    let grandparent = self.arena.parent(parent);
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.arena.left(grandparent);
                if self.arena.is_red(uncle) {
                    trace_log!(node = z, "insert fixup: red uncle, recolor");
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(uncle, Color::Black);
                    self.arena.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.arena.left(parent) {
                        trace_log!(node = z, "insert fixup: inner child, rotate right");
                        z = parent;
                        self.rotate_right(z);
                    }
                    trace_log!(node = z, "insert fixup: outer child, rotate left");
                    let parent = self.arena.parent(z);
                    let grandparent = self.arena.parent(parent);
                    self.arena.set_color(parent, Color::Black);
                    self.arena.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.arena.set_color(root, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::Color;
    use crate::tree::RbTree;

    #[test]
    fn first_key_becomes_black_root() {
        let mut tree = RbTree::new();
        let handle = tree.insert(10).unwrap();
        assert_eq!(tree.color(handle).unwrap(), Color::Black);
        assert_eq!(tree.root, handle.index);
        tree.validate_invariants().unwrap();
    }

    #[test]
    fn red_uncle_recolors_without_rotating() {
        let mut tree = RbTree::new();
        let root = tree.insert(10).unwrap();
        let left = tree.insert(5).unwrap();
        let right = tree.insert(15).unwrap();
        assert_eq!(tree.color(left).unwrap(), Color::Red);
        assert_eq!(tree.color(right).unwrap(), Color::Red);

        let leaf = tree.insert(1).unwrap();
        assert_eq!(tree.root, root.index);
        assert_eq!(tree.color(left).unwrap(), Color::Black);
        assert_eq!(tree.color(right).unwrap(), Color::Black);
        assert_eq!(tree.color(leaf).unwrap(), Color::Red);
        tree.validate_invariants().unwrap();
    }

    #[test]
    fn outer_child_rotates_at_grandparent() {
        let mut tree = RbTree::new();
        tree.insert(1).unwrap();
        let middle = tree.insert(2).unwrap();
        tree.insert(3).unwrap();
        assert_eq!(tree.root, middle.index);
        assert_eq!(tree.color(middle).unwrap(), Color::Black);
        assert_eq!(tree.to_vec(), vec![1, 2, 3]);
        tree.validate_invariants().unwrap();
    }

    #[test]
    fn inner_child_rotates_twice() {
        let mut tree = RbTree::new();
        tree.insert(3).unwrap();
        tree.insert(1).unwrap();
        let inner = tree.insert(2).unwrap();
        assert_eq!(tree.root, inner.index);
        assert_eq!(tree.to_vec(), vec![1, 2, 3]);
        tree.validate_invariants().unwrap();
    }

    #[test]
    fn duplicates_keep_insertion_order() {
        let mut tree = RbTree::new();
        let first = tree.insert(7).unwrap();
        let second = tree.insert(7).unwrap();
        let third = tree.insert(7).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.to_vec(), vec![7, 7, 7]);

        let min = tree.min().unwrap();
        assert_eq!(min, first);
        assert_eq!(tree.successor(first).unwrap(), Some(second));
        assert_eq!(tree.successor(second).unwrap(), Some(third));
        tree.validate_invariants().unwrap();
    }

    #[test]
    fn ascending_run_stays_balanced() {
        let mut tree = RbTree::new();
        for key in 0..1024 {
            tree.insert(key).unwrap();
        }
        tree.validate_invariants().unwrap();
        // 2 * log2(n + 1) bound
        assert!(tree.height() <= 20, "height {}", tree.height());
    }
}
