//! Rotation primitives composed by the insert and delete fixups.
//!
//! Both rotations are O(1) link rewiring: no colors change and the in-order key sequence is
//! preserved.

use crate::ids::{NodeIndex, NIL};
use crate::tree::RbTree;

impl RbTree {
    /// Promote `x`'s right child into `x`'s position; `x` becomes its left child.
    ///
    /// `x.right` must not be the sentinel.
    pub(crate) fn rotate_left(&mut self, x: NodeIndex) {
        let y = self.arena.right(x);
        debug_assert_ne!(y, NIL, "rotate_left pivot on the sentinel");

        // y's left subtree becomes x's right subtree
        let inner = self.arena.left(y);
        self.arena.set_right(x, inner);
        if inner != NIL {
            self.arena.set_parent(inner, x);
        }

        self.replace_child(x, y);

        self.arena.set_left(y, x);
        self.arena.set_parent(x, y);
    }

    /// Promote `x`'s left child into `x`'s position; `x` becomes its right child.
    ///
    /// `x.left` must not be the sentinel.
    pub(crate) fn rotate_right(&mut self, x: NodeIndex) {
        let y = self.arena.left(x);
        debug_assert_ne!(y, NIL, "rotate_right pivot on the sentinel");

        let inner = self.arena.right(y);
        self.arena.set_left(x, inner);
        if inner != NIL {
            self.arena.set_parent(inner, x);
        }

        self.replace_child(x, y);

        self.arena.set_right(y, x);
        self.arena.set_parent(x, y);
    }

    /// Put `y` into `x`'s slot under `x`'s parent, or make it the root.
    fn replace_child(&mut self, x: NodeIndex, y: NodeIndex) {
        let parent = self.arena.parent(x);
        self.arena.set_parent(y, parent);
        if parent == NIL {
            self.root = y;
        } else if x == self.arena.left(parent) {
            self.arena.set_left(parent, y);
        } else {
            self.arena.set_right(parent, y);
        }
    }
}
