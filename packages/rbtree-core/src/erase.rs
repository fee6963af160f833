use crate::arena::Color;
use crate::error::Result;
use crate::ids::{Key, NodeHandle, NodeIndex, NIL};
use crate::tracing_helpers::{debug_log, trace_log};
use crate::tree::RbTree;

impl RbTree {
    /// Remove the node behind `handle` and release its slot.
    ///
    /// Fails with [`Error::InvalidHandle`](crate::Error::InvalidHandle) for stale or foreign
    /// handles, in which case nothing is modified. Handles to other nodes stay valid.
    pub fn erase(&mut self, handle: NodeHandle) -> Result<()> {
        let z = self.resolve(handle)?;
        debug_log!(key = self.arena.key(z), "erasing");

        let mut removed_color = self.arena.color(z);
        let x;

        if self.arena.left(z) == NIL {
            x = self.arena.right(z);
            self.transplant(z, x);
        } else if self.arena.right(z) == NIL {
            x = self.arena.left(z);
            self.transplant(z, x);
        } else {
            let y = self.find_inord_successor(self.arena.right(z));
            removed_color = self.arena.color(y);
            x = self.arena.right(y);

            if self.arena.parent(y) == z {
                // x may be the sentinel; the fixup climbs from its parent
                self.arena.set_parent(x, y);
            } else {
                self.transplant(y, x);
                let right = self.arena.right(z);
                self.arena.set_right(y, right);
                self.arena.set_parent(right, y);
            }
            self.transplant(z, y);
            let left = self.arena.left(z);
            self.arena.set_left(y, left);
            self.arena.set_parent(left, y);
            self.arena.set_color(y, self.arena.color(z));
        }

        if removed_color == Color::Black {
            self.delete_fixup(x);
        }
        self.arena.reset_sentinel();
        self.arena.release(z);
        Ok(())
    }

    /// Erase one node holding `key`. Returns whether a key was removed.
    pub fn remove(&mut self, key: Key) -> Result<bool> {
        match self.find(key) {
            Some(handle) => {
                self.erase(handle)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace `u` with `v` in `u`'s parent slot. `v`'s children are left alone.
    fn transplant(&mut self, u: NodeIndex, v: NodeIndex) {
        let parent = self.arena.parent(u);
        if parent == NIL {
            self.root = v;
        } else if u == self.arena.left(parent) {
            self.arena.set_left(parent, v);
        } else {
            self.arena.set_right(parent, v);
        }
        self.arena.set_parent(v, parent);
    }

    /// Leftmost node of the subtree rooted at `subtree`. Only ever called on a right subtree
    /// root, so the result is the in-order successor of that subtree's parent.
    fn find_inord_successor(&self, subtree: NodeIndex) -> NodeIndex {
        if subtree == NIL {
            return subtree;
        }
        self.subtree_min(subtree)
    }

    /// Resolve the extra black carried by `x` after a black node was unlinked.
    fn delete_fixup(&mut self, mut x: NodeIndex) {
        while x != self.root && self.arena.is_black(x) {
            let parent = self.arena.parent(x);
            if x == self.arena.left(parent) {
                let mut w = self.arena.right(parent);

                if self.arena.is_red(w) {
                    trace_log!(node = x, "delete fixup: red sibling");
                    self.arena.set_color(w, Color::Black);
                    self.arena.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    w = self.arena.right(parent);
                }

                if self.arena.is_black(self.arena.left(w)) && self.arena.is_black(self.arena.right(w))
                {
                    trace_log!(node = x, "delete fixup: black nephews, move deficit up");
                    self.arena.set_color(w, Color::Red);
                    x = parent;
                } else {
                    if self.arena.is_black(self.arena.right(w)) {
                        trace_log!(node = x, "delete fixup: far nephew black, rotate sibling");
                        let near = self.arena.left(w);
                        self.arena.set_color(near, Color::Black);
                        self.arena.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.arena.right(parent);
                    }
                    trace_log!(node = x, "delete fixup: far nephew red, rotate parent");
                    self.arena.set_color(w, self.arena.color(parent));
                    self.arena.set_color(parent, Color::Black);
                    let far = self.arena.right(w);
                    self.arena.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut w = self.arena.left(parent);

                if self.arena.is_red(w) {
                    trace_log!(node = x, "delete fixup: red sibling");
                    self.arena.set_color(w, Color::Black);
                    self.arena.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    w = self.arena.left(parent);
                }

                if self.arena.is_black(self.arena.left(w)) && self.arena.is_black(self.arena.right(w))
                {
                    trace_log!(node = x, "delete fixup: black nephews, move deficit up");
                    self.arena.set_color(w, Color::Red);
                    x = parent;
                } else {
                    if self.arena.is_black(self.arena.left(w)) {
                        trace_log!(node = x, "delete fixup: far nephew black, rotate sibling");
                        let near = self.arena.right(w);
                        self.arena.set_color(near, Color::Black);
                        self.arena.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.arena.left(parent);
                    }
                    trace_log!(node = x, "delete fixup: far nephew red, rotate parent");
                    self.arena.set_color(w, self.arena.color(parent));
                    self.arena.set_color(parent, Color::Black);
                    let far = self.arena.left(w);
                    self.arena.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }
        self.arena.set_color(x, Color::Black);
    }
}
