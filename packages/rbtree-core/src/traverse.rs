//! In-order export and whole-tree teardown.
//!
//! Every walk here keeps its own stack of node indices instead of recursing, so auxiliary
//! space is bounded by the tree height and deep trees cannot exhaust the call stack.

use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::ids::{Key, NodeIndex, NIL};
use crate::tracing_helpers::debug_log;
use crate::tree::RbTree;

/// In-order iterator over the keys of an [`RbTree`].
pub struct Iter<'a> {
    tree: &'a RbTree,
    stack: Vec<NodeIndex>,
    current: NodeIndex,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(tree: &'a RbTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root,
            remaining: tree.len(),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        let arena = &self.tree.arena;
        while self.current != NIL {
            self.stack.push(self.current);
            self.current = arena.left(self.current);
        }
        let node = self.stack.pop()?;
        self.current = arena.right(node);
        self.remaining -= 1;
        Some(arena.key(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RbTree {
    type Item = Key;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl RbTree {
    /// Keys in non-decreasing order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Write every key, in order, to the front of `buffer` and return how many were written.
    ///
    /// If the tree holds more keys than `buffer` can take, nothing is written and
    /// [`Error::ExportOverflow`] is returned. An empty tree exports zero keys.
    pub fn export_inorder(&self, buffer: &mut [Key]) -> Result<usize> {
        let needed = self.len();
        if needed > buffer.len() {
            return Err(Error::ExportOverflow {
                needed,
                capacity: buffer.len(),
            });
        }
        let mut written = 0;
        for (slot, key) in buffer.iter_mut().zip(self.iter()) {
            *slot = key;
            written += 1;
        }
        Ok(written)
    }

    /// Keys in non-decreasing order, collected into a new vector.
    pub fn to_vec(&self) -> Vec<Key> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter());
        out
    }

    /// Release every node, leaving an empty, reusable tree.
    ///
    /// Walks the tree in post-order with an explicit stack: a node is released only once its
    /// right subtree has been visited, which the `last_visited` marker records.
    pub fn clear(&mut self) {
        debug_log!(nodes = self.len(), "clearing tree");
        let mut stack: Vec<NodeIndex> = Vec::new();
        let mut current = self.root;
        let mut last_visited = NIL;

        while current != NIL || !stack.is_empty() {
            if current != NIL {
                stack.push(current);
                current = self.arena.left(current);
                continue;
            }
            let Some(&top) = stack.last() else {
                break;
            };
            let right = self.arena.right(top);
            if right != NIL && right != last_visited {
                current = right;
            } else {
                stack.pop();
                last_visited = top;
                self.arena.release(top);
            }
        }

        self.root = NIL;
        self.arena.reset_sentinel();
        debug_assert_eq!(self.len(), 0);
    }

    /// Release every node, then the sentinel and the arena itself.
    pub fn destroy(mut self) {
        self.clear();
    }
}
