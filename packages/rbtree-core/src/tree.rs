use std::fmt;

use crate::arena::{Arena, Color};
use crate::error::{Error, Result};
use crate::ids::{Key, NodeHandle, NodeIndex, TreeId, NIL};
use crate::tracing_helpers::warn_log;

/// Red-black tree over [`Key`]s.
///
/// Duplicate keys are allowed: an equal key descends right on insert, so equal keys keep
/// their insertion order in the in-order sequence.
pub struct RbTree {
    pub(crate) id: TreeId,
    pub(crate) arena: Arena,
    pub(crate) root: NodeIndex,
}

impl RbTree {
    /// Create an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if the sentinel slot cannot be allocated. Use [`RbTree::try_new`] to observe
    /// that failure instead.
    pub fn new() -> Self {
        Self {
            id: TreeId::next(),
            arena: Arena::new().unwrap_or_else(|err| panic!("rbtree sentinel: {err}")),
            root: NIL,
        }
    }

    /// Create an empty tree, reporting allocation failure of the sentinel slot.
    pub fn try_new() -> Result<Self> {
        Ok(Self {
            id: TreeId::next(),
            arena: Arena::new()?,
            root: NIL,
        })
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Key stored at a live node.
    pub fn key(&self, handle: NodeHandle) -> Result<Key> {
        let index = self.resolve(handle)?;
        Ok(self.arena.key(index))
    }

    /// Color of a live node.
    pub fn color(&self, handle: NodeHandle) -> Result<Color> {
        let index = self.resolve(handle)?;
        Ok(self.arena.color(index))
    }

    /// Find a node holding `key`. With duplicates, the first equal key met on the way down
    /// from the root is returned.
    pub fn find(&self, key: Key) -> Option<NodeHandle> {
        let mut current = self.root;
        while current != NIL {
            let current_key = self.arena.key(current);
            if key == current_key {
                return Some(self.handle(current));
            } else if key > current_key {
                current = self.arena.right(current);
            } else {
                current = self.arena.left(current);
            }
        }
        None
    }

    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// Node with the smallest key, or [`Error::EmptyTree`].
    pub fn min(&self) -> Result<NodeHandle> {
        if self.root == NIL {
            return Err(Error::EmptyTree);
        }
        Ok(self.handle(self.subtree_min(self.root)))
    }

    /// Node with the largest key, or [`Error::EmptyTree`].
    pub fn max(&self) -> Result<NodeHandle> {
        if self.root == NIL {
            return Err(Error::EmptyTree);
        }
        Ok(self.handle(self.subtree_max(self.root)))
    }

    /// In-order successor of a live node; `Ok(None)` for the last node.
    pub fn successor(&self, handle: NodeHandle) -> Result<Option<NodeHandle>> {
        let mut x = self.resolve(handle)?;
        let right = self.arena.right(x);
        if right != NIL {
            return Ok(Some(self.handle(self.subtree_min(right))));
        }
        let mut y = self.arena.parent(x);
        while y != NIL && x == self.arena.right(y) {
            x = y;
            y = self.arena.parent(y);
        }
        Ok((y != NIL).then(|| self.handle(y)))
    }

    /// In-order predecessor of a live node; `Ok(None)` for the first node.
    pub fn predecessor(&self, handle: NodeHandle) -> Result<Option<NodeHandle>> {
        let mut x = self.resolve(handle)?;
        let left = self.arena.left(x);
        if left != NIL {
            return Ok(Some(self.handle(self.subtree_max(left))));
        }
        let mut y = self.arena.parent(x);
        while y != NIL && x == self.arena.left(y) {
            x = y;
            y = self.arena.parent(y);
        }
        Ok((y != NIL).then(|| self.handle(y)))
    }

    /// Number of nodes on the longest root-to-leaf path. Zero for an empty tree.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push((self.root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in [self.arena.left(node), self.arena.right(node)] {
                if child != NIL {
                    stack.push((child, depth + 1));
                }
            }
        }
        deepest
    }

    /// Black-height of the root: BLACK nodes on the leftmost path below the root, counting
    /// the sentinel. Zero for an empty tree.
    pub fn black_height(&self) -> usize {
        if self.root == NIL {
            return 0;
        }
        let mut count = 0;
        let mut current = self.arena.left(self.root);
        loop {
            if self.arena.is_black(current) {
                count += 1;
            }
            if current == NIL {
                return count;
            }
            current = self.arena.left(current);
        }
    }

    /// Check the red-black and BST invariants, parent links, the sentinel, and the stored
    /// length. Intended for tests and debugging.
    pub fn validate_invariants(&self) -> Result<()> {
        let violation = |msg: String| Err(Error::InvariantViolation(msg));

        let sentinel = self.arena.node(NIL);
        if sentinel.color != Color::Black {
            return violation("sentinel is not black".into());
        }
        if sentinel.left != NIL || sentinel.right != NIL || sentinel.parent != NIL {
            return violation("sentinel links are not self-referential".into());
        }
        if self.root == NIL {
            if self.len() != 0 {
                return violation(format!("empty tree reports len {}", self.len()));
            }
            return Ok(());
        }
        if self.arena.is_red(self.root) {
            return violation("root is red".into());
        }
        if self.arena.parent(self.root) != NIL {
            return violation("root has a parent".into());
        }

        // (node, lower bound, upper bound, black nodes above and including node)
        let mut stack: Vec<(NodeIndex, Option<Key>, Option<Key>, usize)> = Vec::new();
        stack.push((self.root, None, None, 1));
        let mut expected_black: Option<usize> = None;
        let mut seen = 0usize;

        while let Some((node, lo, hi, blacks)) = stack.pop() {
            seen += 1;
            if !self.arena.node(node).live {
                return violation(format!("slot {node} is reachable but released"));
            }
            let key = self.arena.key(node);
            if lo.is_some_and(|lo| key < lo) || hi.is_some_and(|hi| key > hi) {
                return violation(format!("key {key} breaks in-order ordering"));
            }
            let red = self.arena.is_red(node);
            for (child, child_lo, child_hi) in [
                (self.arena.left(node), lo, Some(key)),
                (self.arena.right(node), Some(key), hi),
            ] {
                if child == NIL {
                    // the sentinel adds one more black
                    let path = blacks + 1;
                    match expected_black {
                        None => expected_black = Some(path),
                        Some(expected) if expected != path => {
                            return violation(format!(
                                "black-height mismatch below key {key}: {path} vs {expected}"
                            ));
                        }
                        Some(_) => {}
                    }
                    continue;
                }
                if self.arena.parent(child) != node {
                    return violation(format!("child of key {key} has a stale parent link"));
                }
                let child_red = self.arena.is_red(child);
                if red && child_red {
                    return violation(format!("red key {key} has a red child"));
                }
                let child_blacks = blacks + usize::from(!child_red);
                stack.push((child, child_lo, child_hi, child_blacks));
            }
            if seen > self.len() {
                return violation("more reachable nodes than stored keys".into());
            }
        }

        if seen != self.len() {
            return violation(format!("{seen} reachable nodes but len {}", self.len()));
        }
        Ok(())
    }

    pub(crate) fn handle(&self, index: NodeIndex) -> NodeHandle {
        NodeHandle {
            tree: self.id,
            index,
            generation: self.arena.generation(index),
        }
    }

    pub(crate) fn resolve(&self, handle: NodeHandle) -> Result<NodeIndex> {
        if handle.tree != self.id || !self.arena.is_live(handle.index, handle.generation) {
            warn_log!(?handle, tree = ?self.id, "rejected node handle");
            return Err(Error::InvalidHandle(handle));
        }
        Ok(handle.index)
    }

    pub(crate) fn subtree_min(&self, mut node: NodeIndex) -> NodeIndex {
        while self.arena.left(node) != NIL {
            node = self.arena.left(node);
        }
        node
    }

    pub(crate) fn subtree_max(&self, mut node: NodeIndex) -> NodeIndex {
        while self.arena.right(node) != NIL {
            node = self.arena.right(node);
        }
        node
    }
}

impl Default for RbTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RbTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
