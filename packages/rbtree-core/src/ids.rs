use std::sync::atomic::{AtomicU64, Ordering};

/// Key type stored in the tree. Totally ordered, compared with `<`, `>` and `==`.
pub type Key = i64;

/// Index of a slot in a tree's node arena. Slot 0 is the sentinel.
pub(crate) type NodeIndex = u32;

/// Reserved arena index of the shared sentinel.
pub(crate) const NIL: NodeIndex = 0;

/// Process-unique identity of a tree, stamped into every handle it hands out.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Reference to a live node, returned by insert and lookup operations.
///
/// A handle stays valid until its node is erased or the tree is cleared. Stale handles,
/// handles minted by a different tree, and handles pointing at the sentinel are rejected
/// with [`Error::InvalidHandle`](crate::Error::InvalidHandle).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle {
    pub(crate) tree: TreeId,
    pub(crate) index: NodeIndex,
    pub(crate) generation: u32,
}

impl NodeHandle {
    pub fn tree(&self) -> TreeId {
        self.tree
    }
}
