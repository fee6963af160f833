//! Node storage and the shared-sentinel convention.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeIndex`]. Slot [`NIL`] holds
//! the sentinel: it is BLACK, its links point at itself, and every leaf child and the root's
//! parent point at it, so the rotation and fixup code never has to branch on an absent link.

use crate::error::{Error, Result};
use crate::ids::{Key, NodeIndex, NIL};

/// Node color. The sentinel is always [`Color::Black`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) color: Color,
    pub(crate) parent: NodeIndex,
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
    pub(crate) generation: u32,
    pub(crate) live: bool,
}

impl Node {
    fn sentinel() -> Self {
        Self {
            key: Key::default(),
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
            generation: 0,
            live: false,
        }
    }
}

pub(crate) struct Arena {
    nodes: Vec<Node>,
    /// Released slots awaiting reuse. Capacity never drops below `nodes.len()` so that
    /// releasing a slot cannot allocate.
    free: Vec<NodeIndex>,
    len: usize,
}

impl Arena {
    pub(crate) fn new() -> Result<Self> {
        let mut nodes = Vec::new();
        nodes.try_reserve(1)?;
        nodes.push(Node::sentinel());
        let mut free = Vec::new();
        free.try_reserve(1)?;
        Ok(Self {
            nodes,
            free,
            len: 0,
        })
    }

    /// Number of live (non-sentinel) nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Make sure the next [`Arena::alloc`] succeeds without touching the allocator.
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        if !self.free.is_empty() {
            return Ok(());
        }
        fresh_index(self.nodes.len())?;
        self.nodes.try_reserve(1)?;
        let wanted = self.nodes.len() + 1;
        if self.free.capacity() < wanted {
            self.free.try_reserve(wanted - self.free.len())?;
        }
        Ok(())
    }

    /// Hand out a fresh RED node with sentinel links. Callers must have called
    /// [`Arena::reserve_one`] first.
    pub(crate) fn alloc(&mut self, key: Key) -> NodeIndex {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let node = &mut self.nodes[index as usize];
            node.key = key;
            node.color = Color::Red;
            node.parent = NIL;
            node.left = NIL;
            node.right = NIL;
            node.live = true;
            return index;
        }
        debug_assert!(fresh_index(self.nodes.len()).is_ok());
        let index = self.nodes.len() as NodeIndex;
        self.nodes.push(Node {
            key,
            color: Color::Red,
            parent: NIL,
            left: NIL,
            right: NIL,
            generation: 0,
            live: true,
        });
        index
    }

    /// Return a slot to the free list and invalidate every handle pointing at it.
    ///
    /// Generations wrap: a handle held across 2^32 reuses of the same slot would alias the
    /// slot's current node.
    pub(crate) fn release(&mut self, index: NodeIndex) {
        debug_assert_ne!(index, NIL, "the sentinel is never released");
        let node = &mut self.nodes[index as usize];
        debug_assert!(node.live, "slot {index} released twice");
        node.live = false;
        node.generation = node.generation.wrapping_add(1);
        node.parent = NIL;
        node.left = NIL;
        node.right = NIL;
        self.free.push(index);
        self.len -= 1;
    }

    pub(crate) fn is_live(&self, index: NodeIndex, generation: u32) -> bool {
        index != NIL
            && self
                .nodes
                .get(index as usize)
                .is_some_and(|node| node.live && node.generation == generation)
    }

    pub(crate) fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index as usize]
    }

    pub(crate) fn key(&self, index: NodeIndex) -> Key {
        self.nodes[index as usize].key
    }

    pub(crate) fn color(&self, index: NodeIndex) -> Color {
        self.nodes[index as usize].color
    }

    pub(crate) fn is_red(&self, index: NodeIndex) -> bool {
        self.color(index) == Color::Red
    }

    pub(crate) fn is_black(&self, index: NodeIndex) -> bool {
        self.color(index) == Color::Black
    }

    pub(crate) fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.nodes[index as usize].parent
    }

    pub(crate) fn left(&self, index: NodeIndex) -> NodeIndex {
        self.nodes[index as usize].left
    }

    pub(crate) fn right(&self, index: NodeIndex) -> NodeIndex {
        self.nodes[index as usize].right
    }

    pub(crate) fn generation(&self, index: NodeIndex) -> u32 {
        self.nodes[index as usize].generation
    }

    /// Recolor a node. Writes to the sentinel are dropped; it may only ever be asked to turn
    /// BLACK.
    pub(crate) fn set_color(&mut self, index: NodeIndex, color: Color) {
        if index == NIL {
            debug_assert_eq!(color, Color::Black, "sentinel must stay black");
            return;
        }
        self.nodes[index as usize].color = color;
    }

    /// The sentinel's parent may be written: deletion parks the removed node's parent there
    /// while `delete_fixup` climbs from a sentinel `x`.
    pub(crate) fn set_parent(&mut self, index: NodeIndex, parent: NodeIndex) {
        self.nodes[index as usize].parent = parent;
    }

    pub(crate) fn set_left(&mut self, index: NodeIndex, left: NodeIndex) {
        debug_assert_ne!(index, NIL);
        self.nodes[index as usize].left = left;
    }

    pub(crate) fn set_right(&mut self, index: NodeIndex, right: NodeIndex) {
        debug_assert_ne!(index, NIL);
        self.nodes[index as usize].right = right;
    }

    /// Restore the sentinel's self-referential links after an operation borrowed its parent
    /// slot.
    pub(crate) fn reset_sentinel(&mut self) {
        let sentinel = &mut self.nodes[NIL as usize];
        sentinel.parent = NIL;
        sentinel.left = NIL;
        sentinel.right = NIL;
        sentinel.color = Color::Black;
    }
}

/// Index a node pushed onto an arena of `len` slots would get, if it is addressable.
fn fresh_index(len: usize) -> Result<NodeIndex> {
    NodeIndex::try_from(len).map_err(|_| Error::ArenaFull(len))
}
