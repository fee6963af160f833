//! Shared helpers for the rbtree-core integration and stress suites.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rbtree_core::{Key, RbTree};

/// Global allocator wrapper that tracks live heap bytes and can be told to fail.
///
/// Install it in a test binary with `#[global_allocator]` and compare [`live_bytes`]
/// before and after the code under test. While [`set_failing`] is on, every allocation
/// and reallocation returns null.
///
/// [`live_bytes`]: CountingAllocator::live_bytes
/// [`set_failing`]: CountingAllocator::set_failing
pub struct CountingAllocator {
    live: AtomicIsize,
    failing: AtomicBool,
}

impl CountingAllocator {
    pub const fn new() -> Self {
        Self {
            live: AtomicIsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn live_bytes(&self) -> isize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }
}

impl Default for CountingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: every call forwards to `System` with the caller's layout; only the byte counter
// is added on top.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if self.failing() {
            return std::ptr::null_mut();
        }
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.live.fetch_add(layout.size() as isize, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        self.live.fetch_sub(layout.size() as isize, Ordering::SeqCst);
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        if self.failing() {
            return std::ptr::null_mut();
        }
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            self.live.fetch_add(layout.size() as isize, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if self.failing() {
            return std::ptr::null_mut();
        }
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            self.live
                .fetch_add(new_size as isize - layout.size() as isize, Ordering::SeqCst);
        }
        new_ptr
    }
}

/// `count` pseudo-random keys drawn from a seeded generator. Duplicates are possible.
pub fn seeded_keys(count: usize, seed: u64) -> Vec<Key> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random::<Key>()).collect()
}

/// A copy of `items` in a seeded random order.
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(&mut StdRng::seed_from_u64(seed));
    out
}

/// Build a tree from `keys`, inserting them in order.
pub fn tree_from(keys: &[Key]) -> RbTree {
    let mut tree = RbTree::new();
    for &key in keys {
        tree.insert(key).unwrap();
    }
    tree
}

/// Assert the red-black invariants and that the in-order contents equal `expected` sorted.
pub fn assert_tree_matches(tree: &RbTree, expected: &[Key]) {
    if let Err(err) = tree.validate_invariants() {
        panic!("{err}\n{}", tree.render());
    }
    let mut sorted = expected.to_vec();
    sorted.sort_unstable();
    assert_eq!(tree.to_vec(), sorted);
    assert_eq!(tree.len(), expected.len());
}
