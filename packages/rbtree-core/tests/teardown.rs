//! Allocation accounting for teardown. Runs without the libtest harness so that nothing else
//! allocates while the counter is being read.

use rbtree_core::RbTree;
use rbtree_test_support::{seeded_keys, CountingAllocator};

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator::new();

fn destroy_returns_every_byte() {
    let keys = seeded_keys(5_000, 42);
    let baseline = ALLOC.live_bytes();

    let mut tree = RbTree::new();
    for &key in &keys {
        tree.insert(key).unwrap();
    }
    for &key in keys.iter().step_by(3) {
        tree.remove(key).unwrap();
    }
    assert!(ALLOC.live_bytes() > baseline);
    tree.destroy();

    assert_eq!(ALLOC.live_bytes(), baseline, "tree memory still reachable");
}

fn clear_then_drop_returns_every_byte() {
    let baseline = ALLOC.live_bytes();

    let mut tree = RbTree::new();
    for key in 0..2_000 {
        tree.insert(key).unwrap();
    }
    tree.clear();
    assert!(tree.is_empty());
    for key in 0..100 {
        tree.insert(key).unwrap();
    }
    drop(tree);

    assert_eq!(ALLOC.live_bytes(), baseline, "tree memory still reachable");
}

fn main() {
    destroy_returns_every_byte();
    clear_then_drop_returns_every_byte();
    println!("teardown: ok");
}
