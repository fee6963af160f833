use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rbtree_core::RbTree;
use rbtree_test_support::{seeded_keys, shuffled, tree_from};

const SIZES: &[usize] = &[100, 1_000, 10_000];

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &size in SIZES {
        let keys = seeded_keys(size, 1);
        group.bench_with_input(BenchmarkId::new("random", size), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = RbTree::new();
                for &key in keys {
                    tree.insert(key).unwrap();
                }
                black_box(tree.len())
            });
        });
        let ascending: Vec<_> = (0..size as i64).collect();
        group.bench_with_input(BenchmarkId::new("ascending", size), &ascending, |b, keys| {
            b.iter(|| black_box(tree_from(keys).len()));
        });
    }
    group.finish();
}

fn find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    for &size in SIZES {
        let keys = seeded_keys(size, 2);
        let tree = tree_from(&keys);
        group.bench_with_input(BenchmarkId::new("hit", size), &keys, |b, keys| {
            b.iter(|| keys.iter().filter(|&&k| tree.find(k).is_some()).count());
        });
    }
    group.finish();
}

fn erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase");
    for &size in SIZES {
        let keys = seeded_keys(size, 3);
        let order = shuffled(&keys, 4);
        group.bench_with_input(BenchmarkId::new("shuffled", size), &order, |b, order| {
            b.iter_batched(
                || tree_from(&keys),
                |mut tree| {
                    for &key in order {
                        tree.remove(key).unwrap();
                    }
                    tree
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_inorder");
    for &size in SIZES {
        let tree = tree_from(&seeded_keys(size, 5));
        let mut buffer = vec![0; size];
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| tree.export_inorder(black_box(&mut buffer)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, insert, find, erase, export);
criterion_main!(benches);
