use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rbtree_core::{Key, RbTree};
use tracing_subscriber::EnvFilter;

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    implementation: &'static str,
    workload: String,
    timestamp: String,
    name: String,
    total_ops: u64,
    duration_ms: f64,
    ops_per_sec: f64,
    extra: Extra,
    source_file: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Extra {
    count: u64,
    seed: u64,
    height: usize,
    black_height: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut count: u64 = 10_000;
    let mut seed: u64 = 0;
    let mut out_file: Option<PathBuf> = None;
    for arg in env::args().skip(1) {
        if let Some(val) = arg.strip_prefix("--count=") {
            count = val.parse().unwrap_or(count);
        } else if let Some(val) = arg.strip_prefix("--seed=") {
            seed = val.parse().unwrap_or(seed);
        } else if let Some(val) = arg.strip_prefix("--out=") {
            out_file = Some(PathBuf::from(val));
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let keys: Vec<Key> = (0..count).map(|_| rng.random()).collect();
    let mut tree = RbTree::new();

    let start = Instant::now();
    let mut handles = Vec::with_capacity(keys.len());
    for &key in &keys {
        handles.push(tree.insert(key).expect("insert"));
    }
    let height = tree.height();
    let black_height = tree.black_height();
    let mut buffer = vec![0; keys.len()];
    tree.export_inorder(&mut buffer).expect("export");
    handles.shuffle(&mut rng);
    for handle in handles {
        tree.erase(handle).expect("erase");
    }
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    tree.validate_invariants().expect("invariants");
    tree.destroy();

    let total_ops = count * 2 + 1;
    let output = Output {
        implementation: "rbtree-core",
        workload: format!("insert-export-erase-{}", count),
        timestamp: chrono::Utc::now().to_rfc3339(),
        name: format!("insert-export-erase-{}", count),
        total_ops,
        duration_ms,
        ops_per_sec: if duration_ms > 0.0 {
            total_ops as f64 / duration_ms * 1000.0
        } else {
            f64::INFINITY
        },
        extra: Extra {
            count,
            seed,
            height,
            black_height,
        },
        source_file: out_file.as_ref().map(|p| p.display().to_string()),
    };

    let json = serde_json::to_string_pretty(&output).expect("serialize");
    if let Some(path) = out_file {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdirs");
        }
        fs::write(&path, &json).expect("write output");
    }
    println!("{}", json);
}
