//! # Layout Benchmark
//!
//! Measures the cost of a resolution change on a wide, relative tree:
//! 1. Invalidation push (dirty flags only)
//! 2. Full parent-first pull of every node

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_ui::{Point, Screen, TransformType, UiTree, Vec2};

/// Root with `fan_out` children, each with `fan_out` relative grandchildren.
fn build_tree(fan_out: usize) -> UiTree {
    let mut tree = UiTree::new(Screen::new(Point::new(1920, 1080)).expect("valid resolution"));
    let root = tree.create_node();
    for _ in 0..fan_out {
        let child = tree.create_child(root).expect("root exists");
        tree.set_transform_type(child, TransformType::Relative).expect("has parent");
        tree.set_relative_size(child, Vec2::new(0.5, 0.5)).expect("non-negative");
        for _ in 0..fan_out {
            let leaf = tree.create_child(child).expect("child exists");
            tree.set_transform_type(leaf, TransformType::Relative).expect("has parent");
            tree.set_relative_offset(leaf, Vec2::new(0.25, 0.25)).expect("non-negative");
        }
    }
    tree.recalculate_all().expect("consistent tree");
    tree
}

fn bench_resolution_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_resolution_change");

    for fan_out in [8, 32, 64] {
        let mut tree = build_tree(fan_out);
        let mut toggle = false;

        group.bench_with_input(BenchmarkId::new("invalidate_and_pull", fan_out), &fan_out, |b, _| {
            b.iter(|| {
                toggle = !toggle;
                let size = if toggle { Point::new(1280, 720) } else { Point::new(1920, 1080) };
                tree.set_resolution(black_box(size)).expect("positive resolution");
                tree.recalculate_all().expect("consistent tree");
                tree.drain_events();
            });
        });
    }

    group.finish();
}

fn bench_clean_read(c: &mut Criterion) {
    let mut tree = build_tree(32);
    let leaf = tree.iter_dfs().last().expect("non-empty tree");

    c.bench_function("layout_clean_read", |b| {
        b.iter(|| black_box(tree.scaled_rect(black_box(leaf)).expect("leaf exists")));
    });
}

criterion_group!(benches, bench_resolution_change, bench_clean_read);
criterion_main!(benches);
