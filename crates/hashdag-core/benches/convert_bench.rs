//! # Conversion Benchmarks
//!
//! Run with: `cargo bench -p hashdag-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hashdag_core::{
    Edge, GeneratorConfig, Graph, Node, Sha256Engine, convert, random_graph, with_engine,
    with_parallel,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

/// N nodes, each the only parent of the next: N waves of one node.
fn create_chain_graph(size: usize) -> Graph {
    let nodes = (0..size)
        .map(|i| Node::new(format!("{i}"), format!("payload-{i}").as_str()))
        .collect();
    let edges = (1..size)
        .map(|i| Edge::new(format!("{}", i - 1), format!("{i}")))
        .collect();
    Graph { nodes, edges }
}

/// One root with N - 1 children: a single wide wave.
fn create_wide_graph(size: usize) -> Graph {
    let nodes = (0..size)
        .map(|i| Node::new(format!("{i}"), format!("payload-{i}").as_str()))
        .collect();
    let edges = (1..size).map(|i| Edge::new("0", format!("{i}"))).collect();
    Graph { nodes, edges }
}

fn create_random_graph(size: usize) -> Graph {
    let config = GeneratorConfig {
        node_qty: size,
        max_outdegree: 4,
        edge_factor: 0.3,
    };
    random_graph(&config, &mut StdRng::seed_from_u64(0x5eed)).expect("generator")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_chain");

    for size in [100, 1000, 10000].iter() {
        let graph = create_chain_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(convert(graph, [with_engine(Sha256Engine::full())])));
        });
    }

    group.finish();
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_wide");

    for size in [100, 1000, 10000].iter() {
        let graph = create_wide_graph(*size);
        group.bench_with_input(BenchmarkId::new("sequential", size), &graph, |b, graph| {
            b.iter(|| black_box(convert(graph, [with_parallel(false)])));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &graph, |b, graph| {
            b.iter(|| black_box(convert(graph, [with_parallel(true)])));
        });
    }

    group.finish();
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_random");

    for size in [100, 1000].iter() {
        let graph = create_random_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(convert(graph, [])));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chain, bench_wide, bench_random);
criterion_main!(benches);
