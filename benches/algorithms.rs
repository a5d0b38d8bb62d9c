//! 算法基准测试

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graphalgo::{dijkstra, kruskal, prim, Graph, VertexId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(directed: bool, n: usize, m: usize) -> (Graph<usize, ()>, VertexId) {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut graph = Graph::new(directed);
    let ids: Vec<VertexId> = (0..n).map(|i| graph.insert_vertex(i)).collect();
    for i in 1..n {
        let j = rng.gen_range(0..i);
        let w = rng.gen_range(1..100) as f64;
        graph.insert_weighted_edge(ids[j], ids[i], (), w).unwrap();
    }
    for _ in 0..m {
        let u = ids[rng.gen_range(0..n)];
        let v = ids[rng.gen_range(0..n)];
        let w = rng.gen_range(1..100) as f64;
        graph.insert_weighted_edge(u, v, (), w).unwrap();
    }
    (graph, ids[0])
}

fn bench_shortest_path(c: &mut Criterion) {
    let (graph, source) = random_graph(true, 2_000, 10_000);
    c.bench_function("dijkstra 2k/12k", |b| {
        b.iter(|| dijkstra(black_box(&graph), source).unwrap())
    });
}

fn bench_spanning_tree(c: &mut Criterion) {
    let (graph, source) = random_graph(false, 2_000, 10_000);
    c.bench_function("prim 2k/12k", |b| {
        b.iter(|| prim(black_box(&graph), source).unwrap())
    });
    c.bench_function("kruskal 2k/12k", |b| {
        b.iter(|| kruskal(black_box(&graph)).unwrap())
    });
}

criterion_group!(benches, bench_shortest_path, bench_spanning_tree);
criterion_main!(benches);
