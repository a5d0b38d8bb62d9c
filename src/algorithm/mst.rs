//! 最小生成树
//!
//! Prim（可定位堆）与 Kruskal（并查集 + 边堆），用于无向图

use super::state::{Color, Keyed, VertexStates};
use crate::collections::{AdaptableHeap, DisjointSet, Locator, SetNode};
use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// 生成树中的一条边
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub edge: EdgeId,
    pub tail: VertexId,
    pub head: VertexId,
    pub weight: f64,
}

/// 生成树（图不连通时为生成森林）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanningTree {
    /// 按接受顺序排列
    edges: Vec<TreeEdge>,
    total_weight: f64,
}

impl SpanningTree {
    fn push(&mut self, edge: TreeEdge) {
        self.total_weight += edge.weight;
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.edges.iter().any(|e| e.edge == edge)
    }

    /// 是否连通了全部 vertex_count 个顶点
    pub fn is_spanning(&self, vertex_count: usize) -> bool {
        self.edges.len() + 1 == vertex_count.max(1)
    }
}

/// 最小生成树求解器
pub struct MinimumSpanningTree<'g, V, E> {
    graph: &'g Graph<V, E>,
}

impl<'g, V, E> MinimumSpanningTree<'g, V, E> {
    pub fn new(graph: &'g Graph<V, E>) -> Self {
        Self { graph }
    }

    /// Prim 算法，从 source 所在连通分量生长
    ///
    /// 与 Dijkstra 相同的控制结构，但比较的是边自身的权重与目标顶点当前最优边权，
    /// 而不是累计路径长度。
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn prim(&self, source: VertexId) -> Result<SpanningTree> {
        self.graph.vertex(source)?;
        let mut states = VertexStates::new(self.graph);
        states.set_distance(source, 0.0)?;

        let mut heap = AdaptableHeap::with_capacity(self.graph.vertex_count());
        let mut locators: IndexMap<VertexId, Locator> = IndexMap::new();
        for v in self.graph.vertices() {
            let locator = heap.insert(Keyed::new(states.distance(v), v));
            locators.insert(v, locator);
        }

        // 顶点 -> 当前连接它的最轻边
        let mut best: IndexMap<VertexId, TreeEdge> = IndexMap::new();
        let mut tree = SpanningTree::default();

        while let Ok(Keyed { key, value: u }) = heap.pop() {
            // 剩余顶点都不与 source 连通
            if key.is_infinite() {
                break;
            }
            states.set_color(u, Color::Gray)?;
            if let Some(edge) = best.swap_remove(&u) {
                tree.push(edge);
            }

            for edge in self.graph.outgoing_edges(u)? {
                let Some(v) = edge.opposite(u) else {
                    continue;
                };
                if states.color(v) == Some(Color::White) && edge.weight() < states.distance(v) {
                    states.set_distance(v, edge.weight())?;
                    states.set_predecessor(v, Some(u))?;
                    best.insert(
                        v,
                        TreeEdge {
                            edge: edge.id(),
                            tail: u,
                            head: v,
                            weight: edge.weight(),
                        },
                    );
                    if let Some(&locator) = locators.get(&v) {
                        heap.update(locator, Keyed::new(edge.weight(), v))?;
                    }
                }
            }
            states.set_color(u, Color::Black)?;
        }

        debug!(source = %source, edges = tree.len(), weight = tree.total_weight(), "prim finished");
        Ok(tree)
    }

    /// Kruskal 算法
    ///
    /// 边按权重从小到大取出，两端不在同一集合时接受。接受 |V|-1 条边或边取尽时结束；
    /// 图不连通时返回生成森林。有向图的边按无向处理。
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn kruskal(&self) -> Result<SpanningTree> {
        let mut forest = DisjointSet::with_capacity(self.graph.vertex_count());
        let mut nodes: IndexMap<VertexId, SetNode> = IndexMap::new();
        for v in self.graph.vertices() {
            nodes.insert(v, forest.make_set(v));
        }

        let candidates: Vec<Keyed<TreeEdge>> = self
            .graph
            .edges()
            .map(|e| {
                Keyed::new(
                    e.weight(),
                    TreeEdge {
                        edge: e.id(),
                        tail: e.tail(),
                        head: e.head(),
                        weight: e.weight(),
                    },
                )
            })
            .collect();
        let mut heap = AdaptableHeap::from_vec(candidates);

        let target = self.graph.vertex_count().saturating_sub(1);
        let mut tree = SpanningTree::default();
        while tree.len() < target {
            let Ok(Keyed { value: edge, .. }) = heap.pop() else {
                break;
            };
            let a = *nodes.get(&edge.tail).ok_or(Error::InvalidVertex(edge.tail))?;
            let b = *nodes.get(&edge.head).ok_or(Error::InvalidVertex(edge.head))?;

            if forest.find(a)? != forest.find(b)? {
                forest.union(a, b)?;
                tree.push(edge);
            } else {
                trace!(edge = edge.edge.as_u64(), "edge would close a cycle, skipped");
            }
        }

        debug!(
            edges = tree.len(),
            components = forest.set_count(),
            weight = tree.total_weight(),
            "kruskal finished"
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::init_tracing;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// 9 个顶点、14 条边的经典示例，最小生成树总权重 37
    fn sample_graph() -> (Graph<u32, String>, Vec<VertexId>) {
        let mut graph = Graph::undirected();
        let v: Vec<VertexId> = (1..=9).map(|i| graph.insert_vertex(i)).collect();
        let d = [4.0, 8.0, 7.0, 9.0, 10.0, 2.0, 1.0, 7.0];
        for i in 0..8 {
            graph
                .insert_weighted_edge(v[i], v[i + 1], i.to_string(), d[i])
                .unwrap();
        }
        let extra = [(0, 7, 8.0), (7, 1, 11.0), (8, 2, 2.0), (8, 6, 6.0), (2, 5, 4.0), (3, 5, 14.0)];
        for (k, &(a, b, w)) in extra.iter().enumerate() {
            graph
                .insert_weighted_edge(v[a], v[b], (8 + k).to_string(), w)
                .unwrap();
        }
        (graph, v)
    }

    fn random_connected_graph(seed: u64, n: usize, extra: usize) -> Graph<usize, ()> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = Graph::undirected();
        let ids: Vec<VertexId> = (0..n).map(|i| graph.insert_vertex(i)).collect();
        for i in 1..n {
            let j = rng.gen_range(0..i);
            let w = rng.gen_range(1..50) as f64;
            graph.insert_weighted_edge(ids[i], ids[j], (), w).unwrap();
        }
        for _ in 0..extra {
            let a = ids[rng.gen_range(0..n)];
            let b = ids[rng.gen_range(0..n)];
            let w = rng.gen_range(1..50) as f64;
            graph.insert_weighted_edge(a, b, (), w).unwrap();
        }
        graph
    }

    /// 用新的并查集重放生成树的边，验证无环
    fn assert_acyclic<V, E>(graph: &Graph<V, E>, tree: &SpanningTree) {
        let mut set = DisjointSet::new();
        let nodes: IndexMap<VertexId, SetNode> =
            graph.vertices().map(|v| (v, set.make_set(v))).collect();
        for e in tree.edges() {
            let (a, b) = (nodes[&e.tail], nodes[&e.head]);
            assert!(!set.same_set(a, b).unwrap(), "cycle through {:?}", e);
            set.union(a, b).unwrap();
        }
    }

    #[test]
    fn test_kruskal() {
        init_tracing();
        let (graph, _) = sample_graph();

        let tree = MinimumSpanningTree::new(&graph).kruskal().unwrap();

        assert_eq!(tree.len(), 8);
        assert_eq!(tree.total_weight(), 37.0);
        assert!(tree.is_spanning(graph.vertex_count()));
        assert_acyclic(&graph, &tree);
        // 最轻的边最先被接受
        assert_eq!(tree.edges()[0].weight, 1.0);
    }

    #[test]
    fn test_prim() {
        init_tracing();
        let (graph, v) = sample_graph();

        let tree = MinimumSpanningTree::new(&graph).prim(v[0]).unwrap();

        assert_eq!(tree.len(), 8);
        assert_eq!(tree.total_weight(), 37.0);
        assert_acyclic(&graph, &tree);
        assert_eq!(tree.edges()[0].tail, v[0]);
        assert_eq!(tree.edges()[0].weight, 4.0);
    }

    #[test]
    fn test_prim_uses_edge_weight_not_path_length() {
        // a-b 1, b-c 1, a-c 1.5：最短路径树会选 a-c，生成树选 b-c
        let mut graph: Graph<(), ()> = Graph::undirected();
        let a = graph.insert_vertex(());
        let b = graph.insert_vertex(());
        let c = graph.insert_vertex(());
        graph.insert_weighted_edge(a, b, (), 1.0).unwrap();
        let bc = graph.insert_weighted_edge(b, c, (), 1.0).unwrap();
        let ac = graph.insert_weighted_edge(a, c, (), 1.5).unwrap();

        let tree = MinimumSpanningTree::new(&graph).prim(a).unwrap();

        assert_eq!(tree.total_weight(), 2.0);
        assert!(tree.contains(bc));
        assert!(!tree.contains(ac));
    }

    #[test]
    fn test_prim_and_kruskal_agree() {
        for seed in 0..5 {
            let graph = random_connected_graph(seed, 40, 80);
            let solver = MinimumSpanningTree::new(&graph);
            let start = graph.vertices().next().unwrap();

            let prim = solver.prim(start).unwrap();
            let kruskal = solver.kruskal().unwrap();

            assert_eq!(kruskal.len(), graph.vertex_count() - 1);
            assert_eq!(prim.len(), graph.vertex_count() - 1);
            assert_eq!(prim.total_weight(), kruskal.total_weight());
            assert_acyclic(&graph, &prim);
            assert_acyclic(&graph, &kruskal);
        }
    }

    #[test]
    fn test_disconnected_graph() {
        let mut graph: Graph<(), ()> = Graph::undirected();
        let v: Vec<VertexId> = (0..5).map(|_| graph.insert_vertex(())).collect();
        graph.insert_weighted_edge(v[0], v[1], (), 3.0).unwrap();
        graph.insert_weighted_edge(v[1], v[2], (), 1.0).unwrap();
        graph.insert_weighted_edge(v[3], v[4], (), 2.0).unwrap();

        let solver = MinimumSpanningTree::new(&graph);

        let forest = solver.kruskal().unwrap();
        assert_eq!(forest.len(), 3);
        assert_eq!(forest.total_weight(), 6.0);
        assert!(!forest.is_spanning(graph.vertex_count()));

        let tree = solver.prim(v[3]).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.total_weight(), 2.0);
        assert!(tree.edges().iter().all(|e| [v[3], v[4]].contains(&e.head)));

        let tree = solver.prim(v[0]).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.total_weight(), 4.0);
    }

    #[test]
    fn test_prim_isolated_source() {
        let mut graph: Graph<(), ()> = Graph::undirected();
        let v: Vec<VertexId> = (0..3).map(|_| graph.insert_vertex(())).collect();
        graph.insert_weighted_edge(v[1], v[2], (), 5.0).unwrap();

        let tree = MinimumSpanningTree::new(&graph).prim(v[0]).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.total_weight(), 0.0);
    }

    #[test]
    fn test_degenerate_graphs() {
        let empty: Graph<(), ()> = Graph::undirected();
        let tree = MinimumSpanningTree::new(&empty).kruskal().unwrap();
        assert!(tree.is_empty());
        assert!(tree.is_spanning(0));

        let mut single: Graph<(), ()> = Graph::undirected();
        let a = single.insert_vertex(());
        single.insert_edge(a, a, ()).unwrap();
        let solver = MinimumSpanningTree::new(&single);
        assert!(solver.kruskal().unwrap().is_empty());
        assert!(solver.prim(a).unwrap().is_spanning(1));
    }

    #[test]
    fn test_spanning_tree_serialization() {
        let (graph, _) = sample_graph();
        let tree = MinimumSpanningTree::new(&graph).kruskal().unwrap();

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["edges"].as_array().unwrap().len(), 8);
        assert_eq!(json["total_weight"], 37.0);
    }
}
