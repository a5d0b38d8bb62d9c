//! 图算法模块
//!
//! 包含遍历、单源最短路径和最小生成树算法。每次调用都会为图中顶点
//! 分配新的状态侧表，图本身只被借用、不被修改。

mod mst;
mod shortest_path;
mod state;
mod traversal;

pub use mst::{MinimumSpanningTree, SpanningTree, TreeEdge};
pub use shortest_path::{relax, ShortestPath, ShortestPaths};
pub use state::{Color, VertexState, VertexStates};
pub use traversal::{SearchForest, Traversal};

use crate::error::Result;
use crate::graph::{Graph, VertexId};

/// 完整 DFS 森林（默认配置）
pub fn depth_first_forest<V, E>(graph: &Graph<V, E>) -> Result<SearchForest> {
    Traversal::new(graph).depth_first_forest()
}

/// 从 start 出发的 BFS 树
pub fn breadth_first_forest<V, E>(graph: &Graph<V, E>, start: VertexId) -> Result<SearchForest> {
    Traversal::new(graph).breadth_first_search(start)
}

/// 拓扑序，仅对有向无环图有意义
pub fn topological_order<V, E>(graph: &Graph<V, E>) -> Result<Vec<VertexId>> {
    Traversal::new(graph).topological_order()
}

pub fn bellman_ford<V, E>(graph: &Graph<V, E>, source: VertexId) -> Result<ShortestPaths> {
    ShortestPath::new(graph).bellman_ford(source)
}

/// 要求边权非负
pub fn dijkstra<V, E>(graph: &Graph<V, E>, source: VertexId) -> Result<ShortestPaths> {
    ShortestPath::new(graph).dijkstra(source)
}

pub fn prim<V, E>(graph: &Graph<V, E>, source: VertexId) -> Result<SpanningTree> {
    MinimumSpanningTree::new(graph).prim(source)
}

pub fn kruskal<V, E>(graph: &Graph<V, E>) -> Result<SpanningTree> {
    MinimumSpanningTree::new(graph).kruskal()
}
