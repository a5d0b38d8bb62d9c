//! GraphAlgo - 邻接映射图与经典图算法
//!
//! 提供：
//! - 有向/无向邻接映射图，顶点和边由图统一持有
//! - 可定位优先队列与并查集
//! - DFS/BFS、拓扑排序
//! - Bellman-Ford、Dijkstra 单源最短路径
//! - Prim、Kruskal 最小生成树

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod graph;

#[cfg(test)]
mod testing;

// 重导出常用类型
pub use algorithm::{
    bellman_ford, breadth_first_forest, depth_first_forest, dijkstra, kruskal, prim,
    topological_order, SearchForest, ShortestPaths, SpanningTree,
};
pub use collections::{AdaptableHeap, DisjointSet, Locator, SetNode};
pub use config::{AlgorithmConfig, DfsStrategy};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
