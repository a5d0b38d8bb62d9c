//! 图数据结构
//!
//! 基于邻接映射（map of maps）的有向/无向图：
//! - `outgoing[u][v]` 为边 (u, v)
//! - `incoming[v][u]` 为边 (u, v)
//!
//! 无向图插入 (u, v) 时同时登记 (v, u)，两个方向共享同一条边。

use super::edge::{Edge, EdgeId, DEFAULT_WEIGHT};
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use tracing::debug;

/// 单个顶点的关联表：相邻顶点 -> 边 ID
type Incidence = IndexMap<VertexId, EdgeId>;

/// 图
///
/// 所有顶点和边由图统一持有，外部只通过 [`VertexId`] / [`EdgeId`] 句柄引用。
/// 顶点、边的枚举顺序即插入顺序。
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    /// 是否为有向图（构造时确定）
    directed: bool,
    /// 顶点表
    vertices: IndexMap<VertexId, Vertex<V>>,
    /// 边表（无向边只存一份）
    edges: IndexMap<EdgeId, Edge<E>>,
    /// 出边关联表
    outgoing: IndexMap<VertexId, Incidence>,
    /// 入边关联表
    incoming: IndexMap<VertexId, Incidence>,
    /// 下一个顶点 ID
    next_vertex_id: u64,
    /// 下一个边 ID
    next_edge_id: u64,
}

impl<V, E> Graph<V, E> {
    /// 创建空图
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            outgoing: IndexMap::new(),
            incoming: IndexMap::new(),
            next_vertex_id: 1,
            next_edge_id: 1,
        }
    }

    /// 创建有向图
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// 创建无向图
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// 是否为有向图
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    // ==================== 顶点操作 ====================

    /// 验证顶点属于该图
    fn validate_vertex(&self, v: VertexId) -> Result<()> {
        if self.vertices.contains_key(&v) {
            Ok(())
        } else {
            Err(Error::InvalidVertex(v))
        }
    }

    /// 顶点是否在图中
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains_key(&v)
    }

    /// 添加顶点
    pub fn insert_vertex(&mut self, payload: V) -> VertexId {
        let id = VertexId::new(self.next_vertex_id);
        self.next_vertex_id += 1;

        self.vertices.insert(id, Vertex::new(id, payload));
        self.outgoing.insert(id, Incidence::new());
        self.incoming.insert(id, Incidence::new());

        id
    }

    /// 获取顶点
    pub fn vertex(&self, v: VertexId) -> Result<&Vertex<V>> {
        self.vertices.get(&v).ok_or(Error::InvalidVertex(v))
    }

    /// 获取顶点负载
    pub fn payload(&self, v: VertexId) -> Result<&V> {
        self.vertex(v).map(Vertex::payload)
    }

    /// 获取顶点可变负载
    pub fn payload_mut(&mut self, v: VertexId) -> Result<&mut V> {
        self.vertices
            .get_mut(&v)
            .map(Vertex::payload_mut)
            .ok_or(Error::InvalidVertex(v))
    }

    /// 删除顶点，先删除其全部关联边（两个方向），返回顶点负载
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<V> {
        let successors: Vec<VertexId> = self.out_map(v)?.keys().copied().collect();
        let predecessors: Vec<VertexId> = self.in_map(v)?.keys().copied().collect();

        let mut removed = 0usize;
        for w in successors {
            if self.detach_edge(v, w).is_some() {
                removed += 1;
            }
        }
        for w in predecessors {
            // 无向图中这些边已在上面随出边一起删除
            if self.detach_edge(w, v).is_some() {
                removed += 1;
            }
        }

        self.outgoing.shift_remove(&v);
        self.incoming.shift_remove(&v);
        let vertex = self
            .vertices
            .shift_remove(&v)
            .ok_or(Error::InvalidVertex(v))?;

        debug!(vertex = %v, removed_edges = removed, "vertex removed");
        Ok(vertex.into_payload())
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 按插入顺序枚举所有顶点
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    // ==================== 边操作 ====================

    /// 添加权重为 1 的边
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId, payload: E) -> Result<EdgeId> {
        self.insert_weighted_edge(u, v, payload, DEFAULT_WEIGHT)
    }

    /// 添加带权边
    ///
    /// u、v 已相邻时更新已有边的负载和权重并返回其 ID，不会产生重复边。
    pub fn insert_weighted_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        payload: E,
        weight: f64,
    ) -> Result<EdgeId> {
        self.validate_vertex(u)?;
        self.validate_vertex(v)?;

        if let Some(id) = self.out_map(u)?.get(&v).copied() {
            if let Some(edge) = self.edges.get_mut(&id) {
                edge.update(payload, weight);
            }
            return Ok(id);
        }

        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.insert(id, Edge::new(id, u, v, payload, weight));

        self.link(u, v, id);
        if !self.directed {
            self.link(v, u, id);
        }

        Ok(id)
    }

    /// 登记 (u, v) 到两张关联表
    fn link(&mut self, u: VertexId, v: VertexId, id: EdgeId) {
        if let Some(out) = self.outgoing.get_mut(&u) {
            out.insert(v, id);
        }
        if let Some(inc) = self.incoming.get_mut(&v) {
            inc.insert(u, id);
        }
    }

    /// 从关联表和边表中摘除 (u, v)，不相邻时返回 None
    fn detach_edge(&mut self, u: VertexId, v: VertexId) -> Option<Edge<E>> {
        let id = self.outgoing.get_mut(&u)?.shift_remove(&v)?;
        if let Some(inc) = self.incoming.get_mut(&v) {
            inc.shift_remove(&u);
        }
        if !self.directed {
            if let Some(out) = self.outgoing.get_mut(&v) {
                out.shift_remove(&u);
            }
            if let Some(inc) = self.incoming.get_mut(&u) {
                inc.shift_remove(&v);
            }
        }
        self.edges.shift_remove(&id)
    }

    /// 获取 u 到 v 的边，不相邻时返回 None
    pub fn edge(&self, u: VertexId, v: VertexId) -> Result<Option<&Edge<E>>> {
        self.validate_vertex(v)?;
        let id = self.out_map(u)?.get(&v);
        Ok(id.and_then(|id| self.edges.get(id)))
    }

    /// 通过 ID 获取边
    pub fn edge_by_id(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.edges.get(&id)
    }

    /// 通过 ID 获取可变边
    pub fn edge_by_id_mut(&mut self, id: EdgeId) -> Option<&mut Edge<E>> {
        self.edges.get_mut(&id)
    }

    /// 删除并返回 u 到 v 的边，不相邻时什么也不做
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<Option<Edge<E>>> {
        self.validate_vertex(u)?;
        self.validate_vertex(v)?;
        Ok(self.detach_edge(u, v))
    }

    /// 获取边数量（无向边计一次）
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 按插入顺序枚举所有边（无向边只出现一次）
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        self.edges.values()
    }

    // ==================== 邻居查询 ====================

    fn out_map(&self, v: VertexId) -> Result<&Incidence> {
        self.outgoing.get(&v).ok_or(Error::InvalidVertex(v))
    }

    fn in_map(&self, v: VertexId) -> Result<&Incidence> {
        self.incoming.get(&v).ok_or(Error::InvalidVertex(v))
    }

    /// 获取顶点的出度
    pub fn out_degree(&self, v: VertexId) -> Result<usize> {
        Ok(self.out_map(v)?.len())
    }

    /// 获取顶点的入度
    pub fn in_degree(&self, v: VertexId) -> Result<usize> {
        Ok(self.in_map(v)?.len())
    }

    /// 获取顶点的后继
    pub fn successors(&self, v: VertexId) -> Result<impl Iterator<Item = VertexId> + '_> {
        Ok(self.out_map(v)?.keys().copied())
    }

    /// 获取顶点的前驱
    pub fn predecessors(&self, v: VertexId) -> Result<impl Iterator<Item = VertexId> + '_> {
        Ok(self.in_map(v)?.keys().copied())
    }

    /// 获取顶点的所有出边
    pub fn outgoing_edges(&self, v: VertexId) -> Result<impl Iterator<Item = &Edge<E>> + '_> {
        Ok(self
            .out_map(v)?
            .values()
            .filter_map(move |id| self.edges.get(id)))
    }

    /// 获取顶点的所有入边
    pub fn incoming_edges(&self, v: VertexId) -> Result<impl Iterator<Item = &Edge<E>> + '_> {
        Ok(self
            .in_map(v)?
            .values()
            .filter_map(move |id| self.edges.get(id)))
    }
}
