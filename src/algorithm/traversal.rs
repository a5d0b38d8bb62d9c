//! 图遍历算法
//!
//! 深度优先搜索（带发现/完成时间戳）、广度优先搜索和拓扑排序

use super::state::{Color, VertexStates};
use crate::config::{AlgorithmConfig, DfsStrategy};
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use tracing::debug;

/// 遍历森林
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchForest {
    /// 每棵树的根（按发现顺序）
    roots: Vec<VertexId>,
    /// 每个顶点的遍历状态
    states: VertexStates,
}

impl SearchForest {
    fn new(roots: Vec<VertexId>, states: VertexStates) -> Self {
        Self { roots, states }
    }

    pub fn roots(&self) -> &[VertexId] {
        &self.roots
    }

    pub fn states(&self) -> &VertexStates {
        &self.states
    }

    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.states.predecessor(v)
    }

    /// BFS 为跳数；DFS 不记录距离
    pub fn distance(&self, v: VertexId) -> f64 {
        self.states.distance(v)
    }

    pub fn discover(&self, v: VertexId) -> Option<usize> {
        self.states.discover(v)
    }

    pub fn finish(&self, v: VertexId) -> Option<usize> {
        self.states.finish(v)
    }

    pub fn color(&self, v: VertexId) -> Option<Color> {
        self.states.color(v)
    }

    /// 被遍历到的顶点
    pub fn reached(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.states
            .iter()
            .filter(|(_, s)| s.color != Color::White)
            .map(|(v, _)| v)
    }

    /// 顶点 -> 前驱
    pub fn predecessors(&self) -> indexmap::IndexMap<VertexId, Option<VertexId>> {
        self.states.predecessors()
    }

    /// 树路径 start..=end
    pub fn path_to(&self, start: VertexId, end: VertexId) -> Option<Vec<VertexId>> {
        self.states.path_to(start, end)
    }
}

/// 显式栈中的一帧：顶点、后继快照和下一个待检查的后继
struct Frame {
    vertex: VertexId,
    successors: SmallVec<[VertexId; 8]>,
    next: usize,
}

/// 遍历器
pub struct Traversal<'g, V, E> {
    graph: &'g Graph<V, E>,
    config: AlgorithmConfig,
}

impl<'g, V, E> Traversal<'g, V, E> {
    /// 创建遍历器
    pub fn new(graph: &'g Graph<V, E>) -> Self {
        Self {
            graph,
            config: AlgorithmConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AlgorithmConfig) -> Self {
        self.config = config;
        self
    }

    /// 从 start 出发的深度优先搜索
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn depth_first_search(&self, start: VertexId) -> Result<SearchForest> {
        self.graph.vertex(start)?;
        let mut states = VertexStates::new(self.graph);
        self.visit(&mut states, start)?;
        Ok(SearchForest::new(vec![start], states))
    }

    /// 完整深度优先搜索：按顶点枚举顺序从每个白色顶点出发，得到 DFS 森林
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn depth_first_forest(&self) -> Result<SearchForest> {
        let mut states = VertexStates::new(self.graph);
        let mut roots = Vec::new();
        for v in self.graph.vertices() {
            if states.color(v) == Some(Color::White) {
                roots.push(v);
                self.visit(&mut states, v)?;
            }
        }
        debug!(trees = roots.len(), vertices = states.len(), "dfs forest built");
        Ok(SearchForest::new(roots, states))
    }

    fn visit(&self, states: &mut VertexStates, start: VertexId) -> Result<()> {
        match self.config.dfs_strategy {
            DfsStrategy::Iterative => self.visit_iterative(states, start),
            DfsStrategy::Recursive => self.visit_recursive(states, start),
        }
    }

    fn visit_recursive(&self, states: &mut VertexStates, u: VertexId) -> Result<()> {
        states.mark_discovered(u)?;
        for v in self.graph.successors(u)? {
            if states.color(v) == Some(Color::White) {
                states.set_predecessor(v, Some(u))?;
                self.visit_recursive(states, v)?;
            }
        }
        states.mark_finished(u)
    }

    /// 与递归版本逐步等价：后继按相同顺序检查，白色才下探
    fn visit_iterative(&self, states: &mut VertexStates, start: VertexId) -> Result<()> {
        states.mark_discovered(start)?;
        let mut stack = vec![Frame {
            vertex: start,
            successors: self.graph.successors(start)?.collect(),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.vertex;
            match frame.successors.get(frame.next).copied() {
                Some(v) => {
                    frame.next += 1;
                    if states.color(v) == Some(Color::White) {
                        states.set_predecessor(v, Some(u))?;
                        states.mark_discovered(v)?;
                        stack.push(Frame {
                            vertex: v,
                            successors: self.graph.successors(v)?.collect(),
                            next: 0,
                        });
                    }
                }
                None => {
                    stack.pop();
                    states.mark_finished(u)?;
                }
            }
        }
        Ok(())
    }

    /// 从 start 出发的广度优先搜索，距离为跳数
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn breadth_first_search(&self, start: VertexId) -> Result<SearchForest> {
        self.graph.vertex(start)?;
        let mut states = VertexStates::new(self.graph);
        self.explore(&mut states, start)?;
        Ok(SearchForest::new(vec![start], states))
    }

    /// 完整广度优先搜索：每个仍为白色的顶点作为新根，距离从 0 开始
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn complete_breadth_first_search(&self) -> Result<SearchForest> {
        let mut states = VertexStates::new(self.graph);
        let mut roots = Vec::new();
        for v in self.graph.vertices() {
            if states.color(v) == Some(Color::White) {
                roots.push(v);
                self.explore(&mut states, v)?;
            }
        }
        Ok(SearchForest::new(roots, states))
    }

    fn explore(&self, states: &mut VertexStates, start: VertexId) -> Result<()> {
        states.set_color(start, Color::Gray)?;
        states.set_distance(start, 0.0)?;

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            let next_distance = states.distance(u) + 1.0;
            for v in self.graph.successors(u)? {
                if states.color(v) == Some(Color::White) {
                    states.set_color(v, Color::Gray)?;
                    states.set_distance(v, next_distance)?;
                    states.set_predecessor(v, Some(u))?;
                    queue.push_back(v);
                }
            }
            states.set_color(u, Color::Black)?;
        }
        Ok(())
    }

    /// 拓扑排序：按 DFS 完成时间严格递减排列所有顶点
    ///
    /// 只对有向无环图有意义。图中有环时仍会正常结束，但返回的顺序不具备拓扑性质。
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn topological_order(&self) -> Result<Vec<VertexId>> {
        let forest = self.depth_first_forest()?;
        let mut order: Vec<VertexId> = self.graph.vertices().collect();
        order.sort_by_key(|&v| std::cmp::Reverse(forest.finish(v)));
        Ok(order)
    }
}
