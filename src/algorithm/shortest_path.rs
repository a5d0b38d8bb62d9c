//! 单源最短路径
//!
//! Bellman-Ford 与 Dijkstra，两者共用同一个松弛操作

use super::state::{Color, Keyed, VertexStates};
use crate::collections::{AdaptableHeap, Locator};
use crate::config::AlgorithmConfig;
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// 最短路径结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortestPaths {
    source: VertexId,
    states: VertexStates,
    negative_cycle: bool,
}

impl ShortestPaths {
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// 源点到 v 的距离，不可达为正无穷
    pub fn distance(&self, v: VertexId) -> f64 {
        self.states.distance(v)
    }

    pub fn distances(&self) -> IndexMap<VertexId, f64> {
        self.states.distances()
    }

    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.states.predecessor(v)
    }

    /// 源点到 v 的最短路径，不可达时返回 None
    pub fn path_to(&self, v: VertexId) -> Option<Vec<VertexId>> {
        self.states.path_to(self.source, v)
    }

    /// 是否检测到从源点可达的负权环（未开启检测时恒为 false）
    pub fn has_negative_cycle(&self) -> bool {
        self.negative_cycle
    }

    pub fn states(&self) -> &VertexStates {
        &self.states
    }
}

/// 松弛 (u, v)：若经 u 到达 v 更短，则更新 v 的距离和前驱
///
/// u、v 不相邻时什么也不做。返回是否发生了更新。
pub fn relax<V, E>(
    graph: &Graph<V, E>,
    states: &mut VertexStates,
    u: VertexId,
    v: VertexId,
) -> Result<bool> {
    let Some(edge) = graph.edge(u, v)? else {
        return Ok(false);
    };
    let candidate = states.distance(u) + edge.weight();
    if states.distance(v) > candidate {
        states.set_distance(v, candidate)?;
        states.set_predecessor(v, Some(u))?;
        trace!(from = %u, to = %v, distance = candidate, "edge relaxed");
        return Ok(true);
    }
    Ok(false)
}

/// 单源初始化：距离全部置为无穷、前驱清空，源点距离为 0
fn initialize_single_source<V, E>(graph: &Graph<V, E>, source: VertexId) -> Result<VertexStates> {
    graph.vertex(source)?;
    let mut states = VertexStates::new(graph);
    states.set_distance(source, 0.0)?;
    Ok(states)
}

/// 最短路径求解器
pub struct ShortestPath<'g, V, E> {
    graph: &'g Graph<V, E>,
    config: AlgorithmConfig,
}

impl<'g, V, E> ShortestPath<'g, V, E> {
    /// 创建求解器
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

    /// 边的端点对；无向边两个方向都要松弛
    fn arcs(&self) -> Vec<(VertexId, VertexId)> {
        let directed = self.graph.is_directed();
        self.graph
            .edges()
            .flat_map(|e| {
                let (u, v) = e.endpoints();
                let reverse = (!directed && u != v).then_some((v, u));
                std::iter::once((u, v)).chain(reverse)
            })
            .collect()
    }

    /// Bellman-Ford 算法，允许负权边
    ///
    /// 至多进行 |V|-1 轮全边松弛，某一轮无任何更新时提前结束。开启
    /// `detect_negative_cycles` 时再做一轮检查，结果通过
    /// [`ShortestPaths::has_negative_cycle`] 报告；关闭时存在负权环的结果无定义。
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn bellman_ford(&self, source: VertexId) -> Result<ShortestPaths> {
        let mut states = initialize_single_source(self.graph, source)?;
        let arcs = self.arcs();

        let rounds = self.graph.vertex_count().saturating_sub(1);
        for round in 0..rounds {
            let mut changed = false;
            for &(u, v) in &arcs {
                changed |= relax(self.graph, &mut states, u, v)?;
            }
            if !changed {
                trace!(round, "no relaxation, stopped early");
                break;
            }
        }

        let mut negative_cycle = false;
        if self.config.detect_negative_cycles {
            for &(u, v) in &arcs {
                if let Some(edge) = self.graph.edge(u, v)? {
                    if states.distance(u) + edge.weight() < states.distance(v) {
                        negative_cycle = true;
                        break;
                    }
                }
            }
            if negative_cycle {
                warn!(source = %source, "negative-weight cycle reachable from source");
            }
        }

        debug!(source = %source, arcs = arcs.len(), negative_cycle, "bellman-ford finished");
        Ok(ShortestPaths {
            source,
            states,
            negative_cycle,
        })
    }

    /// Dijkstra 算法
    ///
    /// 前提：所有边权非负。该前提不做运行时检查，违反时结果无定义。
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn dijkstra(&self, source: VertexId) -> Result<ShortestPaths> {
        let mut states = initialize_single_source(self.graph, source)?;

        let mut heap = AdaptableHeap::with_capacity(self.graph.vertex_count());
        let mut locators: IndexMap<VertexId, Locator> = IndexMap::new();
        for v in self.graph.vertices() {
            let locator = heap.insert(Keyed::new(states.distance(v), v));
            locators.insert(v, locator);
        }

        let mut settled = 0usize;
        while let Ok(Keyed { value: u, .. }) = heap.pop() {
            states.set_color(u, Color::Gray)?;
            for v in self.graph.successors(u)? {
                if states.color(v) == Some(Color::White) && relax(self.graph, &mut states, u, v)? {
                    if let Some(&locator) = locators.get(&v) {
                        heap.update(locator, Keyed::new(states.distance(v), v))?;
                    }
                }
            }
            states.set_color(u, Color::Black)?;
            settled += 1;
        }

        debug!(source = %source, settled, "dijkstra finished");
        Ok(ShortestPaths {
            source,
            states,
            negative_cycle: false,
        })
    }
}
