//! 算法运行期的顶点状态
//!
//! 颜色、距离、前驱和时间戳不属于顶点本身，每次算法调用都会按图的当前顶点集
//! 重新分配一张侧表，运行之间互不影响。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 遍历标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// 未发现
    White,
    /// 已发现、未完成
    Gray,
    /// 已完成
    Black,
}

/// 单个顶点的算法状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexState {
    pub color: Color,
    /// 源点距离，不可达为正无穷（序列化为 null）
    #[serde(with = "unreachable_as_null")]
    pub distance: f64,
    pub predecessor: Option<VertexId>,
    /// 发现时间戳（0 表示未发现）
    pub discover: usize,
    /// 完成时间戳（0 表示未完成）
    pub finish: usize,
}

impl Default for VertexState {
    fn default() -> Self {
        Self {
            color: Color::White,
            distance: f64::INFINITY,
            predecessor: None,
            discover: 0,
            finish: 0,
        }
    }
}

/// JSON 没有无穷大：正无穷距离写成 null，读回时还原
mod unreachable_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(distance: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if *distance == f64::INFINITY {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(distance)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// 顶点 -> 算法状态 侧表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexStates {
    records: IndexMap<VertexId, VertexState>,
    /// 全局时间戳计数器
    clock: usize,
}

impl VertexStates {
    /// 初始化：所有顶点置白、距离无穷、无前驱、时间戳清零
    pub fn new<V, E>(graph: &Graph<V, E>) -> Self {
        let records = graph
            .vertices()
            .map(|v| (v, VertexState::default()))
            .collect();
        Self { records, clock: 0 }
    }

    fn record_mut(&mut self, v: VertexId) -> Result<&mut VertexState> {
        self.records.get_mut(&v).ok_or(Error::InvalidVertex(v))
    }

    /// 置灰并打发现时间戳
    pub(crate) fn mark_discovered(&mut self, v: VertexId) -> Result<()> {
        self.clock += 1;
        let clock = self.clock;
        let record = self.record_mut(v)?;
        record.color = Color::Gray;
        record.discover = clock;
        Ok(())
    }

    /// 置黑并打完成时间戳
    pub(crate) fn mark_finished(&mut self, v: VertexId) -> Result<()> {
        self.clock += 1;
        let clock = self.clock;
        let record = self.record_mut(v)?;
        record.color = Color::Black;
        record.finish = clock;
        Ok(())
    }

    pub fn set_color(&mut self, v: VertexId, color: Color) -> Result<()> {
        self.record_mut(v)?.color = color;
        Ok(())
    }

    pub fn set_distance(&mut self, v: VertexId, distance: f64) -> Result<()> {
        self.record_mut(v)?.distance = distance;
        Ok(())
    }

    pub fn set_predecessor(&mut self, v: VertexId, predecessor: Option<VertexId>) -> Result<()> {
        self.record_mut(v)?.predecessor = predecessor;
        Ok(())
    }

    /// 顶点个数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 获取顶点状态
    pub fn get(&self, v: VertexId) -> Option<&VertexState> {
        self.records.get(&v)
    }

    /// 按图的枚举顺序遍历所有状态
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &VertexState)> + '_ {
        self.records.iter().map(|(&v, state)| (v, state))
    }

    pub fn color(&self, v: VertexId) -> Option<Color> {
        self.get(v).map(|s| s.color)
    }

    /// 距离，未知顶点视为不可达
    pub fn distance(&self, v: VertexId) -> f64 {
        self.get(v).map_or(f64::INFINITY, |s| s.distance)
    }

    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.get(v).and_then(|s| s.predecessor)
    }

    pub fn discover(&self, v: VertexId) -> Option<usize> {
        self.get(v).map(|s| s.discover).filter(|&t| t > 0)
    }

    pub fn finish(&self, v: VertexId) -> Option<usize> {
        self.get(v).map(|s| s.finish).filter(|&t| t > 0)
    }

    /// 前驱森林：顶点 -> 前驱
    pub fn predecessors(&self) -> IndexMap<VertexId, Option<VertexId>> {
        self.records
            .iter()
            .map(|(&v, s)| (v, s.predecessor))
            .collect()
    }

    /// 距离标记：顶点 -> 距离
    pub fn distances(&self) -> IndexMap<VertexId, f64> {
        self.records.iter().map(|(&v, s)| (v, s.distance)).collect()
    }

    /// 沿前驱链重建 start 到 end 的路径（含两端），end 不在 start 的子树中时返回 None
    pub fn path_to(&self, start: VertexId, end: VertexId) -> Option<Vec<VertexId>> {
        self.get(start)?;
        let mut path = vec![end];
        let mut current = end;
        // 负权环可能让前驱链成环，步数不超过顶点数
        for _ in 0..self.records.len() {
            if current == start {
                path.reverse();
                return Some(path);
            }
            current = self.predecessor(current)?;
            path.push(current);
        }
        None
    }
}

/// 按浮点键排序的堆元素，相等性与顺序只看键
#[derive(Debug, Clone, Copy)]
pub(crate) struct Keyed<T> {
    pub key: f64,
    pub value: T,
}

impl<T> Keyed<T> {
    pub fn new(key: f64, value: T) -> Self {
        Self { key, value }
    }
}

impl<T> PartialEq for Keyed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> PartialOrd for Keyed<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.key.partial_cmp(&other.key)
    }
}
