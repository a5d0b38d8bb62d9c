//! 边定义

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};

/// 未指定权重时的默认值
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// 边 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// 边
///
/// 无向图中同一条边同时挂在两个端点的关联表上，`tail`/`head` 保留插入时的方向。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<E> {
    /// 边 ID
    id: EdgeId,
    /// 起点
    tail: VertexId,
    /// 终点
    head: VertexId,
    /// 用户负载
    payload: E,
    /// 权重
    weight: f64,
}

impl<E> Edge<E> {
    /// 创建新边
    pub fn new(id: EdgeId, tail: VertexId, head: VertexId, payload: E, weight: f64) -> Self {
        Self {
            id,
            tail,
            head,
            payload,
            weight,
        }
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取起点
    pub fn tail(&self) -> VertexId {
        self.tail
    }

    /// 获取终点
    pub fn head(&self) -> VertexId {
        self.head
    }

    /// 返回 (起点, 终点)
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.tail, self.head)
    }

    /// 返回边上与 v 相对的另一个端点，v 不在边上时返回 None
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        if v == self.tail {
            Some(self.head)
        } else if v == self.head {
            Some(self.tail)
        } else {
            None
        }
    }

    /// 获取负载
    pub fn payload(&self) -> &E {
        &self.payload
    }

    /// 获取可变负载
    pub fn payload_mut(&mut self) -> &mut E {
        &mut self.payload
    }

    /// 获取权重
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// 设置权重
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// 同时替换负载和权重
    pub(crate) fn update(&mut self, payload: E, weight: f64) {
        self.payload = payload;
        self.weight = weight;
    }

    /// 取出负载
    pub fn into_payload(self) -> E {
        self.payload
    }
}
