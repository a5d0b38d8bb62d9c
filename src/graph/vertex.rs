//! 顶点定义
//!
//! 顶点只携带用户负载，算法状态保存在独立的侧表中

use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（图内唯一，删除后不再复用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 顶点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex<V> {
    /// 顶点 ID
    id: VertexId,
    /// 用户负载
    payload: V,
}

impl<V> Vertex<V> {
    /// 创建新顶点
    pub fn new(id: VertexId, payload: V) -> Self {
        Self { id, payload }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取负载
    pub fn payload(&self) -> &V {
        &self.payload
    }

    /// 获取可变负载
    pub fn payload_mut(&mut self) -> &mut V {
        &mut self.payload
    }

    /// 取出负载
    pub fn into_payload(self) -> V {
        self.payload
    }
}
