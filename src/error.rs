//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("顶点不属于该图: {0}")]
    InvalidVertex(VertexId),

    #[error("堆为空")]
    EmptyHeap,

    #[error("定位器已失效: {0}")]
    StaleLocator(usize),

    #[error("无效的并查集节点: {0}")]
    InvalidSetNode(usize),

    #[error("配置错误: {0}")]
    ConfigError(String),
}
