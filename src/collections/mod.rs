//! 算法辅助数据结构
//!
//! 可定位优先队列和并查集，不依赖图结构

mod heap;
mod union_find;

pub use heap::{AdaptableHeap, Locator};
pub use union_find::{DisjointSet, SetNode};
