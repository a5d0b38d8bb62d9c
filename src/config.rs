//! 算法配置

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 深度优先搜索的实现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DfsStrategy {
    /// 显式栈，递归深度不受调用栈限制
    Iterative,
    /// 调用栈递归
    Recursive,
}

impl Default for DfsStrategy {
    fn default() -> Self {
        DfsStrategy::Iterative
    }
}

/// 算法配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    /// DFS 实现方式（两种方式结果完全一致）
    pub dfs_strategy: DfsStrategy,
    /// Bellman-Ford 结束后是否追加一轮负权环检测
    pub detect_negative_cycles: bool,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            dfs_strategy: DfsStrategy::default(),
            detect_negative_cycles: true,
        }
    }
}

impl AlgorithmConfig {
    /// 从 JSON 文本加载，缺省字段取默认值
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// 导出为 JSON 文本
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::ConfigError(e.to_string()))
    }

    pub fn with_dfs_strategy(mut self, strategy: DfsStrategy) -> Self {
        self.dfs_strategy = strategy;
        self
    }

    pub fn with_negative_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_negative_cycles = enabled;
        self
    }
}
