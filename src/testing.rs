//! 测试辅助

use tracing_subscriber::EnvFilter;

/// 安装测试用日志订阅器，`RUST_LOG=graphalgo=trace` 可查看算法事件
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
