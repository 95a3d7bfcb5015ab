//! 日志汇模块
//!
//! 协议核心通过 `(来源, 消息)` 形式向展示层输出事件描述，
//! 核心不持有任何全局日志状态，日志能力按参数注入。

// 子模块声明
mod types;

// 重新导出公共接口
pub use types::{Journal, LogEntry, LogSink, TracingSink};
