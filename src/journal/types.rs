//! 日志汇类型
//!
//! `Journal` 把事件存在内存里（仿真结束可写 JSON 文件），
//! `TracingSink` 直接转发到 tracing。

use serde::{Deserialize, Serialize};
use tracing::info;

/// 一条面向展示层的事件记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub source: String,
    pub message: String,
}

/// 日志汇：只追加、保序，核心不要求任何确认。
pub trait LogSink {
    fn log(&mut self, source: &str, message: &str);
}

/// 内存日志收集器
#[derive(Debug, Default, Serialize)]
pub struct Journal {
    pub entries: Vec<LogEntry>,
}

impl Journal {
    /// 是否存在来自 `source` 且包含 `needle` 的消息
    pub fn contains(&self, source: &str, needle: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.source == source && e.message.contains(needle))
    }
}

impl LogSink for Journal {
    fn log(&mut self, source: &str, message: &str) {
        self.entries.push(LogEntry {
            source: source.to_string(),
            message: message.to_string(),
        });
    }
}

/// 转发到 tracing 的日志汇
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, source: &str, message: &str) {
        info!(source, "{message}");
    }
}
