//! 节点状态快照
//!
//! 展示层可见的节点公开状态（缓冲区、指针、窗口边界）。

use serde::Serialize;

/// 节点公开状态快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub name: String,
    /// 待发送数据（按字符）
    pub send_buffer: String,
    pub next_frame_to_send: u64,
    /// 最低未确认序号（窗口基）
    pub window_base: u64,
    pub window_size: u64,
    /// 乱序缓存：序号 -> 负载，升序
    pub buffered: Vec<(u64, String)>,
    pub next_to_deliver: u64,
    /// 已按序交付给上层的数据
    pub delivered: String,
}
