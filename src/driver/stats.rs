//! 统计信息
//!
//! 定义一次仿真运行的统计数据结构。

use serde::Serialize;

/// 运行统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub frames_sent: u64,
    pub frames_lost: u64,
    pub frames_corrupted: u64,
    /// 已按序交付给上层的数据单元数（含连带交付的缓存帧）
    pub frames_delivered: u64,
    pub acks_received: u64,
    /// 接收端判定为重复并丢弃的帧数
    pub duplicates: u64,
}
