//! 信道模块
//!
//! 不可靠信道模型：按概率丢帧，或注入单比特错误。

// 子模块声明
mod unreliable;

// 重新导出公共接口
pub use unreliable::{Channel, Transmission};
