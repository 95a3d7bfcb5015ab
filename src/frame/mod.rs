//! 帧模块
//!
//! 定义位串类型与帧的编解码（序号域 + 负载位 + CRC 校验域）。

// 子模块声明
mod bits;
mod framer;

// 重新导出公共接口
pub use bits::Bits;
pub use framer::{Framer, Unframed};
