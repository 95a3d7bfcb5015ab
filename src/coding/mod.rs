//! 差错检测编码模块
//!
//! 基于二进制多项式除法的简化 CRC（GF(2) 上的按位 XOR）。

// 子模块声明
mod crc;

// 重新导出公共接口
pub use crc::Crc;
