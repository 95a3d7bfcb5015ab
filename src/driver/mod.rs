//! 步进驱动模块
//!
//! 单步推进仿真：发送 → 信道 → 解帧 → 接收/确认，并维护
//! `Idle → Running → Finished` 状态机。

// 子模块声明
mod config;
mod report;
mod stats;
mod step_driver;

// 重新导出公共接口
pub use config::SimConfig;
pub use report::{RunState, StepReport};
pub use stats::Stats;
pub use step_driver::StepDriver;
