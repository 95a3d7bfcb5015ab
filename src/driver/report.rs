//! 运行状态与单步报告
//!
//! `step` 的返回值：两个节点的公开状态与是否完成。

use crate::driver::Stats;
use crate::node::NodeSnapshot;
use serde::{Deserialize, Serialize};

/// 仿真运行状态机：`Idle → Running → Finished`，`Finished` 为终态，
/// 仅显式 reset 可回到 `Idle`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Finished,
}

/// 单步推进后的公开状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// 本次运行内的步数（从 1 计）
    pub step: u64,
    pub state: RunState,
    pub sender: NodeSnapshot,
    pub receiver: NodeSnapshot,
    pub stats: Stats,
    pub finished: bool,
}
