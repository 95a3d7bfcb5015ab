//! 错误类型
//!
//! 定义仿真的错误分类：配置校验失败与非法输入。
//! 丢包/损坏不是错误，它们是信道与解帧的正常结果（见 `channel`/`frame`）。

use thiserror::Error;

/// 仿真错误
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// 待发送数据为空
    #[error("payload must not be empty")]
    EmptyPayload,

    /// 丢包概率超出 [0.0, 1.0]
    #[error("loss probability {0} out of range [0.0, 1.0]")]
    LossProbabilityOutOfRange(f64),

    /// 窗口大小必须为正
    #[error("window size must be positive")]
    ZeroWindow,

    /// 序号模数必须 >= 2
    #[error("sequence modulus must be >= 2, got {0}")]
    BadSequenceModulus(u64),

    /// 生成多项式必须是仅含 0/1 的非空位串，且长度 >= 2
    #[error("generator must be a bit pattern of {{0,1}} with length >= 2, got {0:?}")]
    BadGenerator(String),

    /// 负载单元位宽必须为正
    #[error("unit bit width must be positive")]
    ZeroUnitWidth,

    /// 负载字符超出单元位宽可表示范围
    #[error("payload unit {unit:?} does not fit in {width} bits")]
    UnitTooWide { unit: char, width: usize },

    /// 仿真进行中不允许再次 start
    #[error("simulation already running; reset first")]
    AlreadyRunning,

    /// CRC 计算的输入为空
    #[error("cannot compute a checksum over empty input")]
    EmptyInput,
}
