//! 仿真配置
//!
//! 仿真开始时一次性给定并校验；校验失败则仿真不启动。

use crate::error::SimError;
use crate::frame::Bits;
use serde::{Deserialize, Serialize};

/// 仿真配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// 待发送文本（每字符一帧），不可为空
    pub payload: String,
    /// 丢包概率，必须在 [0.0, 1.0] 内
    pub loss_probability: f64,
    /// 是否注入单比特错误
    pub corruption_enabled: bool,
    /// 滑动窗口大小
    pub window_size: u64,
    /// 序号模数（原型为 4，即 2 位序号域）
    pub sequence_modulus: u64,
    /// CRC 生成多项式位串
    pub generator: String,
    /// 每个负载字符的位宽
    pub unit_bits: usize,
    /// 随机种子（丢包/损坏抽取可复现）
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            payload: String::new(),
            loss_probability: 0.1,
            corruption_enabled: false,
            window_size: 3,
            sequence_modulus: 4,
            generator: "1011".to_string(),
            unit_bits: 8,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// 校验配置。任何一项不满足即拒绝启动。
    pub fn validate(&self) -> Result<(), SimError> {
        if self.payload.is_empty() {
            return Err(SimError::EmptyPayload);
        }
        if !(0.0..=1.0).contains(&self.loss_probability) {
            return Err(SimError::LossProbabilityOutOfRange(self.loss_probability));
        }
        if self.window_size == 0 {
            return Err(SimError::ZeroWindow);
        }
        if self.sequence_modulus < 2 {
            return Err(SimError::BadSequenceModulus(self.sequence_modulus));
        }
        self.generator_bits()?;
        if self.unit_bits == 0 {
            return Err(SimError::ZeroUnitWidth);
        }
        for unit in self.payload.chars() {
            if self.unit_bits < 64 && (unit as u64) >> self.unit_bits != 0 {
                return Err(SimError::UnitTooWide {
                    unit,
                    width: self.unit_bits,
                });
            }
        }
        Ok(())
    }

    /// 解析生成多项式位串
    pub fn generator_bits(&self) -> Result<Bits, SimError> {
        Bits::from_pattern(&self.generator)
            .filter(|bits| bits.len() >= 2)
            .ok_or_else(|| SimError::BadGenerator(self.generator.clone()))
    }
}
