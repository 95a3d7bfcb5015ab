//! 不可靠信道
//!
//! 每次传输先抽取丢包（命中即短路返回 `Lost`），未丢包且开启错误注入时
//! 以固定概率 0.3 在均匀随机位置翻转一位。丢包与损坏同一次传输互斥。
//! ACK 在本模型中视为可靠瞬时送达，不经过此信道。
//!
//! 随机源为带种子的 ChaCha8，同一种子下结果可复现。

use crate::frame::Bits;
use crate::journal::LogSink;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// 单比特错误注入概率（原型固定为 0.3）
pub const BIT_ERROR_PROB: f64 = 0.3;

/// 信道传输结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transmission {
    /// 帧送达（可能已被注入比特错误）
    Delivered(Bits),
    /// 帧在传输中丢失
    Lost,
}

/// 不可靠信道
#[derive(Debug)]
pub struct Channel {
    loss_probability: f64,
    corruption_enabled: bool,
    rng: ChaCha8Rng,
}

impl Channel {
    pub fn new(loss_probability: f64, corruption_enabled: bool, seed: u64) -> Self {
        Self {
            loss_probability,
            corruption_enabled,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// 传输一帧。
    pub fn transmit(&mut self, frame: Bits, sink: &mut dyn LogSink) -> Transmission {
        sink.log("Channel", &format!("Sending frame: {frame}"));

        if self.rng.gen_range(0.0..1.0) < self.loss_probability {
            debug!(frame = %frame, "帧在信道中丢失");
            sink.log("Channel", "!!! Frame lost in transit !!!");
            return Transmission::Lost;
        }

        if self.corruption_enabled
            && !frame.is_empty()
            && self.rng.gen_range(0.0..1.0) < BIT_ERROR_PROB
        {
            let index = self.rng.gen_range(0..frame.len());
            let before = frame.bit(index);
            let mut corrupted = frame;
            corrupted.flip(index);
            debug!(index, "注入单比特错误");
            sink.log(
                "Channel",
                &format!(
                    "!!! Bit error introduced at index {index} (changed {before} to {}) !!!",
                    corrupted.bit(index)
                ),
            );
            return Transmission::Delivered(corrupted);
        }

        Transmission::Delivered(frame)
    }
}
