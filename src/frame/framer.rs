//! 帧编解码
//!
//! 帧格式：`[序号域] + [负载位] + [CRC 校验域]`。
//! 序号域宽度 = ceil(log2(序号模数))，原型为 2 位；负载按固定单元位宽
//! （原型为 8 位/字符）编码；校验域由 `Crc` 在序号+负载上生成。

use crate::coding::Crc;
use crate::error::SimError;
use crate::frame::Bits;
use tracing::{debug, trace};

/// 解帧结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unframed {
    /// 校验通过：序号 + 负载文本（负载可以为空）
    Valid { seq: u64, data: String },
    /// 帧过短或 CRC 校验失败；序号/负载不可用
    Corrupted,
}

/// 帧编解码器
#[derive(Debug, Clone)]
pub struct Framer {
    crc: Crc,
    seq_modulus: u64,
    seq_width: usize,
    unit_bits: usize,
}

impl Framer {
    pub fn new(generator: Bits, seq_modulus: u64, unit_bits: usize) -> Result<Self, SimError> {
        if seq_modulus < 2 {
            return Err(SimError::BadSequenceModulus(seq_modulus));
        }
        if unit_bits == 0 {
            return Err(SimError::ZeroUnitWidth);
        }
        let crc = Crc::new(generator)?;
        let seq_width = (64 - (seq_modulus - 1).leading_zeros()) as usize;
        Ok(Self {
            crc,
            seq_modulus,
            seq_width,
            unit_bits,
        })
    }

    /// 序号域宽度（位）
    pub fn seq_width(&self) -> usize {
        self.seq_width
    }

    /// 合法帧的最小长度：序号域 + 校验域（负载可为空）
    pub fn min_frame_len(&self) -> usize {
        self.seq_width + self.crc.width()
    }

    /// 组帧：序号按模数取余编入定宽序号域，负载逐字符编码，末尾追加 CRC。
    pub fn encode(&self, data: &str, seq: u64) -> Result<Bits, SimError> {
        let (mut bits, check) = self.encode_split(data, seq)?;
        bits.extend(&check);
        debug!(seq, data, frame = %bits, "组帧完成");
        Ok(bits)
    }

    /// 同 `encode`，但把「序号+负载位」与校验域分开返回，
    /// 供展示层逐段呈现组帧过程。
    pub fn encode_split(&self, data: &str, seq: u64) -> Result<(Bits, Bits), SimError> {
        let mut bits = Bits::new();
        bits.push_uint(seq % self.seq_modulus, self.seq_width);
        for unit in data.chars() {
            if self.unit_bits < 64 && (unit as u64) >> self.unit_bits != 0 {
                return Err(SimError::UnitTooWide {
                    unit,
                    width: self.unit_bits,
                });
            }
            bits.push_uint(unit as u64, self.unit_bits);
        }
        let check = self.crc.checksum(&bits)?;
        Ok((bits, check))
    }

    /// 解帧：长度检查与 CRC 校验失败一律按损坏处理（fail closed）。
    ///
    /// 负载位数不是单元位宽整数倍时，末尾不足一个单元的位被丢弃
    /// （保留原型行为，不视为错误）。
    pub fn decode(&self, frame: &Bits) -> Unframed {
        if frame.len() < self.min_frame_len() {
            debug!(len = frame.len(), min = self.min_frame_len(), "帧过短");
            return Unframed::Corrupted;
        }
        if !self.crc.verify(frame) {
            debug!(frame = %frame, "CRC 校验失败");
            return Unframed::Corrupted;
        }

        let seq = frame.uint(0, self.seq_width);
        let payload_bits = frame.len() - self.seq_width - self.crc.width();
        let mut data = String::new();
        let mut offset = self.seq_width;
        while offset + self.unit_bits <= self.seq_width + payload_bits {
            let value = frame.uint(offset, self.unit_bits);
            data.push(char::from_u32(value as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
            offset += self.unit_bits;
        }
        trace!(seq, data, "解帧完成");
        Unframed::Valid { seq, data }
    }
}
