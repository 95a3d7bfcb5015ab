//! CRC 校验
//!
//! 把数据位串视为二进制多项式系数，对固定生成多项式做长除法，
//! 余数即校验值（宽度 = 生成多项式长度 - 1）。

use crate::error::SimError;
use crate::frame::Bits;
use tracing::trace;

/// CRC 编解码器：生成多项式在构造时固定。
#[derive(Debug, Clone)]
pub struct Crc {
    generator: Bits,
}

impl Crc {
    /// 创建 CRC 编解码器。生成多项式长度必须 >= 2（校验宽度 >= 1）。
    pub fn new(generator: Bits) -> Result<Self, SimError> {
        if generator.len() < 2 {
            return Err(SimError::BadGenerator(generator.to_string()));
        }
        Ok(Self { generator })
    }

    /// 校验值宽度（= 生成多项式长度 - 1）
    pub fn width(&self) -> usize {
        self.generator.len() - 1
    }

    /// 计算数据位串的校验值。
    ///
    /// 在数据后补 `width()` 个零位做多项式长除法，返回余数。
    /// 空输入是非法的。
    pub fn checksum(&self, data: &Bits) -> Result<Bits, SimError> {
        if data.is_empty() {
            return Err(SimError::EmptyInput);
        }
        let n = self.generator.len();
        let mut work: Vec<u8> = Vec::with_capacity(data.len() + n - 1);
        work.extend_from_slice(data.as_slice());
        work.extend(std::iter::repeat(0).take(n - 1));

        for i in 0..data.len() {
            if work[i] == 1 {
                for j in 0..n {
                    work[i + j] ^= self.generator.bit(j);
                }
            }
        }

        let remainder: Bits = work[data.len()..].iter().copied().collect();
        trace!(data = %data, crc = %remainder, "计算校验值");
        Ok(remainder)
    }

    /// 校验「数据 + 校验值」位串：余数全零则通过。
    ///
    /// 位串短于生成多项式时无法完成除法，按失败处理。
    pub fn verify(&self, coded: &Bits) -> bool {
        let n = self.generator.len();
        if coded.len() < n {
            return false;
        }
        let mut work: Vec<u8> = coded.as_slice().to_vec();
        for i in 0..=coded.len() - n {
            if work[i] == 1 {
                for j in 0..n {
                    work[i + j] ^= self.generator.bit(j);
                }
            }
        }
        work[coded.len() - n + 1..].iter().all(|&b| b == 0)
    }
}
