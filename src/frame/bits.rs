//! 位串类型
//!
//! 帧在本仿真中是内部表示的位串（每个元素为 0/1），不是线上的字节格式。

use std::fmt;

/// 位串。`Display` 渲染为 0/1 字符序列。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bits(Vec<u8>);

impl Bits {
    /// 创建空位串
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 从 0/1 字符串解析；含其他字符时返回 `None`。
    pub fn from_pattern(pattern: &str) -> Option<Self> {
        pattern
            .chars()
            .map(|c| match c {
                '0' => Some(0),
                '1' => Some(1),
                _ => None,
            })
            .collect::<Option<Vec<u8>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 读取第 `i` 位
    pub fn bit(&self, i: usize) -> u8 {
        self.0[i]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// 追加一位
    pub fn push(&mut self, bit: u8) {
        debug_assert!(bit <= 1);
        self.0.push(bit);
    }

    /// 追加定宽无符号整数（高位在前）
    pub fn push_uint(&mut self, value: u64, width: usize) {
        for shift in (0..width).rev() {
            self.0.push(((value >> shift) & 1) as u8);
        }
    }

    /// 解码从 `start` 开始、宽度 `width` 的无符号整数（高位在前）
    pub fn uint(&self, start: usize, width: usize) -> u64 {
        self.0[start..start + width]
            .iter()
            .fold(0, |acc, &b| (acc << 1) | b as u64)
    }

    /// 追加另一个位串
    pub fn extend(&mut self, other: &Bits) {
        self.0.extend_from_slice(&other.0);
    }

    /// 翻转第 `i` 位
    pub fn flip(&mut self, i: usize) {
        self.0[i] ^= 1;
    }
}

impl FromIterator<u8> for Bits {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{b}")?;
        }
        Ok(())
    }
}
