//! 协议节点
//!
//! 每个节点同时持有发送侧状态（发送缓冲、发送指针、窗口基）与接收侧
//! 状态（乱序缓存、按序交付指针）。仿真中一个节点做发送端、一个做接收端。
//!
//! 注意两个有意保留的原型行为：
//! - `send` 是 fire-and-forget：指针无条件前移，丢失/损坏不触发自动重传；
//! - 序号比较不做模回绕（仅编码域按模数截断），超过模数的长传输会停滞。

use std::collections::BTreeMap;

use crate::error::SimError;
use crate::frame::{Bits, Framer};
use crate::journal::LogSink;
use crate::node::NodeSnapshot;
use tracing::{debug, trace};

/// 协议节点（发送端或接收端）
#[derive(Debug)]
pub struct ProtocolNode {
    name: String,
    send_buffer: Vec<char>,
    next_frame_to_send: u64,
    window_base: u64,
    window_size: u64,
    receive_buffer: BTreeMap<u64, String>,
    next_to_deliver: u64,
    delivered: String,
}

impl ProtocolNode {
    pub fn new(name: impl Into<String>, window_size: u64) -> Self {
        Self {
            name: name.into(),
            send_buffer: Vec::new(),
            next_frame_to_send: 0,
            window_base: 0,
            window_size,
            receive_buffer: BTreeMap::new(),
            next_to_deliver: 0,
            delivered: String::new(),
        }
    }

    /// 仿真开始前一次性装入全部待发送数据
    pub fn load(&mut self, payload: &str) {
        self.send_buffer = payload.chars().collect();
    }

    /// 还有数据待发、且发送指针未超出窗口时可以发送。
    pub fn can_send(&self) -> bool {
        self.next_frame_to_send < self.send_buffer.len() as u64
            && self.next_frame_to_send < self.window_base + self.window_size
    }

    /// 发送当前指针指向的数据单元，组帧并前移指针。
    ///
    /// 调用者须先以 `can_send` 判定。指针前移与帧随后是否丢失/损坏无关。
    pub fn send(&mut self, framer: &Framer, sink: &mut dyn LogSink) -> Result<Bits, SimError> {
        debug_assert!(self.can_send());
        let seq = self.next_frame_to_send;
        let unit = self.send_buffer[seq as usize];
        let (payload, check) = framer.encode_split(&unit.to_string(), seq)?;
        let mut frame = payload.clone();
        frame.extend(&check);
        sink.log(
            &self.name,
            &format!(
                "Framing data '{unit}' (Seq:{seq}) -> Payload: '{payload}' -> CRC: '{check}' -> Full Frame: '{frame}'"
            ),
        );
        self.next_frame_to_send += 1;
        trace!(next_frame_to_send = self.next_frame_to_send, "发送指针前移");
        Ok(frame)
    }

    /// 接收端处理一个校验通过的帧，返回要回发的 ACK 序号。
    ///
    /// 三种情况按序判定：
    /// 1. 恰为待交付序号：立即交付并连带交付缓存中已连续的帧，
    ///    ACK 只确认本次实际收到的序号（批量交付不改变 ACK 值）；
    /// 2. 大于待交付序号：乱序缓存，回发累计 ACK（尚未收到任何帧则不回发）；
    /// 3. 小于待交付序号：重复帧，丢弃并重发该序号的 ACK。
    ///
    /// 损坏的帧不会到达这里：解帧失败由驱动层丢弃并记录。
    pub fn on_receive(&mut self, seq: u64, data: &str, sink: &mut dyn LogSink) -> Option<u64> {
        sink.log(
            &self.name,
            &format!("Received frame {seq}. Expected: {}", self.next_to_deliver),
        );

        if seq == self.next_to_deliver {
            sink.log(
                &self.name,
                &format!("Frame {seq} is in order. Delivering '{data}' to the upper layer."),
            );
            self.delivered.push_str(data);
            self.next_to_deliver += 1;
            let ack = seq;
            while let Some(buffered) = self.receive_buffer.remove(&self.next_to_deliver) {
                sink.log(
                    &self.name,
                    &format!(
                        "Delivering buffered frame {}: '{buffered}' to the upper layer.",
                        self.next_to_deliver
                    ),
                );
                self.delivered.push_str(&buffered);
                self.next_to_deliver += 1;
            }
            sink.log(&self.name, &format!("Sending ACK for {ack}"));
            Some(ack)
        } else if seq > self.next_to_deliver {
            sink.log(
                &self.name,
                &format!("Frame {seq} is out of order. Buffering."),
            );
            self.receive_buffer.insert(seq, data.to_string());
            if self.next_to_deliver > 0 {
                let ack = self.next_to_deliver - 1;
                sink.log(&self.name, &format!("Sending cumulative ACK for {ack}"));
                Some(ack)
            } else {
                debug!(seq, "尚未收到任何按序帧，不回发 ACK");
                None
            }
        } else {
            sink.log(
                &self.name,
                &format!(
                    "Received duplicate frame {seq}. Discarding and re-sending ACK for {seq}."
                ),
            );
            Some(seq)
        }
    }

    /// 发送端处理一个累计 ACK：窗口基滑到已确认序号之后。
    ///
    /// 低于当前窗口基的 ACK 已被满足，直接忽略。
    pub fn on_ack(&mut self, ack: u64, sink: &mut dyn LogSink) {
        sink.log(&self.name, &format!("Received ACK for frame {ack}"));
        if ack >= self.window_base {
            self.window_base = ack + 1;
            sink.log(
                &self.name,
                &format!("Sender window base moved to {}", self.window_base),
            );
        } else {
            trace!(ack, window_base = self.window_base, "过期 ACK，忽略");
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn next_frame_to_send(&self) -> u64 {
        self.next_frame_to_send
    }

    pub fn window_base(&self) -> u64 {
        self.window_base
    }

    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    pub fn next_to_deliver(&self) -> u64 {
        self.next_to_deliver
    }

    /// 已按序交付给上层的数据
    pub fn delivered(&self) -> &str {
        &self.delivered
    }

    /// 导出展示层可见的公开状态
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            name: self.name.clone(),
            send_buffer: self.send_buffer.iter().collect(),
            next_frame_to_send: self.next_frame_to_send,
            window_base: self.window_base,
            window_size: self.window_size,
            buffered: self
                .receive_buffer
                .iter()
                .map(|(&seq, data)| (seq, data.clone()))
                .collect(),
            next_to_deliver: self.next_to_deliver,
            delivered: self.delivered.clone(),
        }
    }
}
