//! 步进驱动
//!
//! 一次 `step` 同步完成一个离散推进：尝试发送 → 过信道 → 解帧 →
//! 接收/确认 → ACK 直达发送端（ACK 信道视为可靠）。没有定时器：
//! 丢失/损坏只记录「等待超时重传（模拟）」，不会真正重传。

use crate::channel::{Channel, Transmission};
use crate::driver::{RunState, SimConfig, Stats, StepReport};
use crate::error::SimError;
use crate::frame::{Framer, Unframed};
use crate::journal::LogSink;
use crate::node::{NodeSnapshot, ProtocolNode};
use tracing::{debug, info, trace};

/// 一次运行的全部可变状态。整个状态图由单个驱动实例独占，
/// 单线程顺序推进，无共享可变资源。
#[derive(Debug)]
struct Run {
    sender: ProtocolNode,
    receiver: ProtocolNode,
    framer: Framer,
    channel: Channel,
    stats: Stats,
    /// 本次运行的数据单元总数
    total: u64,
}

/// 步进驱动：持有一对协议节点并逐步推进仿真。
#[derive(Debug, Default)]
pub struct StepDriver {
    state: RunState,
    steps: u64,
    run: Option<Run>,
}

impl StepDriver {
    pub fn state(&self) -> RunState {
        self.state
    }

    /// 启动仿真：校验配置，创建一对新节点与信道。
    ///
    /// 运行中不允许再次启动；`Finished` 或 `Idle` 状态下会丢弃
    /// 上一次运行的状态并重新开始。
    #[tracing::instrument(skip(self, sink))]
    pub fn start(&mut self, cfg: &SimConfig, sink: &mut dyn LogSink) -> Result<(), SimError> {
        if self.state == RunState::Running {
            return Err(SimError::AlreadyRunning);
        }
        cfg.validate()?;

        let framer = Framer::new(cfg.generator_bits()?, cfg.sequence_modulus, cfg.unit_bits)?;
        let channel = Channel::new(cfg.loss_probability, cfg.corruption_enabled, cfg.seed);
        let mut sender = ProtocolNode::new("Sender", cfg.window_size);
        sender.load(&cfg.payload);
        let receiver = ProtocolNode::new("Receiver", cfg.window_size);
        let total = cfg.payload.chars().count() as u64;

        sink.log(
            "Sender",
            &format!(
                "Sender ready to send data. Buffer: {:?}",
                cfg.payload.chars().collect::<Vec<_>>()
            ),
        );

        self.run = Some(Run {
            sender,
            receiver,
            framer,
            channel,
            stats: Stats::default(),
            total,
        });
        self.steps = 0;
        self.state = RunState::Running;
        info!(payload = %cfg.payload, total, "🚦 仿真开始");
        Ok(())
    }

    /// 推进一个离散步，返回推进后的公开状态。
    ///
    /// 非 `Running` 状态下调用不改变任何状态，只返回当前报告。
    #[tracing::instrument(skip(self, sink))]
    pub fn step(&mut self, sink: &mut dyn LogSink) -> StepReport {
        if self.state != RunState::Running {
            trace!(state = ?self.state, "未在运行，忽略推进");
            return self.report();
        }
        let Some(run) = self.run.as_mut() else {
            return self.report();
        };
        self.steps += 1;
        debug!(step = self.steps, "推进一步");

        if run.sender.can_send() {
            // 配置启动时已校验，组帧不会失败
            let frame = run
                .sender
                .send(&run.framer, sink)
                .expect("payload validated at start");
            run.stats.frames_sent += 1;

            match run.channel.transmit(frame, sink) {
                Transmission::Lost => {
                    run.stats.frames_lost += 1;
                    sink.log(
                        "Sender",
                        "Data frame lost in transit. \
                         Sender will retransmit after timeout (simulated).",
                    );
                }
                Transmission::Delivered(bits) => match run.framer.decode(&bits) {
                    Unframed::Corrupted => {
                        run.stats.frames_corrupted += 1;
                        sink.log(
                            "Receiver",
                            &format!("CRC check failed for frame: {bits} -> frame is CORRUPTED, discarding."),
                        );
                        sink.log(
                            "Sender",
                            "Corrupted data frame received by receiver. \
                             Sender will retransmit after timeout (simulated).",
                        );
                    }
                    Unframed::Valid { seq, data } => {
                        sink.log(
                            "Receiver",
                            &format!("Unframing frame: {bits} -> Seq: {seq}, Data: '{data}', CRC OK."),
                        );
                        let delivered_before = run.receiver.next_to_deliver();
                        if seq < delivered_before {
                            run.stats.duplicates += 1;
                        }
                        match run.receiver.on_receive(seq, &data, sink) {
                            Some(ack) => {
                                // ACK 信道可靠且瞬时，不做丢包/损坏抽取
                                sink.log("Channel", &format!("Sending ACK: ACK-{ack}"));
                                run.stats.acks_received += 1;
                                run.sender.on_ack(ack, sink);
                            }
                            None => sink.log(
                                "Sender",
                                "No valid ACK generated by receiver \
                                 (due to out-of-order or duplicate frame).",
                            ),
                        }
                        run.stats.frames_delivered +=
                            run.receiver.next_to_deliver() - delivered_before;
                    }
                },
            }
        } else if run.sender.window_base() < run.total {
            let base = run.sender.window_base();
            sink.log(
                "Sender",
                &format!(
                    "No new frames to send within window. Waiting for ACKs. Window: [{base}, {}]",
                    base + run.sender.window_size() - 1
                ),
            );
        } else {
            sink.log("Sender", "All data sent and acknowledged.");
            self.state = RunState::Finished;
        }

        // 每步之后独立做一次全局完成判定
        if run.sender.window_base() == run.total && run.receiver.next_to_deliver() == run.total {
            if self.state != RunState::Finished {
                info!(steps = self.steps, "✅ 仿真完成");
            }
            self.state = RunState::Finished;
        }

        self.report()
    }

    /// 当前公开状态报告（不推进仿真）
    pub fn report(&self) -> StepReport {
        match &self.run {
            Some(run) => StepReport {
                step: self.steps,
                state: self.state,
                sender: run.sender.snapshot(),
                receiver: run.receiver.snapshot(),
                stats: run.stats,
                finished: self.state == RunState::Finished,
            },
            None => StepReport {
                step: 0,
                state: self.state,
                sender: NodeSnapshot::default(),
                receiver: NodeSnapshot::default(),
                stats: Stats::default(),
                finished: false,
            },
        }
    }

    /// 无条件丢弃全部运行状态，回到 `Idle`。
    pub fn reset(&mut self) {
        self.state = RunState::Idle;
        self.steps = 0;
        self.run = None;
        info!("♻️  已重置");
    }
}
