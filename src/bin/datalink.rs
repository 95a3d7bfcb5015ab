//! 数据链路层仿真 CLI
//!
//! 在不可靠信道上运行滑动窗口 + CRC 的单流发送，逐步推进直到完成
//! 或达到步数上限（协议没有自愈重传，丢包场景可能永不完成）。

use clap::Parser;
use dlsim_rs::driver::{SimConfig, StepDriver};
use dlsim_rs::journal::Journal;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "datalink", about = "数据链路层仿真：滑动窗口 ARQ + CRC + 不可靠信道")]
struct Args {
    /// 要发送的文本（每字符一帧）
    #[arg(long, default_value = "Hello")]
    payload: String,

    /// 丢包概率（0.0-1.0）
    #[arg(long, default_value_t = 0.1)]
    loss_prob: f64,

    /// 启用单比特错误注入
    #[arg(long, default_value_t = false)]
    corrupt: bool,

    /// 滑动窗口大小
    #[arg(long, default_value_t = 3)]
    window_size: u64,

    /// 序号模数（原型为 4，即 2 位序号域）
    #[arg(long, default_value_t = 4)]
    seq_modulus: u64,

    /// CRC 生成多项式位串
    #[arg(long, default_value = "1011")]
    generator: String,

    /// 每个负载字符的位宽
    #[arg(long, default_value_t = 8)]
    unit_bits: usize,

    /// 随机种子（确定性重放）
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// 最多推进多少步
    #[arg(long, default_value_t = 64)]
    max_steps: u64,

    /// 输出事件日志 JSON 文件；不填则不生成
    #[arg(long)]
    log_json: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let cfg = SimConfig {
        payload: args.payload,
        loss_probability: args.loss_prob,
        corruption_enabled: args.corrupt,
        window_size: args.window_size,
        sequence_modulus: args.seq_modulus,
        generator: args.generator,
        unit_bits: args.unit_bits,
        seed: args.seed,
    };

    let mut driver = StepDriver::default();
    let mut journal = Journal::default();
    if let Err(err) = driver.start(&cfg, &mut journal) {
        eprintln!("invalid config: {err}");
        std::process::exit(2);
    }

    let mut report = driver.report();
    for _ in 0..args.max_steps {
        report = driver.step(&mut journal);
        if report.finished {
            break;
        }
    }

    for entry in &journal.entries {
        println!("[{}] {}", entry.source, entry.message);
    }

    println!(
        "done @ step {}\n  finished={} window_base={} next_to_deliver={} delivered='{}'\n  stats: sent={} lost={} corrupted={} delivered={} acks={} duplicates={}",
        report.step,
        report.finished,
        report.sender.window_base,
        report.receiver.next_to_deliver,
        report.receiver.delivered,
        report.stats.frames_sent,
        report.stats.frames_lost,
        report.stats.frames_corrupted,
        report.stats.frames_delivered,
        report.stats.acks_received,
        report.stats.duplicates
    );

    if let Some(path) = args.log_json {
        let json = serde_json::to_string_pretty(&journal.entries).expect("serialize event log");
        fs::write(&path, json).expect("write log json");
        eprintln!("wrote event log to {}", path.display());
    }
}
