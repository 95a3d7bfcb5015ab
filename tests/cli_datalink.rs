use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "dlsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn clean_run_finishes_and_writes_the_event_log() {
    let dir = unique_temp_dir("clean-run");
    let out_json = dir.join("log.json");

    let output = Command::new(env!("CARGO_BIN_EXE_datalink"))
        .args([
            "--payload",
            "Hi",
            "--loss-prob",
            "0",
            "--log-json",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run datalink");

    assert!(output.status.success(), "datalink failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("finished=true"), "stdout: {stdout}");
    assert!(stdout.contains("delivered='Hi'"), "stdout: {stdout}");
    assert!(stdout.contains("[Sender]"), "stdout: {stdout}");

    let json = fs::read_to_string(&out_json).expect("read log json");
    let entries: Value = serde_json::from_str(&json).expect("parse log json");
    let entries = entries.as_array().expect("array of entries");
    assert!(!entries.is_empty());
    assert_eq!(entries[0]["source"], "Sender");
    assert!(entries.iter().all(|e| e["message"].is_string()));
}

#[test]
fn invalid_loss_probability_is_rejected_before_the_run() {
    let output = Command::new(env!("CARGO_BIN_EXE_datalink"))
        .args(["--payload", "Hi", "--loss-prob", "1.5"])
        .output()
        .expect("run datalink");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"), "stderr: {stderr}");
}

#[test]
fn total_loss_run_hits_the_step_limit_without_finishing() {
    let output = Command::new(env!("CARGO_BIN_EXE_datalink"))
        .args([
            "--payload",
            "A",
            "--loss-prob",
            "1",
            "--max-steps",
            "10",
        ])
        .output()
        .expect("run datalink");

    assert!(output.status.success(), "datalink failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("finished=false"), "stdout: {stdout}");
    assert!(stdout.contains("lost=1"), "stdout: {stdout}");
}
