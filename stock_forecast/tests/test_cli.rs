use std::io::Write;
use std::process::{Command, Output, Stdio};

const BARS: &str = "symbol,timestamp,open,high,low,close,volume\n\
                    AAPL,2020-07-01,1,1,1,10,1\n\
                    AAPL,2020-07-02,1,1,1,11,1\n\
                    AAPL,2020-07-06,1,1,1,12,1\n";

fn predict(args: &[&str], stdin: &str) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_predict"));
    command.args(args);
    run_with_stdin(command, stdin)
}

fn run_with_stdin(mut command: Command, stdin: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_predict_writes_json_to_stdout() {
    let output = predict(&["1 week", "--uncertainty-samples", "50"], BARS);
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 7);
    assert_eq!(records[0]["ds"], "2020-07-07");
}

#[test]
fn test_predict_with_smoothing_flags() {
    let output = predict(
        &["1 month", "--smooth", "--smooth-window", "3", "--smooth-history", "2"],
        BARS,
    );
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 30);
}

#[test]
fn test_verbose_reports_fit_on_stderr() {
    let mut command = Command::new(env!("CARGO_BIN_EXE_predict"));
    command
        .args(["1 week", "--verbose", "--uncertainty-samples", "10"])
        .env_remove("RUST_LOG");
    let output = run_with_stdin(command, BARS);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Fitted"), "stderr: {}", stderr);

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 7);
}

#[test]
fn test_quiet_by_default() {
    let mut command = Command::new(env!("CARGO_BIN_EXE_predict"));
    command
        .args(["1 week", "--uncertainty-samples", "10"])
        .env_remove("RUST_LOG");
    let output = run_with_stdin(command, BARS);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Fitted"));
}

#[test]
fn test_unknown_period_uses_default_horizon() {
    let output = predict(&["fortnight", "--uncertainty-samples", "0"], BARS);
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 30);
}

#[test]
fn test_missing_close_fails_without_output() {
    let output = predict(&["1 week"], "symbol,timestamp,open\nAAPL,2020-07-01,1\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("close"));
}

#[test]
fn test_input_file_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bars.csv");
    std::fs::write(&path, BARS).unwrap();

    let output = predict(&["1 week", "--input", path.to_str().unwrap()], "");
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 7);
}
