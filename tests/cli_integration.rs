//! Binary tests for the `calories` command

mod common;

use calorie_predictor::cli::Config;
use common::calorie_model;
use std::path::{Path, PathBuf};
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const REFERENCE_ARGS: [&str; 14] = [
    "--sex",
    "0",
    "--age",
    "30",
    "--height",
    "175",
    "--weight",
    "70",
    "--duration",
    "30",
    "--heart-rate",
    "110",
    "--body-temperature",
    "37.5",
];

/// Reference form typed one value per line
const REFERENCE_LINES: &str = "0\n30\n175\n70\n30\n110\n37.5\n";

/// Isolated config with colors off so output can be matched exactly
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    let mut config = Config::default();
    config.display.color_output = false;
    config.repl.history_file = dir.join("history").display().to_string();
    config.save(&path).unwrap();
    path
}

fn run(config: &Path, model: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calories"))
        .arg("--config")
        .arg(config)
        .arg("--model")
        .arg(model)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

/// Run `calories start` with `stdin` piped in as the typed lines
fn run_session(config: &Path, model: &Path, stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_calories"))
        .arg("--config")
        .arg(config)
        .arg("--model")
        .arg(model)
        .arg("start")
        .env_remove("RUST_LOG")
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

fn count_lines(text: &[u8], needle: &str) -> usize {
    String::from_utf8_lossy(text)
        .lines()
        .filter(|line| line.contains(needle))
        .count()
}

#[test]
fn test_predict_prints_label() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let mut args = vec!["predict"];
    args.extend(REFERENCE_ARGS);
    let output = run(&config, &model, &args);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().starts_with("Calories burnt: "), "stdout: {}", stdout);
}

#[test]
fn test_predict_json_output() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let mut args = vec!["predict", "--json"];
    args.extend(REFERENCE_ARGS);
    let output = run(&config, &model, &args);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let calories = value["calories"].as_f64().unwrap();
    assert!((calories - 239.5).abs() < 1e-3);
    assert!(value["label"].as_str().unwrap().starts_with("Calories burnt: "));
}

#[test]
fn test_predict_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let mut args = vec!["predict"];
    args.extend(REFERENCE_ARGS);
    // Replace the age value
    args[4] = "81";
    let output = run(&config, &model, &args);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter an age between 15 and 80."));
}

#[test]
fn test_predict_missing_field() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let output = run(&config, &model, &["predict", "--sex", "1"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter all the required fields"));
}

#[test]
fn test_predict_without_model() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    let mut args = vec!["predict"];
    args.extend(REFERENCE_ARGS);
    let output = run(&config, &dir.path().join("missing.safetensors"), &args);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let notices = stderr
        .lines()
        .filter(|line| line.trim() == "! Failed to load model")
        .count();
    assert_eq!(notices, 1, "stderr: {}", stderr);
}

#[test]
fn test_session_submits_after_last_field() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let output = run_session(&config, &model, REFERENCE_LINES);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Calories burnt: 239.5"), "stdout: {}", stdout);
    assert_eq!(count_lines(&output.stdout, "Calories burnt: "), 1);
}

#[test]
fn test_session_clear_restarts_form() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    // Without a restart the values after /clear would land on the wrong fields
    let stdin = format!("0\n30\n/clear\n{}", REFERENCE_LINES);
    let output = run_session(&config, &model, &stdin);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(count_lines(&output.stdout, "Form cleared"), 1, "stdout: {}", stdout);
    assert!(stdout.contains("Calories burnt: 239.5"), "stdout: {}", stdout);
    assert_eq!(count_lines(&output.stderr, "! "), 0);
}

#[test]
fn test_session_blank_line_restarts_form() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let stdin = format!("0\n30\n\n{}", REFERENCE_LINES);
    let output = run_session(&config, &model, &stdin);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(count_lines(&output.stdout, "Form cleared"), 1, "stdout: {}", stdout);
    assert!(stdout.contains("Calories burnt: 239.5"), "stdout: {}", stdout);
    assert!(!stderr.contains("Please enter all the required fields"), "stderr: {}", stderr);
}

#[test]
fn test_session_exit_command_stops_before_submit() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let stdin = format!("0\n/exit\n{}", REFERENCE_LINES);
    let output = run_session(&config, &model, &stdin);

    assert!(output.status.success());
    assert_eq!(count_lines(&output.stdout, "Calories burnt: "), 0);
    assert!(dir.path().join("history").exists());
}

#[test]
fn test_session_help_and_unknown_command_keep_values() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let stdin = "0\n/help\n30\n/bogus\n175\n70\n30\n110\n37.5\n";
    let output = run_session(&config, &model, stdin);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/clear"), "stdout: {}", stdout);
    assert!(stdout.contains("Unknown command: /bogus"), "stdout: {}", stdout);
    assert!(stdout.contains("Calories burnt: 239.5"), "stdout: {}", stdout);
}

#[test]
fn test_session_rejection_then_success() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let model = calorie_model(dir.path());

    let stdin = format!("0\n81\n175\n70\n30\n110\n37.5\n{}", REFERENCE_LINES);
    let output = run_session(&config, &model, &stdin);

    assert!(output.status.success());
    assert_eq!(
        count_lines(&output.stderr, "! Please enter an age between 15 and 80."),
        1
    );
    assert_eq!(count_lines(&output.stdout, "Calories burnt: "), 1);
}

#[test]
fn test_session_without_model() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    let stdin = format!("{}{}", REFERENCE_LINES, REFERENCE_LINES);
    let output = run_session(&config, &dir.path().join("missing.safetensors"), &stdin);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let notices = stderr
        .lines()
        .filter(|line| line.trim() == "! Failed to load model")
        .count();
    assert_eq!(notices, 1, "stderr: {}", stderr);
    assert!(stdout.contains("Model unavailable"), "stdout: {}", stdout);
    assert_eq!(count_lines(&output.stdout, "Calories burnt: "), 0);
}
