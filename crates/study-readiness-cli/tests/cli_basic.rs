//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a temporary log and config.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("log.csv")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("cargo");
        cmd.args(["run", "-q", "-p", "study-readiness-cli", "--"])
            .args(args)
            .arg("--log-file")
            .arg(self.log_path())
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        self.run_with_input(args, "")
    }

    fn run_with_input(&self, args: &[&str], input: &str) -> (String, String, i32) {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute CLI command");

        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        let output = child.wait_with_output().unwrap();

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        (stdout, stderr, code)
    }

    fn log_session(&self, arith_time: &str) {
        let (_, stderr, code) = self.run(&[
            "log",
            "--arith-time",
            arith_time,
            "--arith-errors",
            "1",
            "--reaction-time",
            "0.41",
            "--stroop",
            "0.8",
            "--two-back",
            "0.875",
            "--word-pair",
            "0.75",
            "--kss",
            "3",
            "--caffeine",
            "2h",
            "--sleep-quality",
            "4",
            "--stress",
            "3",
        ]);
        assert_eq!(code, 0, "log failed: {stderr}");
    }
}

fn line_count(path: &Path) -> usize {
    std::fs::read_to_string(path).unwrap().lines().count()
}

#[test]
fn test_log_writes_header_and_row() {
    let ws = Workspace::new();
    ws.log_session("40.5");
    assert_eq!(line_count(&ws.log_path()), 2);

    let content = std::fs::read_to_string(ws.log_path()).unwrap();
    assert!(content.starts_with("timestamp,T_arith,E_arith,RT,stroop,two_back,word_pair,KSS,caffeine_min,sleep_q,stress"));
    assert!(content.contains(",120,4,3"));
}

#[test]
fn test_log_prompts_for_missing_checkins() {
    let ws = Workspace::new();
    let (stdout, stderr, code) = ws.run_with_input(
        &[
            "log",
            "--arith-time",
            "38",
            "--arith-errors",
            "0",
            "--reaction-time",
            "0.39",
            "--stroop",
            "1",
            "--two-back",
            "0.75",
            "--word-pair",
            "1",
            "--json",
        ],
        "12\nnope\nnone\n0\n4\n",
    );
    assert_eq!(code, 0, "log failed: {stderr}");
    assert!(stdout.contains("Manual Check-ins:"));

    let json_start = stdout.find('{').unwrap();
    let record: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(record["KSS"], 9);
    assert_eq!(record["caffeine_min"], 2160);
    assert_eq!(record["sleep_q"], 1);
    assert_eq!(record["stress"], 4);
}

#[test]
fn test_log_rejects_out_of_range_scores() {
    let ws = Workspace::new();
    let (_, stderr, code) = ws.run(&[
        "log",
        "--arith-time",
        "38",
        "--arith-errors",
        "0",
        "--reaction-time",
        "0.05",
        "--stroop",
        "1",
        "--two-back",
        "0.75",
        "--word-pair",
        "1",
        "--kss",
        "3",
        "--caffeine",
        "30",
        "--sleep-quality",
        "3",
        "--stress",
        "3",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("RT"));
    assert!(!ws.log_path().exists());
}

#[test]
fn test_evaluate_without_log_is_a_notice() {
    let ws = Workspace::new();
    let (stdout, _, code) = ws.run(&["evaluate"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No log to evaluate."));
}

#[test]
fn test_evaluate_needs_two_sessions() {
    let ws = Workspace::new();
    ws.log_session("40");
    let (stdout, _, code) = ws.run(&["evaluate"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Not enough history"));
}

#[test]
fn test_evaluate_report_and_json() {
    let ws = Workspace::new();
    ws.log_session("40");
    ws.log_session("40");
    ws.log_session("40");

    let (stdout, _, code) = ws.run(&["evaluate"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Study Readiness Evaluation"));
    assert!(stdout.contains("Cognitive Processing:"));
    assert!(stdout.contains("Memory & Executive Function:"));
    assert!(stdout.contains("Well-Being & Regulation:"));

    let (stdout, _, code) = ws.run(&["evaluate", "--json"]);
    assert_eq!(code, 0);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["baseline_sessions"], 2);
    let overall = result["overall_score"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&overall));
    assert!(!result["cognitive"]["advisories"].as_array().unwrap().is_empty());
}

#[test]
fn test_show_and_chart() {
    let ws = Workspace::new();
    ws.log_session("40");
    ws.log_session("52");
    ws.log_session("45");

    let (stdout, _, code) = ws.run(&["show", "2", "--json"]);
    assert_eq!(code, 0);
    let records: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["T_arith"], 45.0);

    let (stdout, _, code) = ws.run(&["show"]);
    assert_eq!(code, 0);
    assert!(stdout.lines().next().unwrap().contains("T_arith"));
    assert_eq!(stdout.lines().count(), 4);

    let (stdout, _, code) = ws.run(&["chart", "--sessions", "3"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Last 3 Session(s):"));
    assert!(stdout.contains("word_pair"));
}

#[test]
fn test_clear_removes_log() {
    let ws = Workspace::new();
    ws.log_session("40");
    let (stdout, _, code) = ws.run(&["clear"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Log file cleared"));
    assert!(!ws.log_path().exists());

    let (stdout, _, code) = ws.run(&["clear"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("does not exist"));
}

#[test]
fn test_config_set_and_get() {
    let ws = Workspace::new();
    let (stdout, _, code) = ws.run(&["config", "set", "display.show_count", "7"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ok"));

    let (stdout, _, code) = ws.run(&["config", "get", "display.show_count"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "7");

    let (_, _, code) = ws.run(&["config", "set", "display.unknown", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_completions() {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "study-readiness-cli", "--", "completions", "bash"])
        .output()
        .expect("Failed to execute CLI command");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("study-readiness"));
}
