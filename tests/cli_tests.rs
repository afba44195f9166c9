//! CLI integration tests: exit codes and mode selection of the `lora-qa` binary.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use lora_qa::config::Config;
use tempfile::TempDir;

struct CliRun {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

/// A temp dir holding an adapter directory and a config pointing at it.
struct Workspace {
    dir: TempDir,
    config_path: PathBuf,
}

impl Workspace {
    /// `command` and `check_args` describe the stand-in generation tool.
    fn new(command: &str, check_args: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let adapter = dir.path().join("adapter");
        std::fs::create_dir(&adapter).unwrap();

        let mut config = Config::default();
        config.model.adapter_path = adapter;
        config.tool.command = command.to_string();
        config.tool.check_args = check_args.iter().map(|a| a.to_string()).collect();

        let config_path = dir.path().join("lora-qa.json");
        std::fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        Self { dir, config_path }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) -> CliRun {
        let output = Command::new(env!("CARGO_BIN_EXE_lora-qa"))
            .arg("-c")
            .arg(&self.config_path)
            .args(args)
            .stdin(Stdio::null())
            .env_remove("RUST_LOG")
            .output()
            .unwrap();

        CliRun {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

#[test]
fn test_unavailable_tool_exits_1() {
    let ws = Workspace::new("false", &[]);
    let run = ws.run(&["Who won in 2019?"]);

    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("false is not available"));
    assert!(!run.stdout.contains("Question:"));
}

#[test]
fn test_missing_adapter_exits_1() {
    let ws = Workspace::new("true", &[]);
    let missing = ws.path().join("nope");
    let run = ws.run(&["--adapter-path", missing.to_str().unwrap(), "Who won in 2019?"]);

    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("Adapter not found"));
}

#[test]
fn test_generation_failure_exits_1() {
    // `sh -c true` passes the self-check; `sh --model …` then fails.
    let ws = Workspace::new("sh", &["-c", "true"]);
    let run = ws.run(&["Who won in 2019?"]);

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("Question: Who won in 2019?"));
    assert!(run.stdout.contains("Error: "));
}

#[test]
fn test_successful_question_exits_0() {
    let ws = Workspace::new("true", &[]);
    let run = ws.run(&["Who", "won", "in", "2019?"]);

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Question: Who won in 2019?"));
    assert!(run.stdout.contains("Answer: "));
}

#[test]
fn test_examples_exit_0_even_when_examples_fail() {
    let ws = Workspace::new("sh", &["-c", "true"]);
    let run = ws.run(&["-e"]);

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Example 1: "));
    assert!(run.stdout.contains("Error: "));
}

#[test]
fn test_examples_take_precedence_over_interactive_and_question() {
    let ws = Workspace::new("true", &[]);
    let run = ws.run(&["-e", "-i", "Who won in 2019?"]);

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Example 1: "));
    assert!(!run.stdout.contains("Your question: "));
    assert!(!run.stdout.contains("Question: Who won in 2019?"));
}

#[test]
fn test_interactive_takes_precedence_over_question() {
    let ws = Workspace::new("true", &[]);
    let run = ws.run(&["-i", "Who won in 2019?"]);

    // stdin is empty, so the session ends right away.
    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Your question: "));
    assert!(run.stdout.contains("Goodbye!"));
    assert!(!run.stdout.contains("Question: Who won in 2019?"));
}

#[test]
fn test_no_question_starts_interactive_session() {
    let ws = Workspace::new("true", &[]);
    let run = ws.run(&[]);

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Stanley Cup Interactive Q&A"));
}
