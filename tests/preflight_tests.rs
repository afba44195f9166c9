//! Integration tests for the preflight gates.

mod common;

use std::io;

use common::FakeRunner;
use lora_qa::config::Config;
use lora_qa::generation::preflight::{adapter_exists, AvailabilityChecker, PreflightError};
use lora_qa::generation::runner::CommandOutput;

#[test]
fn test_adapter_directory_and_file_exist() {
    let dir = tempfile::tempdir().unwrap();
    let adapter_dir = dir.path().join("nhl-stanley-cups-demo");
    std::fs::create_dir(&adapter_dir).unwrap();
    let adapter_file = adapter_dir.join("adapters.safetensors");
    std::fs::write(&adapter_file, b"weights").unwrap();

    assert!(adapter_exists(&adapter_dir));
    assert!(adapter_exists(&adapter_file));
}

#[test]
fn test_missing_adapter_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("stanley-cup-best-2500");

    assert!(!adapter_exists(&missing));

    let runner = FakeRunner::replying(vec![CommandOutput::success("usage: mlx_lm.generate")]);
    let checker = AvailabilityChecker::new(&runner, &Config::default());
    assert_eq!(
        checker.check(&missing),
        Err(PreflightError::AdapterMissing {
            path: missing.clone()
        })
    );
}

#[test]
fn test_self_check_uses_help_flag() {
    let runner = FakeRunner::replying(vec![CommandOutput::success("usage")]);
    let checker = AvailabilityChecker::new(&runner, &Config::default());

    assert!(checker.is_generation_tool_available());
    assert_eq!(
        runner.calls.borrow()[0],
        ("mlx_lm.generate".to_string(), vec!["--help".to_string()])
    );
}

#[test]
fn test_command_not_found_is_unavailable() {
    let runner = FakeRunner::new(vec![Err(io::Error::from(io::ErrorKind::NotFound))]);
    let checker = AvailabilityChecker::new(&runner, &Config::default());

    assert!(!checker.is_generation_tool_available());
}

#[test]
fn test_check_stops_at_first_failed_gate() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::replying(vec![CommandOutput::failure(2, "bad flag")]);
    let checker = AvailabilityChecker::new(&runner, &Config::default());

    let err = checker.check(dir.path()).unwrap_err();
    assert!(matches!(err, PreflightError::ToolUnavailable { .. }));
    assert_eq!(runner.call_count(), 1);
}

#[test]
fn test_check_passes_when_both_gates_pass() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::replying(vec![CommandOutput::success("usage")]);
    let checker = AvailabilityChecker::new(&runner, &Config::default());

    assert_eq!(checker.check(dir.path()), Ok(()));
}
