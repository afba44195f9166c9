//! Preflight checks run before any generation.
//!
//! Both gates are advisory: they print remediation advice to stderr and
//! return a boolean, leaving the abort decision to the caller.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::generation::runner::CommandRunner;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreflightError {
    #[error("Generation tool `{command}` is not available")]
    ToolUnavailable { command: String },

    #[error("Adapter not found at {}", .path.display())]
    AdapterMissing { path: PathBuf },
}

/// Checks that the generation tool runs and the adapter exists.
pub struct AvailabilityChecker<R> {
    runner: R,
    command: String,
    check_args: Vec<String>,
}

impl<R: CommandRunner> AvailabilityChecker<R> {
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            command: config.tool.command.clone(),
            check_args: config.tool.check_args.clone(),
        }
    }

    /// Run the tool's self-check and report whether it exited with status zero.
    pub fn is_generation_tool_available(&self) -> bool {
        let available = match self.runner.run(&self.command, &self.check_args) {
            Ok(output) if output.succeeded() => true,
            Ok(output) => {
                debug!(command = self.command, status = ?output.status, "Tool self-check failed");
                false
            }
            Err(e) => {
                debug!(command = self.command, "Tool self-check could not start: {e}");
                false
            }
        };

        if available {
            debug!(command = self.command, "Generation tool available");
        } else {
            eprint!("{}", install_advice(&self.command));
        }
        available
    }

    /// Report whether `path` exists as a file or directory.
    pub fn adapter_exists(&self, path: &Path) -> bool {
        adapter_exists(path)
    }

    /// Run both gates, tool first.
    pub fn check(&self, adapter_path: &Path) -> Result<(), PreflightError> {
        if !self.is_generation_tool_available() {
            return Err(PreflightError::ToolUnavailable {
                command: self.command.clone(),
            });
        }
        if !self.adapter_exists(adapter_path) {
            return Err(PreflightError::AdapterMissing {
                path: adapter_path.to_path_buf(),
            });
        }
        Ok(())
    }
}

/// Report whether `path` exists as a file or directory, printing advice when it does not.
pub fn adapter_exists(path: &Path) -> bool {
    if path.exists() {
        debug!(adapter = %path.display(), "Adapter found");
        return true;
    }
    debug!(adapter = %path.display(), "Adapter missing");
    eprint!("{}", adapter_advice(path));
    false
}

/// Remediation printed when the generation tool cannot be run.
fn install_advice(command: &str) -> String {
    format!(
        "Error: {command} is not available (is mlx-lm installed?).\n\
         Install with: pipx install mlx-lm\n\
         \n\
         Or if you're using uv:\n  \
         uv run --with mlx-lm {command} --help\n"
    )
}

/// Remediation printed when the adapter path does not exist.
fn adapter_advice(path: &Path) -> String {
    format!(
        "Error: Adapter not found at {}\n\
         Run training first or use the pre-trained adapter.\n",
        path.display()
    )
}
