//! Generation orchestrator: turns a question into one `mlx_lm.generate` run.
//!
//! The invoker:
//! 1. Builds the tool's argument vector from a [`GenerationRequest`]
//! 2. Runs the tool once and waits for it to exit (no timeout, no retry)
//! 3. Maps a non-zero exit to [`GenerationOutcome::Failure`]
//! 4. Hands successful stdout to the [`ResponseExtractor`]

use std::path::PathBuf;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::generation::extractor::ResponseExtractor;
use crate::generation::runner::{CommandOutput, CommandRunner};

/// A generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Question text passed as `--prompt`.
    pub prompt: String,

    /// Base model identifier.
    pub model_id: String,

    /// LoRA adapter path.
    pub adapter_path: PathBuf,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 = greedy).
    pub temperature: f64,
}

impl GenerationRequest {
    /// Build a request for `prompt` using the configured model and sampling settings.
    pub fn from_config(prompt: impl Into<String>, config: &Config) -> Self {
        Self {
            prompt: prompt.into(),
            model_id: config.model.model_id.clone(),
            adapter_path: config.model.adapter_path.clone(),
            max_tokens: config.generation.max_tokens,
            temperature: config.generation.temperature,
        }
    }

    /// Arguments for the generation tool, in the order it documents them.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "--model".to_string(),
            self.model_id.clone(),
            "--adapter-path".to_string(),
            self.adapter_path.to_string_lossy().into_owned(),
            "--prompt".to_string(),
            self.prompt.clone(),
            "--max-tokens".to_string(),
            self.max_tokens.to_string(),
            "--temp".to_string(),
            self.temperature.to_string(),
        ]
    }
}

/// Result of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The tool exited cleanly; `answer` may be empty.
    Success { answer: String },
    /// The tool failed or could not be started.
    Failure { message: String },
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success { .. })
    }

    /// Convert into a `Result` of answer or failure message.
    pub fn into_result(self) -> Result<String, String> {
        match self {
            GenerationOutcome::Success { answer } => Ok(answer),
            GenerationOutcome::Failure { message } => Err(message),
        }
    }
}

/// Runs the external generation tool.
pub struct GenerationInvoker<R> {
    runner: R,
    command: String,
    extractor: ResponseExtractor,
}

impl<R: CommandRunner> GenerationInvoker<R> {
    /// Create an invoker for the tool described by `config`.
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            command: config.tool.command.clone(),
            extractor: ResponseExtractor::new(config.tool.boundary_marker.clone()),
        }
    }

    /// Run a single generation and extract the answer.
    pub fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let request_id = Uuid::new_v4().to_string();
        info!(
            request_id,
            model = request.model_id,
            adapter = %request.adapter_path.display(),
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "Starting generation"
        );

        let output = match self.runner.run(&self.command, &request.to_args()) {
            Ok(output) => output,
            Err(e) => {
                warn!(request_id, command = self.command, "Failed to start generation tool: {e}");
                return GenerationOutcome::Failure {
                    message: format!("Error: failed to run {}: {e}", self.command),
                };
            }
        };

        if !output.succeeded() {
            warn!(request_id, status = ?output.status, "Generation tool exited with an error");
            return GenerationOutcome::Failure {
                message: failure_message(&output),
            };
        }

        let (answer, kind) = self.extractor.extract_with_kind(&output.stdout);
        debug!(
            request_id,
            marker = self.extractor.marker(),
            extraction = ?kind,
            answer_len = answer.len(),
            "Extracted answer"
        );
        info!(request_id, "Generation complete");

        GenerationOutcome::Success { answer }
    }
}

/// `Error: ` followed by the tool's stderr, or by the exit status when stderr is empty.
fn failure_message(output: &CommandOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return format!("Error: {stderr}");
    }
    match output.status {
        Some(code) => format!("Error: generation tool exited with status {code}"),
        None => "Error: generation tool was terminated by a signal".to_string(),
    }
}
