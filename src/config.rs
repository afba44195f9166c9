//! Runtime configuration for lora-qa.
//!
//! Configuration can be loaded from a JSON file or constructed programmatically.
//! CLI flags are layered on top of the loaded file, and the result is handed
//! read-only to every component.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default base model served through MLX.
pub const BASE_MODEL: &str = "mlx-community/Mistral-7B-Instruct-v0.3-4bit";

/// Adapter trained for the demo.
pub const DEFAULT_ADAPTER: &str = "adapters/nhl-stanley-cups-demo";

/// Longer-trained adapter with the best answers so far.
pub const BEST_ADAPTER: &str = "adapters/stanley-cup-best-2500";

pub const DEFAULT_MAX_TOKENS: u32 = 50;
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Line marker `mlx_lm.generate` prints around the generated text.
pub const BOUNDARY_MARKER: &str = "==========";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lora-qa",
    version,
    about = "MLX LoRA Demo - Stanley Cup Question Answering",
    after_help = "Examples:\n  lora-qa \"Who won in 2019?\"\n  lora-qa --interactive\n  lora-qa --adapter-path adapters/stanley-cup-best-2500 \"Who won in 2024?\""
)]
pub struct Cli {
    /// Question about Stanley Cup history.
    #[arg(value_name = "QUESTION")]
    pub question: Vec<String>,

    /// Interactive Q&A mode.
    #[arg(short, long)]
    pub interactive: bool,

    /// Run the built-in example queries.
    #[arg(short, long)]
    pub examples: bool,

    /// Path to the LoRA adapter (default: adapters/nhl-stanley-cups-demo).
    #[arg(long, value_name = "PATH", conflicts_with = "best")]
    pub adapter_path: Option<PathBuf>,

    /// Use the best trained adapter (adapters/stanley-cup-best-2500).
    #[arg(long)]
    pub best: bool,

    /// Maximum tokens to generate (default: 50).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (default: 0.1).
    #[arg(long, value_parser = parse_temperature)]
    pub temperature: Option<f64>,

    /// Override the base model identifier.
    #[arg(long, value_name = "ID")]
    pub model: Option<String>,

    /// Path to configuration file (JSON).
    #[arg(short, long, default_value = "lora-qa.json")]
    pub config: PathBuf,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The positional words joined into one question, if any were given.
    pub fn question_text(&self) -> Option<String> {
        let joined = self.question.join(" ");
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

fn parse_temperature(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("temperature must be a non-negative number, got {s}"));
    }
    Ok(value)
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model and adapter selection.
    pub model: ModelConfig,

    /// Sampling settings passed to the generation tool.
    pub generation: GenerationConfig,

    /// External generation tool.
    pub tool: ToolConfig,

    /// Canned questions for the showcase and the REPL help.
    pub demo: DemoConfig,
}

/// Model-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base model identifier handed to `--model`.
    pub model_id: String,

    /// LoRA adapter path handed to `--adapter-path`.
    pub adapter_path: PathBuf,

    /// Adapter selected by `--best`.
    pub best_adapter_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: BASE_MODEL.to_string(),
            adapter_path: PathBuf::from(DEFAULT_ADAPTER),
            best_adapter_path: PathBuf::from(BEST_ADAPTER),
        }
    }
}

/// Sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Sampling temperature (0.0 = greedy).
    pub temperature: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// How to reach the external generation tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program name or path, resolved through `PATH`.
    pub command: String,

    /// Arguments for the self-check invocation.
    pub check_args: Vec<String>,

    /// Marker line delimiting the generated text in the tool's stdout.
    pub boundary_marker: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            command: "mlx_lm.generate".to_string(),
            check_args: vec!["--help".to_string()],
            boundary_marker: BOUNDARY_MARKER.to_string(),
        }
    }
}

/// Example questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Questions run by `--examples`.
    pub showcase_questions: Vec<String>,

    /// Questions listed by `help` in interactive mode.
    pub help_questions: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let owned = |qs: &[&str]| -> Vec<String> { qs.iter().map(|q| q.to_string()).collect() };
        Self {
            showcase_questions: owned(&[
                "Who won the Stanley Cup in 2024?",
                "Which team won the Stanley Cup in 1967?",
                "How many times have the Montreal Canadiens won the Stanley Cup?",
                "What was the series score when the Avalanche won in 2022?",
            ]),
            help_questions: owned(&[
                "Who won the Stanley Cup in 2024?",
                "How many times have the Red Wings won?",
                "Which team won in 1967?",
                "What was the series score in 2022?",
                "Who did the Avalanche beat in 2001?",
            ]),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let config: Config =
                serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Layer command-line overrides on top of this configuration.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(model) = &cli.model {
            self.model.model_id = model.clone();
        }
        if cli.best {
            self.model.adapter_path = self.model.best_adapter_path.clone();
        }
        if let Some(path) = &cli.adapter_path {
            self.model.adapter_path = path.clone();
        }
        if let Some(max_tokens) = cli.max_tokens {
            self.generation.max_tokens = max_tokens;
        }
        if let Some(temperature) = cli.temperature {
            self.generation.temperature = temperature;
        }
        self
    }

    /// Reject values the generation tool cannot accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.model_id.trim().is_empty() {
            return Err(ConfigError::Invalid("model id is empty".into()));
        }
        // The tool receives the adapter path as a UTF-8 argument.
        if self.model.adapter_path.to_str().is_none() {
            return Err(ConfigError::Invalid(format!(
                "adapter path is not valid UTF-8: {}",
                self.model.adapter_path.display()
            )));
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be positive".into()));
        }
        let temp = self.generation.temperature;
        if !temp.is_finite() || temp < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "temperature must be non-negative, got {temp}"
            )));
        }
        if self.tool.command.trim().is_empty() {
            return Err(ConfigError::Invalid("tool command is empty".into()));
        }
        if self.tool.boundary_marker.is_empty() {
            return Err(ConfigError::Invalid("boundary marker is empty".into()));
        }
        Ok(())
    }
}
