//! lora-qa command-line entry point.
//!
//! Runs a single question, the built-in examples, or an interactive
//! session against `mlx_lm.generate` with a LoRA adapter.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use lora_qa::config::{Cli, Config};
use lora_qa::generation::invoker::{GenerationInvoker, GenerationOutcome, GenerationRequest};
use lora_qa::generation::preflight::AvailabilityChecker;
use lora_qa::generation::runner::SystemRunner;
use lora_qa::session::{repl, showcase};

fn main() -> anyhow::Result<ExitCode> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging. Logs go to stderr; stdout carries answers.
    let filter = if cli.verbose { "lora_qa=debug" } else { "lora_qa=warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    debug!("lora-qa v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration and layer the CLI on top.
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .apply_cli(&cli);
    config.validate()?;

    info!(
        model = config.model.model_id,
        adapter = %config.model.adapter_path.display(),
        max_tokens = config.generation.max_tokens,
        temperature = config.generation.temperature,
        "Configuration loaded"
    );

    // Preflight: both gates print their own remediation advice.
    let checker = AvailabilityChecker::new(SystemRunner, &config);
    if let Err(e) = checker.check(&config.model.adapter_path) {
        debug!("Preflight failed: {e}");
        return Ok(ExitCode::from(1));
    }

    let invoker = GenerationInvoker::new(SystemRunner, &config);
    let mut stdout = io::stdout().lock();

    if cli.examples {
        showcase::run(&invoker, &config, &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let question = match cli.question_text() {
        Some(q) if !cli.interactive => q,
        _ => {
            let mut stdin = io::stdin().lock();
            repl::run(&invoker, &config, &mut stdin, &mut stdout)?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    writeln!(stdout, "Question: {question}")?;
    match invoker.generate(&GenerationRequest::from_config(question, &config)) {
        GenerationOutcome::Success { answer } => {
            writeln!(stdout, "Answer: {answer}")?;
            Ok(ExitCode::SUCCESS)
        }
        GenerationOutcome::Failure { message } => {
            writeln!(stdout, "{message}")?;
            Ok(ExitCode::from(1))
        }
    }
}
