//! Runs the built-in example questions one after another.

use std::io::{self, Write};

use tracing::info;

use crate::config::Config;
use crate::generation::invoker::{GenerationInvoker, GenerationOutcome, GenerationRequest};
use crate::generation::runner::CommandRunner;
use crate::session::{banner, SessionStats};

/// Ask every configured showcase question and print each answer or error.
pub fn run<R, O>(
    invoker: &GenerationInvoker<R>,
    config: &Config,
    output: &mut O,
) -> io::Result<SessionStats>
where
    R: CommandRunner,
    O: Write,
{
    write!(output, "\n{}", banner("MLX LoRA Demo - Stanley Cup Question Answering"))?;

    let mut stats = SessionStats::default();
    for (i, question) in config.demo.showcase_questions.iter().enumerate() {
        writeln!(output, "\nExample {}: {question}", i + 1)?;
        writeln!(output, "{}", "-".repeat(50))?;
        output.flush()?;

        let outcome = invoker.generate(&GenerationRequest::from_config(question.as_str(), config));
        stats.record(&outcome);
        match outcome {
            GenerationOutcome::Success { answer } => writeln!(output, "Answer: {answer}")?,
            GenerationOutcome::Failure { message } => writeln!(output, "{message}")?,
        }
    }

    info!(asked = stats.asked, failed = stats.failed, "Examples finished");
    Ok(stats)
}
