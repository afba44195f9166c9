//! Interactive question loop.
//!
//! Reads one question per line. `quit`, `exit` and `q` end the session,
//! `help` lists example questions, blank lines reprompt, and end of input
//! quits. Generation failures are reported inline and the loop keeps going.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::config::Config;
use crate::generation::invoker::{GenerationInvoker, GenerationOutcome, GenerationRequest};
use crate::generation::runner::CommandRunner;
use crate::session::{banner, SessionStats};

const PROMPT: &str = "\nYour question: ";
const EXIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// What a single input line asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Help,
    Skip,
    Ask(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Command::Skip
        } else if EXIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
            Command::Quit
        } else if trimmed.eq_ignore_ascii_case("help") {
            Command::Help
        } else {
            Command::Ask(trimmed)
        }
    }
}

/// Run the interactive loop until the user quits or input ends.
pub fn run<R, I, O>(
    invoker: &GenerationInvoker<R>,
    config: &Config,
    input: &mut I,
    output: &mut O,
) -> io::Result<SessionStats>
where
    R: CommandRunner,
    I: BufRead,
    O: Write,
{
    write!(output, "{}", banner("Stanley Cup Interactive Q&A"))?;
    writeln!(output, "Powered by MLX + LoRA Adapter")?;
    writeln!(output, "Adapter: {}", config.model.adapter_path.display())?;
    writeln!(output, "\nAsk about any Stanley Cup winner from 1915 to 2025!")?;
    writeln!(output, "Type 'quit' to exit, 'help' for example questions")?;
    writeln!(output, "{}", "-".repeat(60))?;

    let mut stats = SessionStats::default();
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        let command = if input.read_line(&mut line)? == 0 {
            debug!("End of input, leaving interactive session");
            Command::Quit
        } else {
            Command::parse(&line)
        };

        match command {
            Command::Quit => {
                writeln!(output, "\nGoodbye!")?;
                break;
            }
            Command::Help => {
                writeln!(output, "\nExample questions you can ask:")?;
                for q in &config.demo.help_questions {
                    writeln!(output, "  - {q}")?;
                }
            }
            Command::Skip => {}
            Command::Ask(question) => {
                write!(output, "\nThinking...")?;
                output.flush()?;
                let request = GenerationRequest::from_config(question, config);
                let outcome = invoker.generate(&request);
                write!(output, "\r{}\r", " ".repeat(20))?;

                stats.record(&outcome);
                match outcome {
                    GenerationOutcome::Success { answer } => writeln!(output, "Answer: {answer}")?,
                    GenerationOutcome::Failure { message } => writeln!(output, "{message}")?,
                }
            }
        }
    }

    Ok(stats)
}
