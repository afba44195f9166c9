//! User-facing question sessions.
//!
//! - [`repl`]: Interactive read loop over any `BufRead`/`Write` pair
//! - [`showcase`]: Built-in example questions

pub mod repl;
pub mod showcase;

use crate::generation::invoker::GenerationOutcome;

/// Counts of questions asked during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub asked: usize,
    pub failed: usize,
}

impl SessionStats {
    pub fn record(&mut self, outcome: &GenerationOutcome) {
        self.asked += 1;
        if !outcome.is_success() {
            self.failed += 1;
        }
    }
}

/// A title framed by `=` rules, ending with a blank line.
pub(crate) fn banner(title: &str) -> String {
    let rule = "=".repeat(60);
    format!("{rule}\n{title}\n{rule}\n\n")
}
