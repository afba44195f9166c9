//! Answer extraction from the generation tool's stdout.
//!
//! `mlx_lm.generate` prints the generated text between two marker lines,
//! surrounded by log noise:
//!
//! ```text
//! ==========
//! Prediction: Florida Panthers
//! ==========
//! Prompt: 12 tokens, 98.1 tokens-per-sec
//! ```
//!
//! The first marker opens the capture region and the second closes it.
//! A missing closing marker runs the capture to end of input. Output
//! without any marker is returned whole, trimmed.

use crate::config::BOUNDARY_MARKER;

/// Which path the extractor took for a given output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Both markers were seen.
    Delimited,
    /// The opening marker was seen but never closed.
    Unterminated,
    /// No marker at all; the whole output was used.
    Fallback,
}

/// Scanner state while walking the output line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside,
    Done,
}

/// Extracts the answer between marker lines.
#[derive(Debug, Clone)]
pub struct ResponseExtractor {
    marker: String,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new(BOUNDARY_MARKER)
    }
}

impl ResponseExtractor {
    /// Create an extractor for the given marker. A line containing the
    /// marker anywhere counts as a marker line, so longer runs of `=` match too.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Return the answer text from raw tool output.
    pub fn extract(&self, raw_output: &str) -> String {
        self.extract_with_kind(raw_output).0
    }

    /// Like [`extract`](Self::extract), also reporting which path was taken.
    pub fn extract_with_kind(&self, raw_output: &str) -> (String, Extraction) {
        let mut state = ScanState::Outside;
        let mut captured: Vec<&str> = Vec::new();

        for line in raw_output.split('\n') {
            let is_marker = line.contains(self.marker.as_str());
            match state {
                ScanState::Outside if is_marker => state = ScanState::Inside,
                ScanState::Outside => {}
                ScanState::Inside if is_marker => {
                    state = ScanState::Done;
                    break;
                }
                ScanState::Inside => captured.push(line),
                ScanState::Done => break,
            }
        }

        match state {
            ScanState::Outside => (raw_output.trim().to_string(), Extraction::Fallback),
            ScanState::Inside => (captured.join("\n").trim().to_string(), Extraction::Unterminated),
            ScanState::Done => (captured.join("\n").trim().to_string(), Extraction::Delimited),
        }
    }
}
