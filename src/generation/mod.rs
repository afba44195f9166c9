//! Driving the external generation tool.
//!
//! - [`runner`]: Process execution port and the real `std::process` runner
//! - [`preflight`]: Tool and adapter availability checks
//! - [`invoker`]: Request/outcome types and the single-shot generation call
//! - [`extractor`]: Answer extraction between marker lines

pub mod extractor;
pub mod invoker;
pub mod preflight;
pub mod runner;
