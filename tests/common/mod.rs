//! Shared test doubles.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use lora_qa::generation::runner::{CommandOutput, CommandRunner};

/// Replays canned outputs in order and records every invocation.
#[derive(Default)]
pub struct FakeRunner {
    responses: RefCell<VecDeque<io::Result<CommandOutput>>>,
    pub calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl FakeRunner {
    pub fn new(responses: Vec<io::Result<CommandOutput>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn replying(outputs: Vec<CommandOutput>) -> Self {
        Self::new(outputs.into_iter().map(Ok).collect())
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(io::Error::other("no canned response left")))
    }
}
