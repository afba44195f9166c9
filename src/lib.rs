//! lora-qa: Stanley Cup question answering on a LoRA-adapted model.
//!
//! Shells out to `mlx_lm.generate` with a base model and a LoRA adapter,
//! then pulls the generated answer out of the tool's stdout.
//!   preflight (tool + adapter) → invoke tool → extract answer

pub mod config;
pub mod generation;
pub mod session;
