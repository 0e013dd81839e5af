//! Prompt assembly for saasval-rs
//!
//! Turns a validated [`saasval_schema::MetricsInput`] into the text prompts
//! sent to the model. Rendering is an explicit ordered sequence of
//! conditional lines rather than a template engine: each optional field
//! appends its labeled line only when present, which keeps prompts
//! deterministic and testable.

pub mod assembler;
pub mod builder;

// Re-export main types
pub use assembler::{benchmark_prompt, valuation_prompt};
pub use builder::PromptBuilder;
