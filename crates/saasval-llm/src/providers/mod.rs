//! Concrete provider implementations

mod gemini;

pub use gemini::{GeminiConfig, GeminiProvider};
