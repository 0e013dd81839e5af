//! Shared utilities for saasval-rs
//!
//! Common functionality used across the saasval-rs workspace: logging setup
//! and model configuration defaults.

pub mod config;
pub mod logging;

pub use config::ModelConfig;
pub use logging::init_tracing;
