//! Model configuration

use serde::{Deserialize, Serialize};

/// Default model used for both flows
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default generation budget; the valuation analysis can run long
pub const DEFAULT_MAX_OUTPUT_TOKENS: usize = 4096;

/// Generation settings shared by the orchestration flows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier passed to the provider
    pub model: String,

    /// Maximum tokens the model may generate per call
    pub max_output_tokens: usize,

    /// Sampling temperature; `None` uses the provider default
    pub temperature: Option<f32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: None,
        }
    }
}

impl ModelConfig {
    /// Build a config from the environment, falling back to defaults
    ///
    /// Reads the model identifier from `SAASVAL_MODEL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("SAASVAL_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        config
    }
}
