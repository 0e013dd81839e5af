//! Generation request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for a structured-output generation
///
/// Carries the assembled prompt together with the JSON object schema the
/// model's answer must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Assembled prompt text
    pub prompt: String,

    /// JSON object schema constraining the response shape
    pub response_schema: Value,

    /// Maximum tokens to generate
    pub max_output_tokens: usize,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response from a generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The structured payload the model produced
    pub value: Value,

    /// Token usage statistics
    pub usage: TokenUsage,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: usize,

    /// Number of output tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

impl GenerationRequest {
    /// Create a builder for generation requests
    pub fn builder(model: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(model)
    }
}

/// Builder for GenerationRequest
pub struct GenerationRequestBuilder {
    model: String,
    prompt: String,
    response_schema: Value,
    max_output_tokens: usize,
    temperature: Option<f32>,
}

impl GenerationRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: String::new(),
            response_schema: Value::Null,
            max_output_tokens: 4096,
            temperature: None,
        }
    }

    /// Set the prompt text
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the response schema
    pub fn response_schema(mut self, schema: Value) -> Self {
        self.response_schema = schema;
        self
    }

    /// Set the maximum output tokens
    pub fn max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the generation request
    pub fn build(self) -> GenerationRequest {
        GenerationRequest {
            model: self.model,
            prompt: self.prompt,
            response_schema: self.response_schema,
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let request = GenerationRequest::builder("gemini-2.0-flash")
            .prompt("Estimate a valuation range.")
            .response_schema(json!({"type": "object"}))
            .max_output_tokens(2048)
            .temperature(0.2)
            .build();

        assert_eq!(request.model, "gemini-2.0-flash");
        assert_eq!(request.prompt, "Estimate a valuation range.");
        assert_eq!(request.max_output_tokens, 2048);
        assert_eq!(request.temperature, Some(0.2));
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }
}
