//! Gemini provider implementation
//!
//! Implements the `ModelProvider` trait against the Google Generative
//! Language API, using `responseMimeType`/`responseSchema` so the model
//! answers with JSON constrained to the requested output shape.
//! See: https://ai.google.dev/api/generate-content
//!
//! One attempt per call: no retries, no backoff. The only resilience
//! measure is a client-level request timeout.

use crate::{
    GenerationRequest, GenerationResponse, ModelError, ModelProvider, Result, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use saasval_schema::Violation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the Generative Language API
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `GEMINI_API_KEY`. Optionally reads the base
    /// URL from `GEMINI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ModelError::Configuration("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        let api_base = std::env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Gemini provider
///
/// Supports the Gemini model family (gemini-2.0-flash, gemini-1.5-pro, ...)
/// through the `generateContent` endpoint with structured JSON output.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with custom configuration
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new Gemini provider with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    /// Create a provider from environment variables
    ///
    /// Reads the API key from `GEMINI_API_KEY` and optionally the base URL
    /// from `GEMINI_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?;
        Self::with_config(config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        debug!("Sending request to Gemini API at {}", self.config.api_base);

        let gemini_request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.api_base, request.model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => ModelError::AuthenticationFailed,
                429 => ModelError::RateLimitExceeded(error_text),
                400 => ModelError::InvalidRequest(error_text),
                404 => ModelError::ModelNotFound(request.model),
                _ => ModelError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            ModelError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let (value, usage) = extract_payload(gemini_response)?;

        debug!(
            "Received response - tokens: {}/{}",
            usage.input_tokens, usage.output_tokens
        );

        Ok(GenerationResponse { value, usage })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// Gemini-specific request types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_output_tokens: usize,
    response_mime_type: String,
    response_schema: Value,
}

// ============================================================================
// Gemini-specific response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

/// Extract the structured payload from a Gemini response
///
/// An empty candidate list or empty text is `OutputMissing`; text that is
/// not valid JSON is `OutputInvalid` (the payload exists but cannot satisfy
/// any output schema).
fn extract_payload(response: GeminiResponse) -> Result<(Value, TokenUsage)> {
    let usage = response
        .usage_metadata
        .map(|meta| TokenUsage {
            input_tokens: meta.prompt_token_count,
            output_tokens: meta.candidates_token_count,
        })
        .unwrap_or_default();

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ModelError::OutputMissing);
    }

    let value: Value = serde_json::from_str(&text).map_err(|e| {
        ModelError::OutputInvalid(vec![Violation::new(
            "$",
            format!("response was not valid JSON: {e}"),
        )])
    })?;

    if value.is_null() {
        return Err(ModelError::OutputMissing);
    }

    Ok((value, usage))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with_text(text: &str) -> GeminiResponse {
        GeminiResponse {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some(text.to_string()),
                    }],
                }),
            }],
            usage_metadata: Some(UsageMetadata {
                prompt_token_count: 100,
                candidates_token_count: 50,
            }),
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = GeminiProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.config().api_key, "test-key");
        assert_eq!(
            provider.config().api_base,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(provider.config().timeout_secs, 120);
    }

    #[test]
    fn test_provider_with_custom_config() {
        let config = GeminiConfig::new("test-key")
            .with_api_base("http://localhost:8000/v1beta")
            .with_timeout(30);

        let provider = GeminiProvider::with_config(config).unwrap();
        assert_eq!(provider.config().api_base, "http://localhost:8000/v1beta");
        assert_eq!(provider.config().timeout_secs, 30);
    }

    #[test]
    fn test_config_from_env_roundtrip() {
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
        }
        assert!(GeminiConfig::from_env().is_err());

        unsafe {
            std::env::set_var("GEMINI_API_KEY", "test-key-from-env");
            std::env::set_var("GEMINI_API_BASE", "https://custom.example.com/v1beta");
        }
        let config = GeminiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-key-from-env");
        assert_eq!(config.api_base, "https://custom.example.com/v1beta");

        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
            std::env::remove_var("GEMINI_API_BASE");
        }
    }

    #[test]
    fn test_extract_valid_payload() {
        let (value, usage) =
            extract_payload(response_with_text(r#"{"lowValuation": 1000000}"#)).unwrap();
        assert_eq!(value["lowValuation"], 1_000_000);
        assert_eq!(usage.input_tokens, 100);
        assert_eq!(usage.output_tokens, 50);
    }

    #[test]
    fn test_extract_empty_candidates_is_missing() {
        let response = GeminiResponse {
            candidates: vec![],
            usage_metadata: None,
        };
        assert!(matches!(
            extract_payload(response),
            Err(ModelError::OutputMissing)
        ));
    }

    #[test]
    fn test_extract_empty_text_is_missing() {
        assert!(matches!(
            extract_payload(response_with_text("  ")),
            Err(ModelError::OutputMissing)
        ));
    }

    #[test]
    fn test_extract_json_null_is_missing() {
        assert!(matches!(
            extract_payload(response_with_text("null")),
            Err(ModelError::OutputMissing)
        ));
    }

    #[test]
    fn test_extract_non_json_is_invalid() {
        match extract_payload(response_with_text("I cannot help with that.")) {
            Err(ModelError::OutputInvalid(violations)) => {
                assert_eq!(violations[0].field, "$");
            }
            other => panic!("expected OutputInvalid, got {other:?}"),
        }
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: "prompt".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: Some(0.2),
                max_output_tokens: 4096,
                response_mime_type: "application/json".to_string(),
                response_schema: json!({"type": "object"}),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 4096);
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "object");
    }
}
