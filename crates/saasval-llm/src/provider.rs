//! Model provider trait definition

use crate::{GenerationRequest, GenerationResponse, Result};
use async_trait::async_trait;

/// Trait for generative model providers
///
/// Implementations submit an assembled prompt plus a response schema to a
/// hosted model and return the structured payload. A single attempt, no
/// retries or backoff: failures are terminal for the current request and
/// the caller decides what to surface.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generate a structured response from the model
    ///
    /// # Arguments
    ///
    /// * `request` - The prompt, response schema, and generation parameters
    ///
    /// # Returns
    ///
    /// The structured payload and token usage, or a typed failure.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}
