//! Model invocation wrapper for saasval-rs
//!
//! Provider-agnostic abstraction for structured-output generation:
//!
//! - [`GenerationRequest`] / [`GenerationResponse`] - prompt plus response
//!   schema in, structured payload plus token usage out
//! - [`ModelProvider`] - the provider seam
//! - [`generate_validated`] - submit and validate against a typed output
//!   contract in one call
//! - [`providers::GeminiProvider`] - the concrete HTTP implementation
//!
//! Every call is a single attempt; there are no retries or backoff. The
//! only resilience measure is a per-request timeout on the HTTP client.

pub mod error;
pub mod provider;
pub mod providers;
pub mod request;
pub mod structured;

// Re-export main types
pub use error::{ModelError, Result};
pub use provider::ModelProvider;
pub use request::{GenerationRequest, GenerationResponse, TokenUsage};
pub use structured::generate_validated;
