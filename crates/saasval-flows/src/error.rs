//! Error types for the orchestration flows

use saasval_llm::ModelError;
use saasval_schema::ValidationError;
use thiserror::Error;

/// Result type for flow operations
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors surfaced by the orchestration flows
///
/// Underlying failures propagate unchanged so the caller can tell a bad
/// input from a bad model response. All variants are terminal for the
/// current request; a benchmark failure never invalidates a valuation
/// result obtained earlier.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Input or output failed schema constraints
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Model invocation failed
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_passes_through() {
        let err: FlowError = ValidationError::single("churnRate", "must be between 0 and 1").into();
        assert!(err.to_string().contains("churnRate"));
    }

    #[test]
    fn test_model_error_passes_through() {
        let err: FlowError = ModelError::OutputMissing.into();
        assert!(matches!(err, FlowError::Model(ModelError::OutputMissing)));
    }
}
