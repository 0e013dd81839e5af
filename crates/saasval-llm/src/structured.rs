//! Typed structured-output invocation
//!
//! [`generate_validated`] is the boundary the orchestration layer calls:
//! submit {prompt, response schema}, get back a value already validated
//! against the output contract, or a typed failure. A null payload maps to
//! [`ModelError::OutputMissing`]; a payload that fails validation maps to
//! [`ModelError::OutputInvalid`] carrying the field-level violations.

use saasval_schema::ModelOutput;
use tracing::debug;

use crate::{GenerationRequest, ModelError, ModelProvider, Result};

/// Invoke the model and validate its payload against `T`'s output contract
pub async fn generate_validated<T: ModelOutput>(
    provider: &dyn ModelProvider,
    request: GenerationRequest,
) -> Result<T> {
    let model = request.model.clone();
    let response = provider.generate(request).await?;
    debug!(
        provider = provider.name(),
        model,
        total_tokens = response.usage.total(),
        "model call completed"
    );

    if response.value.is_null() {
        return Err(ModelError::OutputMissing);
    }
    T::from_model_value(&response.value).map_err(ModelError::OutputInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenerationResponse, TokenUsage};
    use async_trait::async_trait;
    use saasval_schema::ValuationResult;
    use serde_json::{Value, json};

    struct StubProvider {
        payload: Value,
    }

    #[async_trait]
    impl ModelProvider for StubProvider {
        async fn generate(&self, _request: GenerationRequest) -> Result<GenerationResponse> {
            Ok(GenerationResponse {
                value: self.payload.clone(),
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::builder("test-model")
            .prompt("...")
            .build()
    }

    #[tokio::test]
    async fn test_valid_payload_is_typed() {
        let provider = StubProvider {
            payload: json!({
                "lowValuation": 1.0,
                "highValuation": 3.0,
                "averageValuation": 2.0,
                "impliedARRMultiple": 2.0,
                "analysis": "..."
            }),
        };
        let result: ValuationResult = generate_validated(&provider, request()).await.unwrap();
        assert_eq!(result.average_valuation, 2.0);
    }

    #[tokio::test]
    async fn test_null_payload_is_output_missing() {
        let provider = StubProvider {
            payload: Value::Null,
        };
        let err = generate_validated::<ValuationResult>(&provider, request())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::OutputMissing));
    }

    #[tokio::test]
    async fn test_invalid_payload_carries_violations() {
        let provider = StubProvider {
            payload: json!({ "analysis": "..." }),
        };
        let err = generate_validated::<ValuationResult>(&provider, request())
            .await
            .unwrap_err();
        match err {
            ModelError::OutputInvalid(violations) => {
                assert!(violations.iter().any(|v| v.field == "averageValuation"));
            }
            other => panic!("expected OutputInvalid, got {other:?}"),
        }
    }
}
