//! Valuation estimation and benchmark comparison flows
//!
//! Two stateless operations composed from the schema, prompt, and model
//! layers. Benchmark comparison consumes the valuation flow's output, so
//! the prior [`ValuationResult`] is an explicit parameter: the sequential
//! dependency lives in the signature, not in caller discipline. The caller
//! serializes the two calls (valuation first) and keeps an earlier
//! valuation result even when the benchmark call later fails.

use std::sync::Arc;

use saasval_llm::{GenerationRequest, ModelProvider, generate_validated};
use saasval_prompt::{benchmark_prompt, valuation_prompt};
use saasval_schema::{BenchmarkResult, MetricsInput, ModelOutput, ValuationResult};
use saasval_utils::ModelConfig;
use tracing::instrument;

use crate::error::Result;

/// Orchestrates the two model-backed operations over a shared provider
///
/// Holds no per-request state; each invocation is independent given its
/// full input.
pub struct ValuationFlows {
    provider: Arc<dyn ModelProvider>,
    config: ModelConfig,
}

impl ValuationFlows {
    /// Create flows over a provider with default generation settings
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::with_config(provider, ModelConfig::default())
    }

    /// Create flows over a provider with explicit generation settings
    pub fn with_config(provider: Arc<dyn ModelProvider>, config: ModelConfig) -> Self {
        Self { provider, config }
    }

    /// Get the generation settings in use
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Estimate a valuation range for the given business snapshot
    ///
    /// Validates the input, assembles the valuation prompt, invokes the
    /// model, and validates the structured response. When the model omits
    /// the implied ARR multiple or returns something non-numeric, it is
    /// computed locally as `average_valuation / arr` (0 when ARR is 0);
    /// either way the multiple is rounded to 2 decimal places.
    #[instrument(skip(self, input), fields(model = %self.config.model))]
    pub async fn estimate_valuation(&self, input: &MetricsInput) -> Result<ValuationResult> {
        let prompt = valuation_prompt(input)?;
        let request = self.request(prompt, ValuationResult::response_schema());

        let mut result: ValuationResult =
            generate_validated(self.provider.as_ref(), request).await?;
        result.implied_arr_multiple = Some(implied_multiple(
            result.implied_arr_multiple,
            result.average_valuation,
            input.arr,
        ));
        Ok(result)
    }

    /// Compare the company against industry benchmarks
    ///
    /// Requires the valuation produced by a prior [`estimate_valuation`]
    /// call; the benchmark analysis is anchored on its average valuation.
    ///
    /// [`estimate_valuation`]: Self::estimate_valuation
    #[instrument(skip(self, input, valuation), fields(model = %self.config.model))]
    pub async fn compare_benchmarks(
        &self,
        input: &MetricsInput,
        valuation: &ValuationResult,
    ) -> Result<BenchmarkResult> {
        let prompt = benchmark_prompt(input, valuation)?;
        let request = self.request(prompt, BenchmarkResult::response_schema());

        Ok(generate_validated(self.provider.as_ref(), request).await?)
    }

    fn request(&self, prompt: String, schema: serde_json::Value) -> GenerationRequest {
        let mut builder = GenerationRequest::builder(&self.config.model)
            .prompt(prompt)
            .response_schema(schema)
            .max_output_tokens(self.config.max_output_tokens);
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        builder.build()
    }
}

fn implied_multiple(model_value: Option<f64>, average_valuation: f64, arr: f64) -> f64 {
    let raw = match model_value {
        Some(multiple) if multiple.is_finite() => multiple,
        _ if arr == 0.0 => 0.0,
        _ => average_valuation / arr,
    };
    round2(raw)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
