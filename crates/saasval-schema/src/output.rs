//! Model output contracts
//!
//! The model is asked to answer with a JSON object matching one of two
//! shapes: a valuation estimate or a benchmark comparison. Each shape is
//! described twice, deliberately: a response schema handed to the model as
//! the output contract, and a [`ModelOutput`] implementation that walks the
//! returned payload field by field so failures carry the offending member
//! name instead of a bare decode error.
//!
//! Free-text fields (`analysis`, `benchmarkAnalysis`) may contain the
//! lightweight markers the presentation layer reinterprets (`**bold**`,
//! `##` subheadings, double-newline paragraphs); they pass through verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::Violation;

/// A structured shape the model's response must satisfy
pub trait ModelOutput: Sized + Send {
    /// JSON object schema handed to the model as the output contract
    fn response_schema() -> Value;

    /// Validate and extract a typed value from the model's payload
    ///
    /// Returns field-level violations when the payload does not satisfy the
    /// contract.
    fn from_model_value(value: &Value) -> Result<Self, Vec<Violation>>;
}

/// Valuation estimate produced by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Low end of the estimated valuation range in USD
    pub low_valuation: f64,

    /// High end of the estimated valuation range in USD
    pub high_valuation: f64,

    /// Average of the estimated valuation range in USD
    pub average_valuation: f64,

    /// Implied ARR multiple (average valuation / ARR), rounded to 2 decimals
    ///
    /// The model may omit this or return something non-numeric; the
    /// valuation flow fills it in from `average_valuation / arr` before the
    /// result leaves the pipeline.
    #[serde(rename = "impliedARRMultiple", skip_serializing_if = "Option::is_none")]
    pub implied_arr_multiple: Option<f64>,

    /// Qualitative analysis supporting the range, markers preserved verbatim
    pub analysis: String,
}

impl ModelOutput for ValuationResult {
    fn response_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "lowValuation": {
                    "type": "number",
                    "description": "Low end of the estimated valuation range in USD."
                },
                "highValuation": {
                    "type": "number",
                    "description": "High end of the estimated valuation range in USD."
                },
                "averageValuation": {
                    "type": "number",
                    "description": "Average of the estimated valuation range in USD."
                },
                "impliedARRMultiple": {
                    "type": "number",
                    "description": "Implied ARR multiple (Average Valuation / ARR)."
                },
                "analysis": {
                    "type": "string",
                    "description": "Comprehensive qualitative analysis supporting the valuation range, covering current metrics, historical trends, unit economics, operations, capital position, product engagement, and context."
                }
            },
            "required": ["lowValuation", "highValuation", "averageValuation", "analysis"]
        })
    }

    fn from_model_value(value: &Value) -> Result<Self, Vec<Violation>> {
        let obj = as_object(value)?;
        let mut violations = Vec::new();

        let low_valuation = number_field(obj, "lowValuation", &mut violations);
        let high_valuation = number_field(obj, "highValuation", &mut violations);
        let average_valuation = number_field(obj, "averageValuation", &mut violations);
        // Tolerated when absent or non-numeric; the flow computes it locally
        let implied_arr_multiple = optional_number_field(obj, "impliedARRMultiple");
        let analysis = string_field(obj, "analysis", &mut violations);

        if violations.is_empty() {
            Ok(Self {
                low_valuation: low_valuation.unwrap_or_default(),
                high_valuation: high_valuation.unwrap_or_default(),
                average_valuation: average_valuation.unwrap_or_default(),
                implied_arr_multiple,
                analysis: analysis.unwrap_or_default(),
            })
        } else {
            Err(violations)
        }
    }
}

/// Benchmark comparison produced by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Qualitative comparison against typical industry benchmarks
    pub benchmark_analysis: String,

    /// Key strengths relative to benchmarks, 2-4 short entries
    pub strength_areas: Vec<String>,

    /// Key areas for improvement relative to benchmarks, 2-4 short entries
    pub improvement_areas: Vec<String>,
}

impl ModelOutput for BenchmarkResult {
    fn response_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "benchmarkAnalysis": {
                    "type": "string",
                    "description": "Concise qualitative analysis comparing the company to typical industry benchmarks for ARR, growth, churn, gross margin, and overall valuation."
                },
                "strengthAreas": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Key strengths based on the benchmark comparison."
                },
                "improvementAreas": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Key areas for improvement based on the benchmark comparison."
                }
            },
            "required": ["benchmarkAnalysis", "strengthAreas", "improvementAreas"]
        })
    }

    fn from_model_value(value: &Value) -> Result<Self, Vec<Violation>> {
        let obj = as_object(value)?;
        let mut violations = Vec::new();

        let benchmark_analysis = string_field(obj, "benchmarkAnalysis", &mut violations);
        let strength_areas = string_list_field(obj, "strengthAreas", &mut violations);
        let improvement_areas = string_list_field(obj, "improvementAreas", &mut violations);

        if violations.is_empty() {
            Ok(Self {
                benchmark_analysis: benchmark_analysis.unwrap_or_default(),
                strength_areas: strength_areas.unwrap_or_default(),
                improvement_areas: improvement_areas.unwrap_or_default(),
            })
        } else {
            Err(violations)
        }
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, Vec<Violation>> {
    value
        .as_object()
        .ok_or_else(|| vec![Violation::new("$", "expected a JSON object")])
}

fn number_field(obj: &Map<String, Value>, field: &str, violations: &mut Vec<Violation>) -> Option<f64> {
    match obj.get(field).and_then(Value::as_f64) {
        Some(n) if n.is_finite() => Some(n),
        Some(_) => {
            violations.push(Violation::new(field, "must be a finite number"));
            None
        }
        None => {
            violations.push(Violation::new(field, "missing or not a number"));
            None
        }
    }
}

fn optional_number_field(obj: &Map<String, Value>, field: &str) -> Option<f64> {
    obj.get(field)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

fn string_field(obj: &Map<String, Value>, field: &str, violations: &mut Vec<Violation>) -> Option<String> {
    match obj.get(field).and_then(Value::as_str) {
        Some(s) => Some(s.to_string()),
        None => {
            violations.push(Violation::new(field, "missing or not a string"));
            None
        }
    }
}

fn string_list_field(
    obj: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<Vec<String>> {
    let Some(items) = obj.get(field).and_then(Value::as_array) else {
        violations.push(Violation::new(field, "missing or not an array"));
        return None;
    };
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(s) => out.push(s.to_string()),
            None => {
                violations.push(Violation::new(
                    format!("{field}[{i}]"),
                    "must be a string",
                ));
            }
        }
    }
    Some(out)
}
