//! Schema definitions for the SaaS valuation pipeline
//!
//! This crate declares the exact shape, types, and validation rules for the
//! data flowing through the pipeline:
//!
//! - [`MetricsInput`] - the business snapshot a user submits, with
//!   field-level validation of every documented range
//! - [`ValuationResult`] / [`BenchmarkResult`] - the structured results
//!   expected back from the model, with response schemas and payload
//!   validation ([`ModelOutput`])
//! - [`FIELD_METADATA`] - static labels/descriptions for form rendering
//!
//! Both the client-side form boundary and the orchestration layer validate
//! through the same functions, so constraints cannot drift apart.

pub mod coerce;
pub mod error;
pub mod metadata;
pub mod metrics;
pub mod output;

// Re-export main types
pub use error::{ValidationError, Violation};
pub use metadata::{FIELD_METADATA, FieldMeta, field_meta};
pub use metrics::{HistoricalYear, MAX_HISTORICAL_YEARS, MetricsInput};
pub use output::{BenchmarkResult, ModelOutput, ValuationResult};
