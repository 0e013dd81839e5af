//! Orchestration flows for saasval-rs
//!
//! Wires the schema, prompt, and model layers into the two operations the
//! workspace exists for: [`ValuationFlows::estimate_valuation`] and
//! [`ValuationFlows::compare_benchmarks`]. Input validation happens before
//! any model call, so a rejected input never consumes tokens.

pub mod error;
pub mod flows;

pub use error::{FlowError, Result};
pub use flows::ValuationFlows;
