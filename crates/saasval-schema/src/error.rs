//! Validation error types

use serde::Serialize;
use thiserror::Error;

/// A single field-level schema violation
///
/// Carries the wire name of the offending field (e.g. `churnRate`,
/// `historicalFinancials[2].customerCount`) and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Wire name of the field that failed validation
    pub field: String,

    /// Human-readable reason for the failure
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input or output failed schema constraints
///
/// Collects every violation found in a single pass rather than stopping at
/// the first, so a form-rendering collaborator can surface all problems at
/// once.
#[derive(Debug, Clone, Error)]
#[error("validation failed: {}", .violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    /// Field-level violations, in declaration order
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Create a validation error from a list of violations
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Create a validation error with a single violation
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, message)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_violations() {
        let err = ValidationError::new(vec![
            Violation::new("arr", "must not be negative"),
            Violation::new("churnRate", "must be between 0 and 1"),
        ]);
        let text = err.to_string();
        assert!(text.contains("arr: must not be negative"));
        assert!(text.contains("churnRate: must be between 0 and 1"));
    }

    #[test]
    fn test_single() {
        let err = ValidationError::single("grossMargin", "must be between 0 and 1");
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "grossMargin");
    }
}
