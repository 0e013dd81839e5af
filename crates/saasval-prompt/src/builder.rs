//! Fluent prompt builder
//!
//! This module provides [`PromptBuilder`], a fluent API for constructing
//! prompts as an ordered sequence of lines, each appended only when its
//! value is actually present. This keeps rendering deterministic: the call
//! sequence fixes the order, the data fixes which lines appear.

use std::fmt::Display;

/// A fluent builder for constructing prompts
///
/// `PromptBuilder` accumulates text parts and joins them on build. The
/// `opt_*` helpers emit a labeled line only when the value is present, and
/// never emit a label with an empty value.
///
/// # Examples
///
/// ```
/// use saasval_prompt::PromptBuilder;
///
/// let prompt = PromptBuilder::new()
///     .line("Company Details & Metrics:")
///     .field("ARR", 1_000_000.0)
///     .opt_field("Total Customers", None::<u64>)
///     .build();
///
/// assert!(prompt.contains("- ARR: 1000000"));
/// assert!(!prompt.contains("Total Customers"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    parts: Vec<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Add static text
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.parts.push(content.into());
        self
    }

    /// Add a line of text (newline-terminated)
    pub fn line(self, content: impl Into<String>) -> Self {
        let mut content = content.into();
        content.push('\n');
        self.text(content)
    }

    /// Add a blank line
    pub fn blank_line(self) -> Self {
        self.text("\n")
    }

    /// Add a labeled value line: `- Label: value`
    pub fn field(self, label: &str, value: impl Display) -> Self {
        self.line(format!("- {label}: {value}"))
    }

    /// Add a labeled value line with a unit suffix: `- Label: value unit`
    pub fn field_with_unit(self, label: &str, value: impl Display, unit: &str) -> Self {
        self.line(format!("- {label}: {value} {unit}"))
    }

    /// Add a labeled line only when the value is present
    pub fn opt_field(self, label: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.field(label, value),
            None => self,
        }
    }

    /// Add a labeled line with a unit suffix only when the value is present
    pub fn opt_field_with_unit(self, label: &str, value: Option<impl Display>, unit: &str) -> Self {
        match value {
            Some(value) => self.field_with_unit(label, value, unit),
            None => self,
        }
    }

    /// Add a labeled free-text line only when present and non-empty
    ///
    /// Whitespace-only text counts as absent; a label is never emitted with
    /// an empty value.
    pub fn opt_text_field(self, label: &str, value: Option<&str>) -> Self {
        match value {
            Some(text) if !text.trim().is_empty() => self.field(label, text),
            _ => self,
        }
    }

    /// Add an indented labeled line only when the value is present
    ///
    /// Used for sub-fields of a list entry (e.g. one historical year).
    pub fn opt_sub_field(self, label: &str, value: Option<impl Display>, unit: &str) -> Self {
        match value {
            Some(value) if unit.is_empty() => self.line(format!("  - {label}: {value}")),
            Some(value) => self.line(format!("  - {label}: {value} {unit}")),
            None => self,
        }
    }

    /// Add content conditionally
    pub fn when(self, condition: bool, content: impl Into<String>) -> Self {
        if condition { self.text(content) } else { self }
    }

    /// Apply a closure to the builder, for data-driven sections
    pub fn apply(self, f: impl FnOnce(Self) -> Self) -> Self {
        f(self)
    }

    /// Check if the builder is empty
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        self.parts.join("")
    }

    /// Build with trimmed trailing whitespace
    pub fn build_trimmed(self) -> String {
        self.build().trim_end().to_string()
    }
}

impl From<PromptBuilder> for String {
    fn from(builder: PromptBuilder) -> Self {
        builder.build()
    }
}
