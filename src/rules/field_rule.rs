//! Field rules
//!
//! A minimum-length constraint and its error text for one named input.

use serde::Deserialize;

use crate::guard::ValidationResult;

/// Length rule bound to a single input by id
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field_id: String,
    pub min_length: usize,
    pub error_text: String,
}

impl FieldRule {
    pub fn new(field_id: &str, min_length: usize, error_text: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            min_length,
            error_text: error_text.to_string(),
        }
    }

    /// Checks a raw field value against this rule.
    ///
    /// Length is counted in characters, not bytes, and the value is not
    /// trimmed.
    pub fn check(&self, value: &str) -> ValidationResult {
        if value.chars().count() >= self.min_length {
            ValidationResult::valid(&self.field_id)
        } else {
            ValidationResult::invalid(&self.field_id, &self.error_text)
        }
    }
}
