//! Guard result types
//!
//! Defines result structures returned by validation and submit handling.

/// Outcome for one field after one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub field_id: String,
    pub valid: bool,
    /// Error text when invalid; empty means "clear any shown error".
    pub message: String,
}

impl ValidationResult {
    pub fn valid(field_id: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(field_id: &str, message: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            valid: false,
            message: message.to_string(),
        }
    }
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub results: Vec<ValidationResult>,
    pub should_submit: bool,
}

impl SubmitOutcome {
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let should_submit = results.iter().all(|r| r.valid);
        Self {
            results,
            should_submit,
        }
    }

    /// First invalid field in rule order; this is the one that gets focus.
    pub fn first_invalid(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|r| !r.valid)
            .map(|r| r.field_id.as_str())
    }

    pub fn invalid(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.valid)
    }
}
