//! Form validator
//!
//! Pure length checks over submitted values. Nothing here touches the
//! page, so the same inputs always give the same results.

use log::debug;
use std::collections::HashMap;

use crate::guard::results::{SubmitOutcome, ValidationResult};
use crate::rules::FieldRule;

/// Checks every rule in declaration order. A missing value counts as the
/// empty string.
pub fn validate(values: &HashMap<String, String>, rules: &[FieldRule]) -> Vec<ValidationResult> {
    rules
        .iter()
        .map(|rule| {
            let value = values.get(&rule.field_id).map(String::as_str).unwrap_or("");
            rule.check(value)
        })
        .collect()
}

/// Validates and decides whether the submission may proceed.
pub fn evaluate(values: &HashMap<String, String>, rules: &[FieldRule]) -> SubmitOutcome {
    let outcome = SubmitOutcome::from_results(validate(values, rules));
    debug!(
        "Validated {} field(s): should_submit={} first_invalid={:?}",
        rules.len(),
        outcome.should_submit,
        outcome.first_invalid()
    );
    outcome
}
