//! Validation rules
//!
//! Field rules and the built-in rule tables.

pub mod field_rule;
pub mod presets;

pub use field_rule::FieldRule;
