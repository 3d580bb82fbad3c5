//! Error handling
//!
//! Defines error types and handling for the form guard.

pub mod handlers;
pub mod types;

pub use types::*;
