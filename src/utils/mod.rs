//! Utility modules
//!
//! Shared helpers used across the form guard.

pub mod logging;

pub use logging::setup_logging;
