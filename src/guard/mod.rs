//! Form guard
//!
//! Pure validation plus the submit handler that renders its results.

pub mod binding;
pub mod event;
pub mod results;
pub mod validator;

pub use binding::FormGuard;
pub use event::SubmitEvent;
pub use results::{SubmitOutcome, ValidationResult};
pub use validator::{evaluate, validate};
