pub mod config;
pub mod console;
pub mod dom;
pub mod error;
pub mod guard;
pub mod page;
pub mod rules;
pub mod utils;

pub use config::{FormConfig, GuardConfig};
pub use guard::{FormGuard, SubmitEvent, SubmitOutcome, ValidationResult, evaluate, validate};
pub use page::Page;
pub use rules::FieldRule;
