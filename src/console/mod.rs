//! Submit console
//!
//! Line-oriented front end that feeds submit attempts to guarded pages.

pub mod handler;
pub mod parser;

pub use handler::{Session, format_outcome, run_console};
pub use parser::{ConsoleCommand, parse_line};
