//! Error types
//!
//! Defines domain-specific error types for each module of the form guard.
//! A field failing its length rule is not an error; it is an invalid
//! `ValidationResult`.

use std::fmt;
use std::io;

/// Document (UI state) errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    ElementNotFound(String),
    DuplicateId(String),
    Detached(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::ElementNotFound(id) => write!(f, "Element not found: #{}", id),
            DomError::DuplicateId(id) => write!(f, "Duplicate element id: #{}", id),
            DomError::Detached(what) => write!(f, "Node is not attached: {}", what),
        }
    }
}

impl std::error::Error for DomError {}

/// Guard binding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    FormNotFound(String),
    FieldNotFound { form_id: String, field_id: String },
    FieldOutsideForm { form_id: String, field_id: String },
    Dom(DomError),
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::FormNotFound(id) => write!(f, "Form not found: #{}", id),
            GuardError::FieldNotFound { form_id, field_id } => {
                write!(f, "Field #{} not found for form #{}", field_id, form_id)
            }
            GuardError::FieldOutsideForm { form_id, field_id } => {
                write!(f, "Field #{} is not inside form #{}", field_id, form_id)
            }
            GuardError::Dom(e) => write!(f, "Document error: {}", e),
        }
    }
}

impl std::error::Error for GuardError {}

impl From<DomError> for GuardError {
    fn from(error: DomError) -> Self {
        GuardError::Dom(error)
    }
}

/// Submit console errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    Malformed(String),
    UnknownForm(String),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Malformed(line) => write!(f, "Malformed submission: {}", line),
            ConsoleError::UnknownForm(id) => write!(f, "Unknown form: {}", id),
        }
    }
}

impl std::error::Error for ConsoleError {}

/// General error that encompasses all error types
#[derive(Debug)]
pub enum FormGuardError {
    Guard(GuardError),
    Dom(DomError),
    Console(ConsoleError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for FormGuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormGuardError::Guard(e) => write!(f, "Guard error: {}", e),
            FormGuardError::Dom(e) => write!(f, "Document error: {}", e),
            FormGuardError::Console(e) => write!(f, "Console error: {}", e),
            FormGuardError::Config(e) => write!(f, "Configuration error: {}", e),
            FormGuardError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FormGuardError {}

impl From<GuardError> for FormGuardError {
    fn from(error: GuardError) -> Self {
        FormGuardError::Guard(error)
    }
}

impl From<DomError> for FormGuardError {
    fn from(error: DomError) -> Self {
        FormGuardError::Dom(error)
    }
}

impl From<ConsoleError> for FormGuardError {
    fn from(error: ConsoleError) -> Self {
        FormGuardError::Console(error)
    }
}

impl From<config::ConfigError> for FormGuardError {
    fn from(error: config::ConfigError) -> Self {
        FormGuardError::Config(error)
    }
}

impl From<io::Error> for FormGuardError {
    fn from(error: io::Error) -> Self {
        FormGuardError::IoError(error)
    }
}
