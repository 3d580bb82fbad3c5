//! Error handlers
//!
//! Provides error reporting and exit code mapping.

use crate::error::types::{FormGuardError, GuardError};
use log::error;

/// Log a form guard error
pub fn handle_error(err: &FormGuardError) {
    error!("Form guard error: {}", err);
}

/// Convert error to a process exit code (sysexits.h values)
pub fn error_to_exit_code(err: &FormGuardError) -> u8 {
    match err {
        FormGuardError::Config(_) => 78,
        FormGuardError::IoError(_) => 74,
        FormGuardError::Console(_) => 65,
        FormGuardError::Guard(GuardError::FormNotFound(_))
        | FormGuardError::Guard(GuardError::FieldNotFound { .. })
        | FormGuardError::Guard(GuardError::FieldOutsideForm { .. }) => 78,
        FormGuardError::Guard(GuardError::Dom(_)) | FormGuardError::Dom(_) => 70,
    }
}
