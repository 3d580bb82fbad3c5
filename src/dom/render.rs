//! Render step: writes validation results into a form surface.

use crate::dom::surface::FormSurface;
use crate::error::DomError;
use crate::guard::ValidationResult;

/// Shows or clears each field's error node. With `mark_invalid`, also
/// toggles the invalid class so a corrected field loses it.
pub fn render_results<S: FormSurface + ?Sized>(
    surface: &mut S,
    results: &[ValidationResult],
    mark_invalid: bool,
) -> Result<(), DomError> {
    for result in results {
        if result.message.is_empty() {
            surface.clear_error(&result.field_id)?;
        } else {
            surface.show_error(&result.field_id, &result.message)?;
        }

        if mark_invalid {
            surface.set_invalid(&result.field_id, !result.valid)?;
        }
    }
    Ok(())
}
