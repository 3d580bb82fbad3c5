//! Guarded page
//!
//! One document holding one form, with its guard bound once at load and
//! kept for the page's lifetime.

use log::info;
use std::collections::HashMap;

use crate::config::FormConfig;
use crate::dom::{Document, DocumentSurface, SurfaceClasses};
use crate::error::{DomError, FormGuardError, GuardError};
use crate::guard::{FormGuard, SubmitEvent, SubmitOutcome};

#[derive(Debug, Clone)]
pub struct Page {
    surface: DocumentSurface,
    guard: FormGuard,
    last_event: Option<SubmitEvent>,
}

impl Page {
    /// Builds the page the form expects and binds its guard.
    pub fn load(form: &FormConfig, classes: SurfaceClasses) -> Result<Self, FormGuardError> {
        let document = Document::with_form(&form.form_id, &form.field_ids())?;
        let surface = DocumentSurface::new(document, classes);
        let guard = FormGuard::bind(&surface, form)?;

        info!(
            "Loaded page for #{} with fields {:?}",
            form.form_id,
            form.field_ids()
        );

        Ok(Self {
            surface,
            guard,
            last_event: None,
        })
    }

    pub fn form_id(&self) -> &str {
        self.guard.form_id()
    }

    pub fn surface(&self) -> &DocumentSurface {
        &self.surface
    }

    pub fn document(&self) -> &Document {
        self.surface.document()
    }

    /// The event from the most recent submit attempt.
    pub fn last_event(&self) -> Option<&SubmitEvent> {
        self.last_event.as_ref()
    }

    /// Types `value` into an input, replacing its contents.
    pub fn fill(&mut self, field_id: &str, value: &str) -> Result<(), DomError> {
        let document = self.surface.document_mut();
        let input = document
            .get_element_by_id(field_id)
            .ok_or_else(|| DomError::ElementNotFound(field_id.to_string()))?;
        document.set_value(input, value)
    }

    /// Presses submit with whatever the inputs currently hold.
    pub fn submit(&mut self) -> Result<SubmitOutcome, GuardError> {
        let mut event = SubmitEvent::new();
        let outcome = self.guard.on_submit(&mut self.surface, &mut event)?;
        self.last_event = Some(event);
        Ok(outcome)
    }

    /// Replaces every ruled input with the submitted value and submits.
    /// A ruled field absent from `values` is submitted empty.
    pub fn submit_values(
        &mut self,
        values: &HashMap<String, String>,
    ) -> Result<SubmitOutcome, FormGuardError> {
        let field_ids: Vec<String> = self
            .guard
            .rules()
            .iter()
            .map(|r| r.field_id.clone())
            .collect();
        for field_id in &field_ids {
            let value = values.get(field_id).map(String::as_str).unwrap_or("");
            self.fill(field_id, value)?;
        }
        Ok(self.submit()?)
    }
}
