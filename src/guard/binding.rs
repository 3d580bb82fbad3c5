//! Form guard binding
//!
//! Ties one rule table to one form and handles its submit events:
//! validate, render inline errors, and cancel the submit when any field
//! fails.

use log::{debug, warn};
use std::collections::HashMap;

use crate::config::FormConfig;
use crate::dom::{FormSurface, render_results};
use crate::error::GuardError;
use crate::guard::event::SubmitEvent;
use crate::guard::results::SubmitOutcome;
use crate::guard::validator::evaluate;
use crate::rules::FieldRule;

/// Submit-time validator bound to a single form
#[derive(Debug, Clone)]
pub struct FormGuard {
    form_id: String,
    rules: Vec<FieldRule>,
    mark_invalid: bool,
}

impl FormGuard {
    /// Binds to a form present on `surface`. Every field named by the rules
    /// must exist inside that form, so a broken page fails at setup rather
    /// than on submit.
    pub fn bind<S: FormSurface + ?Sized>(
        surface: &S,
        form: &FormConfig,
    ) -> Result<Self, GuardError> {
        if !surface.has_element(&form.form_id) {
            return Err(GuardError::FormNotFound(form.form_id.clone()));
        }

        if let Some(missing) = form
            .fields
            .iter()
            .find(|rule| !surface.has_element(&rule.field_id))
        {
            return Err(GuardError::FieldNotFound {
                form_id: form.form_id.clone(),
                field_id: missing.field_id.clone(),
            });
        }

        if let Some(stray) = form
            .fields
            .iter()
            .find(|rule| !surface.is_inside(&form.form_id, &rule.field_id))
        {
            return Err(GuardError::FieldOutsideForm {
                form_id: form.form_id.clone(),
                field_id: stray.field_id.clone(),
            });
        }

        debug!(
            "Bound guard to #{} ({} rule(s), mark_invalid={})",
            form.form_id,
            form.fields.len(),
            form.mark_invalid
        );

        Ok(Self {
            form_id: form.form_id.clone(),
            rules: form.fields.clone(),
            mark_invalid: form.mark_invalid,
        })
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Reads the current values of every ruled field from the surface.
    pub fn read_values<S: FormSurface + ?Sized>(&self, surface: &S) -> HashMap<String, String> {
        self.rules
            .iter()
            .filter_map(|rule| match surface.field_value(&rule.field_id) {
                Some(value) => Some((rule.field_id.clone(), value)),
                None => {
                    warn!(
                        "#{} has no input #{}, validating it as empty",
                        self.form_id, rule.field_id
                    );
                    None
                }
            })
            .collect()
    }

    /// Handles one submit event. On failure the event is cancelled and the
    /// first invalid field in rule order receives focus; on success the
    /// event is left untouched.
    pub fn on_submit<S: FormSurface + ?Sized>(
        &self,
        surface: &mut S,
        event: &mut SubmitEvent,
    ) -> Result<SubmitOutcome, GuardError> {
        let values = self.read_values(surface);
        let outcome = evaluate(&values, &self.rules);

        render_results(surface, &outcome.results, self.mark_invalid)?;

        if let Some(field_id) = outcome.first_invalid() {
            event.prevent_default();
            surface.focus(field_id)?;
            debug!("Blocked submit of #{}, focused #{}", self.form_id, field_id);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, DocumentSurface, SurfaceClasses};
    use crate::rules::presets::{USERNAME_TOO_SHORT, login_form, register_form};

    fn page(form: &FormConfig) -> DocumentSurface {
        let doc = Document::with_form(&form.form_id, &["username", "password"]).unwrap();
        DocumentSurface::new(doc, SurfaceClasses::default())
    }

    fn type_into(surface: &mut DocumentSurface, field_id: &str, value: &str) {
        let doc = surface.document_mut();
        let node = doc.get_element_by_id(field_id).unwrap();
        doc.set_value(node, value).unwrap();
    }

    #[test]
    fn test_bind_missing_form() {
        let surface = page(&login_form());
        let err = FormGuard::bind(&surface, &register_form()).unwrap_err();
        assert_eq!(err, GuardError::FormNotFound("register-form".to_string()));
    }

    #[test]
    fn test_bind_missing_field() {
        let form = register_form();
        let doc = Document::with_form(&form.form_id, &["username"]).unwrap();
        let surface = DocumentSurface::new(doc, SurfaceClasses::default());
        let err = FormGuard::bind(&surface, &form).unwrap_err();
        assert_eq!(
            err,
            GuardError::FieldNotFound {
                form_id: "register-form".to_string(),
                field_id: "password".to_string(),
            }
        );
    }

    #[test]
    fn test_bind_field_outside_form() {
        let form = login_form();
        let mut doc = Document::with_form(&form.form_id, &["username"]).unwrap();
        let stray = doc.create_element_with_id("input", "password").unwrap();
        let body = doc.parent(doc.get_element_by_id("login-form").unwrap()).unwrap();
        doc.append_child(body, stray).unwrap();
        let surface = DocumentSurface::new(doc, SurfaceClasses::default());

        let err = FormGuard::bind(&surface, &form).unwrap_err();
        assert_eq!(
            err,
            GuardError::FieldOutsideForm {
                form_id: "login-form".to_string(),
                field_id: "password".to_string(),
            }
        );
    }

    #[test]
    fn test_blocked_submit_focuses_username() {
        let form = register_form();
        let mut surface = page(&form);
        let guard = FormGuard::bind(&surface, &form).unwrap();
        type_into(&mut surface, "username", "abc");
        type_into(&mut surface, "password", "12345678");

        let mut event = SubmitEvent::new();
        let outcome = guard.on_submit(&mut surface, &mut event).unwrap();

        assert!(!outcome.should_submit);
        assert!(event.default_prevented());
        assert_eq!(surface.document().focused_id(), Some("username"));
        assert_eq!(surface.error_text("username"), Some(USERNAME_TOO_SHORT));
        assert_eq!(surface.error_text("password"), None);
        assert!(surface.is_marked_invalid("username"));
        assert!(!surface.is_marked_invalid("password"));
    }

    #[test]
    fn test_login_variant_does_not_mark_invalid() {
        let form = login_form();
        let mut surface = page(&form);
        let guard = FormGuard::bind(&surface, &form).unwrap();

        let mut event = SubmitEvent::new();
        guard.on_submit(&mut surface, &mut event).unwrap();

        assert!(event.default_prevented());
        assert!(!surface.is_marked_invalid("username"));
        assert_eq!(surface.error_node_count(), 2);
    }

    #[test]
    fn test_valid_submit_leaves_event_alone() {
        let form = register_form();
        let mut surface = page(&form);
        let guard = FormGuard::bind(&surface, &form).unwrap();
        type_into(&mut surface, "username", "alice");
        type_into(&mut surface, "password", "longenough1");

        let mut event = SubmitEvent::new();
        let outcome = guard.on_submit(&mut surface, &mut event).unwrap();

        assert!(outcome.should_submit);
        assert!(!event.default_prevented());
        assert_eq!(surface.document().focused(), None);
        assert_eq!(surface.error_node_count(), 0);
    }

    #[test]
    fn test_input_removed_after_bind_reads_empty_then_fails_render() {
        let form = login_form();
        let mut surface = page(&form);
        let guard = FormGuard::bind(&surface, &form).unwrap();
        let doc = surface.document_mut();
        let password = doc.get_element_by_id("password").unwrap();
        doc.remove(password).unwrap();

        let values = guard.read_values(&surface);
        assert!(!values.contains_key("password"));

        let mut event = SubmitEvent::new();
        assert!(guard.on_submit(&mut surface, &mut event).is_err());
    }
}
