//! Form surface
//!
//! The UI operations the guard needs, and their implementation over a
//! `Document`.

use log::debug;

use crate::dom::document::{Document, NodeId};
use crate::error::DomError;

pub const DEFAULT_ERROR_CLASS: &str = "error-message-js";
pub const DEFAULT_INVALID_CLASS: &str = "is-invalid";

/// What a bound form can do to the page
pub trait FormSurface {
    fn has_element(&self, id: &str) -> bool;

    /// True when element `id` sits inside element `container_id`.
    fn is_inside(&self, container_id: &str, id: &str) -> bool;

    /// Current value of an input, `None` if the input does not exist.
    fn field_value(&self, field_id: &str) -> Option<String>;

    /// Ensures exactly one error node directly follows the input and that
    /// it holds `message`.
    fn show_error(&mut self, field_id: &str, message: &str) -> Result<(), DomError>;

    /// Removes any error node directly following the input.
    fn clear_error(&mut self, field_id: &str) -> Result<(), DomError>;

    fn set_invalid(&mut self, field_id: &str, invalid: bool) -> Result<(), DomError>;

    fn focus(&mut self, field_id: &str) -> Result<(), DomError>;
}

/// Class names written into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceClasses {
    pub error_class: String,
    pub invalid_class: String,
}

impl Default for SurfaceClasses {
    fn default() -> Self {
        Self {
            error_class: DEFAULT_ERROR_CLASS.to_string(),
            invalid_class: DEFAULT_INVALID_CLASS.to_string(),
        }
    }
}

/// A `Document` plus the class names used to render errors into it
#[derive(Debug, Clone)]
pub struct DocumentSurface {
    document: Document,
    classes: SurfaceClasses,
}

impl DocumentSurface {
    pub fn new(document: Document, classes: SurfaceClasses) -> Self {
        Self { document, classes }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn classes(&self) -> &SurfaceClasses {
        &self.classes
    }

    fn input(&self, field_id: &str) -> Result<NodeId, DomError> {
        self.document
            .get_element_by_id(field_id)
            .ok_or_else(|| DomError::ElementNotFound(field_id.to_string()))
    }

    /// Error nodes directly following `input`, nearest first.
    fn error_run(&self, input: NodeId) -> Vec<NodeId> {
        let mut run = Vec::new();
        let mut next = self.document.next_element_sibling(input);
        while let Some(node) = next {
            if !self.document.has_class(node, &self.classes.error_class) {
                break;
            }
            run.push(node);
            next = self.document.next_element_sibling(node);
        }
        run
    }

    /// Text of the error node following the input, if one is shown.
    pub fn error_text(&self, field_id: &str) -> Option<&str> {
        let input = self.document.get_element_by_id(field_id)?;
        let node = self.error_run(input).into_iter().next()?;
        self.document.text(node)
    }

    pub fn is_marked_invalid(&self, field_id: &str) -> bool {
        self.document
            .get_element_by_id(field_id)
            .is_some_and(|node| self.document.has_class(node, &self.classes.invalid_class))
    }

    pub fn error_node_count(&self) -> usize {
        self.document
            .elements_with_class(&self.classes.error_class)
            .len()
    }
}

impl FormSurface for DocumentSurface {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn is_inside(&self, container_id: &str, id: &str) -> bool {
        match (
            self.document.get_element_by_id(container_id),
            self.document.get_element_by_id(id),
        ) {
            (Some(container), Some(node)) => self.document.contains(container, node),
            _ => false,
        }
    }

    fn field_value(&self, field_id: &str) -> Option<String> {
        let input = self.document.get_element_by_id(field_id)?;
        self.document.value(input).map(str::to_string)
    }

    fn show_error(&mut self, field_id: &str, message: &str) -> Result<(), DomError> {
        let input = self.input(field_id)?;
        let run = self.error_run(input);

        match run.split_first() {
            Some((&first, extra)) => {
                self.document.set_text(first, message)?;
                for &node in extra {
                    self.document.remove(node)?;
                }
            }
            None => {
                let node = self.document.create_element("div");
                self.document.add_class(node, &self.classes.error_class)?;
                self.document.set_text(node, message)?;
                self.document.insert_after(input, node)?;
                debug!("Inserted error node after #{}", field_id);
            }
        }
        Ok(())
    }

    fn clear_error(&mut self, field_id: &str) -> Result<(), DomError> {
        let input = self.input(field_id)?;
        for node in self.error_run(input) {
            self.document.remove(node)?;
        }
        Ok(())
    }

    fn set_invalid(&mut self, field_id: &str, invalid: bool) -> Result<(), DomError> {
        let input = self.input(field_id)?;
        if invalid {
            self.document.add_class(input, &self.classes.invalid_class)
        } else {
            self.document.remove_class(input, &self.classes.invalid_class)
        }
    }

    fn focus(&mut self, field_id: &str) -> Result<(), DomError> {
        let input = self.input(field_id)?;
        self.document.focus(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> DocumentSurface {
        let doc = Document::with_form("register-form", &["username", "password"]).unwrap();
        DocumentSurface::new(doc, SurfaceClasses::default())
    }

    #[test]
    fn test_show_error_inserts_after_input() {
        let mut s = surface();
        s.show_error("username", "too short").unwrap();

        let doc = s.document();
        let username = doc.get_element_by_id("username").unwrap();
        let node = doc.next_element_sibling(username).unwrap();
        assert!(doc.has_class(node, DEFAULT_ERROR_CLASS));
        assert_eq!(doc.text(node), Some("too short"));
        assert_eq!(
            doc.next_element_sibling(node),
            doc.get_element_by_id("password")
        );
    }

    #[test]
    fn test_show_error_twice_keeps_one_node() {
        let mut s = surface();
        s.show_error("username", "first").unwrap();
        s.show_error("username", "second").unwrap();
        assert_eq!(s.error_node_count(), 1);
        assert_eq!(s.error_text("username"), Some("second"));
    }

    #[test]
    fn test_show_error_collapses_stray_nodes() {
        let mut s = surface();
        let username = s.document().get_element_by_id("username").unwrap();
        for _ in 0..2 {
            let doc = s.document_mut();
            let stray = doc.create_element("div");
            doc.add_class(stray, DEFAULT_ERROR_CLASS).unwrap();
            doc.insert_after(username, stray).unwrap();
        }
        s.show_error("username", "msg").unwrap();
        assert_eq!(s.error_node_count(), 1);
    }

    #[test]
    fn test_clear_error_only_touches_own_field() {
        let mut s = surface();
        s.show_error("username", "u").unwrap();
        s.show_error("password", "p").unwrap();
        s.clear_error("username").unwrap();

        assert_eq!(s.error_text("username"), None);
        assert_eq!(s.error_text("password"), Some("p"));
        s.clear_error("username").unwrap();
        assert_eq!(s.error_node_count(), 1);
    }

    #[test]
    fn test_show_clear_cycles_do_not_grow_document() {
        let mut s = surface();
        s.show_error("username", "msg").unwrap();
        s.clear_error("username").unwrap();
        let slots = s.document().slot_count();

        for _ in 0..10_000 {
            s.show_error("username", "msg").unwrap();
            s.clear_error("username").unwrap();
        }
        assert_eq!(s.document().slot_count(), slots);
        assert_eq!(s.error_node_count(), 0);
    }

    #[test]
    fn test_invalid_class_toggle() {
        let mut s = surface();
        s.set_invalid("password", true).unwrap();
        assert!(s.is_marked_invalid("password"));
        s.set_invalid("password", false).unwrap();
        assert!(!s.is_marked_invalid("password"));
    }

    #[test]
    fn test_missing_field() {
        let mut s = surface();
        assert_eq!(s.field_value("email"), None);
        assert_eq!(
            s.focus("email"),
            Err(DomError::ElementNotFound("email".to_string()))
        );
    }
}
