//! In-memory document
//!
//! A small element tree standing in for the browser DOM. It holds all UI
//! state the guard touches: element ids, classes, text, input values and
//! the focused element.

use std::collections::HashMap;

use crate::error::DomError;

/// Handle to an element in a `Document` arena. The generation makes a
/// handle to a removed element stale even after its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    ids: HashMap<String, NodeId>,
    root: NodeId,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with a `body` root.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(Element::new("body")),
            }],
            free: Vec::new(),
            ids: HashMap::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            focused: None,
        }
    }

    /// Builds `<form id=form_id>` with one text input per field and a
    /// trailing submit button, attached to the root.
    pub fn with_form(form_id: &str, field_ids: &[&str]) -> Result<Self, DomError> {
        let mut doc = Self::new();
        let form = doc.create_element_with_id("form", form_id)?;
        doc.append_child(doc.root, form)?;

        for field_id in field_ids {
            let input = doc.create_element_with_id("input", field_id)?;
            doc.append_child(form, input)?;
        }

        let button = doc.create_element("button");
        doc.set_text(button, "Submit")?;
        doc.append_child(form, button)?;

        Ok(doc)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.slots
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut Element, DomError> {
        self.slots
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.element.as_mut())
            .ok_or_else(|| DomError::Detached(format!("node {}", node.index)))
    }

    fn live(&self, node: NodeId) -> Result<&Element, DomError> {
        self.element(node)
            .ok_or_else(|| DomError::Detached(format!("node {}", node.index)))
    }

    /// Creates a detached element, reusing the slot of a removed one when
    /// there is one.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.element = Some(Element::new(tag));
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    element: Some(Element::new(tag)),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Number of element slots allocated, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Creates a detached element carrying a page-unique id.
    pub fn create_element_with_id(&mut self, tag: &str, id: &str) -> Result<NodeId, DomError> {
        if self.id_in_use(id) {
            return Err(DomError::DuplicateId(id.to_string()));
        }
        let node = self.create_element(tag);
        self.element_mut(node)?.id = Some(id.to_string());
        self.ids.insert(id.to_string(), node);
        Ok(node)
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(|el| el.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    /// True when `node` is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.root {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// True when `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return self.element(n).is_some();
            }
            current = self.parent(n);
        }
        false
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insertable(child)?;
        self.live(parent)?;
        self.element_mut(parent)?.children.push(child);
        self.element_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Inserts `node` as the sibling immediately after `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<(), DomError> {
        self.check_insertable(node)?;
        let parent = self
            .parent(reference)
            .ok_or_else(|| DomError::Detached(format!("node {}", reference.index)))?;
        let siblings = &mut self.element_mut(parent)?.children;
        let position = siblings
            .iter()
            .position(|&n| n == reference)
            .ok_or_else(|| DomError::Detached(format!("node {}", reference.index)))?;
        siblings.insert(position + 1, node);
        self.element_mut(node)?.parent = Some(parent);
        Ok(())
    }

    fn check_insertable(&self, node: NodeId) -> Result<(), DomError> {
        let el = self.live(node)?;
        if node == self.root || el.parent.is_some() {
            return Err(DomError::Detached(format!(
                "node {} cannot be inserted twice",
                node.index
            )));
        }
        Ok(())
    }

    /// Removes `node` and its subtree from the document.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        if node == self.root {
            return Err(DomError::Detached("root cannot be removed".into()));
        }
        let parent = self.live(node)?.parent;
        if let Some(parent) = parent {
            self.element_mut(parent)?.children.retain(|&n| n != node);
        }

        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            let Some(el) = self.slots[n.index].element.take() else {
                continue;
            };
            let slot = &mut self.slots[n.index];
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(n.index);

            if let Some(id) = &el.id {
                self.ids.remove(id);
            }
            if self.focused == Some(n) {
                self.focused = None;
            }
            stack.extend(el.children);
        }
        Ok(())
    }

    /// Finds an attached element by id.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids
            .get(id)
            .copied()
            .filter(|&node| self.is_attached(node))
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let position = siblings.iter().position(|&n| n == node)?;
        siblings.get(position + 1).copied()
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.element_mut(node)?;
        if !el.has_class(class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.element_mut(node)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|el| el.has_class(class))
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.element_mut(node)?.text = text.to_string();
        Ok(())
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.text.as_str())
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        self.element_mut(node)?.value = value.to_string();
        Ok(())
    }

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.value.as_str())
    }

    pub fn focus(&mut self, node: NodeId) -> Result<(), DomError> {
        if !self.is_attached(node) {
            return Err(DomError::Detached(format!("node {}", node.index)));
        }
        self.focused = Some(node);
        Ok(())
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Id of the focused element, if it has one.
    pub fn focused_id(&self) -> Option<&str> {
        self.focused
            .and_then(|node| self.element(node))
            .and_then(|el| el.id.as_deref())
    }

    /// Attached elements carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.has_class(node, class) {
                found.push(node);
            }
            stack.extend(self.children(node).iter().rev());
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_form_layout() {
        let doc = Document::with_form("login-form", &["username", "password"]).unwrap();
        let form = doc.get_element_by_id("login-form").unwrap();
        let username = doc.get_element_by_id("username").unwrap();
        let password = doc.get_element_by_id("password").unwrap();

        assert_eq!(doc.parent(username), Some(form));
        assert_eq!(doc.next_element_sibling(username), Some(password));
        assert_eq!(doc.children(form).len(), 3);
        assert_eq!(doc.element(username).unwrap().tag, "input");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Document::with_form("username", &["username"]);
        assert_eq!(
            result.unwrap_err(),
            DomError::DuplicateId("username".to_string())
        );
    }

    #[test]
    fn test_insert_after_and_remove() {
        let mut doc = Document::with_form("f", &["a", "b"]).unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        let b = doc.get_element_by_id("b").unwrap();

        let note = doc.create_element("div");
        doc.insert_after(a, note).unwrap();
        assert_eq!(doc.next_element_sibling(a), Some(note));
        assert_eq!(doc.next_element_sibling(note), Some(b));

        doc.remove(note).unwrap();
        assert_eq!(doc.next_element_sibling(a), Some(b));
        assert!(doc.element(note).is_none());
    }

    #[test]
    fn test_insert_twice_rejected() {
        let mut doc = Document::with_form("f", &["a"]).unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        let note = doc.create_element("div");
        doc.insert_after(a, note).unwrap();
        assert!(doc.insert_after(a, note).is_err());
    }

    #[test]
    fn test_remove_clears_focus() {
        let mut doc = Document::with_form("f", &["a"]).unwrap();
        let form = doc.get_element_by_id("f").unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        doc.focus(a).unwrap();
        assert_eq!(doc.focused_id(), Some("a"));

        doc.remove(form).unwrap();
        assert_eq!(doc.focused(), None);
        assert_eq!(doc.get_element_by_id("a"), None);
    }

    #[test]
    fn test_detached_lookup_and_focus() {
        let mut doc = Document::new();
        let orphan = doc.create_element_with_id("input", "orphan").unwrap();
        assert_eq!(doc.get_element_by_id("orphan"), None);
        assert!(doc.focus(orphan).is_err());
    }

    #[test]
    fn test_classes() {
        let mut doc = Document::with_form("f", &["a", "b"]).unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        let b = doc.get_element_by_id("b").unwrap();
        doc.add_class(b, "x").unwrap();
        doc.add_class(a, "x").unwrap();
        doc.add_class(a, "x").unwrap();
        assert_eq!(doc.element(a).unwrap().classes, vec!["x".to_string()]);
        assert_eq!(doc.elements_with_class("x"), vec![a, b]);

        doc.remove_class(a, "x").unwrap();
        assert!(!doc.has_class(a, "x"));
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut doc = Document::with_form("f", &["a"]).unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        let before = doc.slot_count();

        for _ in 0..100 {
            let note = doc.create_element("div");
            doc.insert_after(a, note).unwrap();
            doc.remove(note).unwrap();
        }
        assert_eq!(doc.slot_count(), before + 1);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut doc = Document::with_form("f", &["a"]).unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        let old = doc.create_element("div");
        doc.insert_after(a, old).unwrap();
        doc.remove(old).unwrap();

        let new = doc.create_element("span");
        assert_ne!(old, new);
        assert!(doc.element(old).is_none());
        assert_eq!(doc.element(new).unwrap().tag, "span");
        assert!(doc.set_text(old, "x").is_err());
    }

    #[test]
    fn test_removed_id_can_be_reused() {
        let mut doc = Document::with_form("f", &["a"]).unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        doc.remove(a).unwrap();
        assert_eq!(doc.get_element_by_id("a"), None);

        let form = doc.get_element_by_id("f").unwrap();
        let again = doc.create_element_with_id("input", "a").unwrap();
        doc.append_child(form, again).unwrap();
        assert_eq!(doc.get_element_by_id("a"), Some(again));
    }

    #[test]
    fn test_contains() {
        let mut doc = Document::with_form("f", &["a"]).unwrap();
        let form = doc.get_element_by_id("f").unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        let outside = doc.create_element_with_id("input", "b").unwrap();
        let root = doc.root;
        doc.append_child(root, outside).unwrap();

        assert!(doc.contains(form, a));
        assert!(doc.contains(form, form));
        assert!(!doc.contains(form, outside));
        assert!(!doc.contains(a, form));
    }
}
