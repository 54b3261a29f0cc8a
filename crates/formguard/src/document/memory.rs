//! In-process document.

use std::collections::BTreeMap;

use super::{Document, ElementRef, EventKind, FormEvent, ListenerId};
use crate::selector::{Matchable, Selector};

/// An element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Class list.
    pub classes: Vec<String>,
    /// Attributes, including `id` and `type`.
    pub attrs: BTreeMap<String, String>,
    /// Live control value.
    pub value: String,
    /// Text content.
    pub text: String,
    parent: Option<ElementRef>,
}

impl Element {
    /// Creates an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Creates an `<input type="...">`.
    pub fn input(input_type: &str) -> Self {
        Self::new("input").attr("type", input_type)
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Adds a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Sets the control value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns the parent element, if attached below one.
    pub const fn parent(&self) -> Option<ElementRef> {
        self.parent
    }
}

impl Matchable for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct Listener {
    id: ListenerId,
    targets: Vec<ElementRef>,
    kind: EventKind,
}

/// A document held entirely in memory.
///
/// Elements live in an arena in insertion order, which is also document
/// order. User actions (`click`, `key_up`) return the events the registered
/// listeners would receive; the caller hands them to the controller.
///
/// # Example
///
/// ```
/// use formguard::document::{Document, Element, EventKind, MemoryDocument};
///
/// let mut doc = MemoryDocument::new();
/// let form = doc.append(None, Element::new("form"));
/// let submit = doc.append(Some(form), Element::new("button").class("submit"));
///
/// let listener = doc.listen(&[submit], EventKind::Click);
/// assert_eq!(doc.click(submit).len(), 1);
///
/// doc.unlisten(listener);
/// assert!(doc.click(submit).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl MemoryDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element below `parent` (or at the root).
    ///
    /// A parent that is not already in the document is ignored and the
    /// element lands at the root.
    pub fn append(&mut self, parent: Option<ElementRef>, mut element: Element) -> ElementRef {
        element.parent = parent.filter(|parent| parent.index() < self.nodes.len());
        self.nodes.push(element);
        ElementRef::new(self.nodes.len() - 1)
    }

    /// Appends a `<label for="...">` below `parent`.
    pub fn label(&mut self, parent: Option<ElementRef>, for_id: &str, text: &str) -> ElementRef {
        self.append(parent, Element::new("label").attr("for", for_id).text(text))
    }

    /// Returns an element.
    pub fn element(&self, element: ElementRef) -> Option<&Element> {
        self.nodes.get(element.index())
    }

    /// Returns the element with the given `id` attribute.
    pub fn by_id(&self, id: &str) -> Option<ElementRef> {
        self.nodes
            .iter()
            .position(|node| node.attribute("id") == Some(id))
            .map(ElementRef::new)
    }

    /// Replaces the value of a control.
    pub fn set_value(&mut self, element: ElementRef, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.value = value.into();
        }
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Simulates activating an element.
    pub fn click(&self, element: ElementRef) -> Vec<FormEvent> {
        self.events(element, EventKind::Click)
    }

    /// Simulates typing: the control takes `value`, then a key is released.
    pub fn key_up(&mut self, element: ElementRef, value: impl Into<String>) -> Vec<FormEvent> {
        self.set_value(element, value);
        self.events(element, EventKind::KeyUp)
    }

    fn events(&self, element: ElementRef, kind: EventKind) -> Vec<FormEvent> {
        self.listeners
            .iter()
            .filter(|l| l.kind == kind && l.targets.contains(&element))
            .map(|l| FormEvent::new(l.id, element, kind))
            .collect()
    }

    fn is_descendant(&self, element: ElementRef, ancestor: ElementRef) -> bool {
        let mut current = self.element(element).and_then(Element::parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.element(parent).and_then(Element::parent);
        }
        false
    }
}

impl Document for MemoryDocument {
    fn find(&self, scope: Option<ElementRef>, selector: &Selector) -> Vec<ElementRef> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (ElementRef::new(index), node))
            .filter(|(el, _)| scope.map_or(true, |scope| self.is_descendant(*el, scope)))
            .filter(|(_, node)| selector.matches(*node))
            .map(|(el, _)| el)
            .collect()
    }

    fn value(&self, element: ElementRef) -> String {
        self.element(element)
            .map(|node| node.value.clone())
            .unwrap_or_default()
    }

    fn attr(&self, element: ElementRef, name: &str) -> Option<String> {
        self.element(element)?.attrs.get(name).cloned()
    }

    fn set_attr(&mut self, element: ElementRef, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attr(&mut self, element: ElementRef, name: &str) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.attrs.remove(name);
        }
    }

    fn label_for(&self, id: &str) -> Option<String> {
        self.nodes
            .iter()
            .find(|node| node.tag == "label" && node.attribute("for") == Some(id))
            .map(|node| node.text.clone())
    }

    fn listen(&mut self, targets: &[ElementRef], kind: EventKind) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId::new(self.next_listener);
        self.listeners.push(Listener {
            id,
            targets: targets.to_vec(),
            kind,
        });
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| l.id != listener);
    }
}
