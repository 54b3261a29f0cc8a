//! The host page seen by the controller.
//!
//! The controller never touches markup directly. It reads values, labels and
//! attributes, and registers event listeners, through [`Document`]. A browser
//! binding implements the trait over the real DOM; [`MemoryDocument`] is the
//! in-process implementation used by tests and the CLI.

mod memory;

pub use memory::{Element, MemoryDocument};

use crate::controller::Children;
use crate::selector::Selector;

/// Opaque handle to an element of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(usize);

impl ElementRef {
    /// Creates a handle from a document-specific index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the document-specific index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// User-input events the controller listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Activation of a control (mouse click, Enter on a button).
    Click,
    /// Release of a key inside a text control.
    KeyUp,
}

/// Identifies one registration made with [`Document::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Creates a listener id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// An event delivered to a registered listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEvent {
    listener: ListenerId,
    target: ElementRef,
    kind: EventKind,
    default_prevented: bool,
}

impl FormEvent {
    /// Creates an event for a listener.
    pub const fn new(listener: ListenerId, target: ElementRef, kind: EventKind) -> Self {
        Self {
            listener,
            target,
            kind,
            default_prevented: false,
        }
    }

    /// Returns the listener this event was delivered to.
    pub const fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Returns the element the event happened on.
    pub const fn target(&self) -> ElementRef {
        self.target
    }

    /// Returns the event kind.
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Suppresses the host's default action (e.g., native form submission).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns whether the default action was suppressed.
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Trait for the host page a form controller is bound to.
pub trait Document {
    /// Finds elements matching a selector, in document order.
    ///
    /// With a scope, only descendants of that element are searched.
    fn find(&self, scope: Option<ElementRef>, selector: &Selector) -> Vec<ElementRef>;

    /// Returns the live value of a control (empty for non-controls).
    fn value(&self, element: ElementRef) -> String;

    /// Returns an attribute value.
    fn attr(&self, element: ElementRef, name: &str) -> Option<String>;

    /// Sets an attribute value.
    fn set_attr(&mut self, element: ElementRef, name: &str, value: &str);

    /// Removes an attribute.
    fn remove_attr(&mut self, element: ElementRef, name: &str);

    /// Returns the text of the label whose `for` attribute is `id`.
    fn label_for(&self, id: &str) -> Option<String>;

    /// Registers a listener for `kind` events on every target.
    fn listen(&mut self, targets: &[ElementRef], kind: EventKind) -> ListenerId;

    /// Unregisters a listener. Unknown ids are ignored.
    fn unlisten(&mut self, listener: ListenerId);

    /// Applies positioning after the controller has resolved its elements.
    fn layout(&mut self, _children: &Children) {}
}
