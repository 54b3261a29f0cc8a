//! # formguard
//!
//! Client-side validation for registration forms, with errors shown as
//! tooltips.
//!
//! This crate provides:
//! - A form controller that gates submission and re-validates live after the
//!   first failed submit
//! - The `Document` seam the controller reads the page through, with an
//!   in-memory implementation
//! - The `Overlay` seam errors are shown through, with a Bootstrap 5 tooltip
//!   implementation
//! - Selector parsing and JSON configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use formguard::document::{Element, MemoryDocument};
//! use formguard::overlay::BootstrapTooltips;
//! use formguard::{FormController, ValidationModel};
//!
//! let mut doc = MemoryDocument::new();
//! let form = doc.append(None, Element::new("form").class("js-registration-form"));
//! doc.label(Some(form), "email", "Email");
//! let email = doc.append(
//!     Some(form),
//!     Element::input("text")
//!         .id("email")
//!         .class("js-validation-email-address")
//!         .value("bad"),
//! );
//! let submit = doc.append(Some(form), Element::new("button").class("submit"));
//!
//! let mut controller = FormController::new(ValidationModel::new(), doc, BootstrapTooltips::new());
//! controller.init();
//!
//! // Lazy mode: typing does nothing before the first submit.
//! let events = controller.document_mut().key_up(email, "still bad");
//! for mut event in events {
//!     controller.dispatch(&mut event);
//! }
//! assert!(controller.overlay().is_empty());
//!
//! let events = controller.document().click(submit);
//! for mut event in events {
//!     controller.dispatch(&mut event);
//! }
//! assert!(controller.overlay().markup("email").unwrap().contains("Email is invalid."));
//!
//! // Live mode: fixing the field clears the tooltip on the next key release.
//! let events = controller.document_mut().key_up(email, "user@example.com");
//! for mut event in events {
//!     controller.dispatch(&mut event);
//! }
//! assert!(controller.overlay().is_empty());
//! ```

pub mod config;
mod controller;
pub mod document;
mod error;
pub mod overlay;
pub mod selector;

pub use config::{FormConfig, Selectors};
pub use controller::{Children, FormController, FormState, Lifecycle, SubmitOutcome};
pub use document::{Document, ElementRef, EventKind, FormEvent, ListenerId};
pub use error::{FormError, Result};
pub use overlay::{BootstrapTooltips, Overlay, Placement, TooltipOptions, Trigger};
pub use selector::Selector;

pub use formguard_validation::{FieldDescriptor, RuleKind, ValidationModel, Violation};
