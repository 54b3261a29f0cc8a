//! # formguard-validation
//!
//! Pure validation logic for registration forms.
//!
//! Given field descriptors and their current values, the model decides which
//! fields violate which rule and produces one human-readable message per
//! violation. It performs no I/O and knows nothing about presentation.
//!
//! ## Quick Start
//!
//! ```rust
//! use formguard_validation::{FieldDescriptor, RuleKind, ValidationModel};
//!
//! let model = ValidationModel::new();
//! let fields = vec![
//!     FieldDescriptor::new("first-name", RuleKind::ValueRequired, "")
//!         .label("First Name"),
//!     FieldDescriptor::new("email", RuleKind::EmailAddress, "user@example.com"),
//! ];
//!
//! let violations = model.evaluate(&fields);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].field_id, "first-name");
//! assert_eq!(violations[0].message, "First Name cannot be blank");
//! ```
//!
//! ## Rules
//!
//! - `RuleKind::ValueRequired` - fails only on the exact empty string
//! - `RuleKind::EmailAddress` - syntactic email address check

mod model;
pub mod rule;

pub use model::{FieldDescriptor, ValidationModel, Violation};
pub use rule::{EmailValidator, RequiredValidator, RuleKind, Validator};
