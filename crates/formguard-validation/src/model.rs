//! The validation model: descriptors in, violations out.

use serde::{Deserialize, Serialize};

use crate::rule::RuleKind;

/// Snapshot of one form control at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Identifier of the control the rule applies to.
    pub id: String,
    /// Rule this descriptor checks.
    pub rule: RuleKind,
    /// Text of the associated label, if the page has one.
    pub label: Option<String>,
    /// Live value of the control.
    pub current_value: String,
}

impl FieldDescriptor {
    /// Creates a descriptor without a label.
    #[must_use]
    pub fn new(id: impl Into<String>, rule: RuleKind, current_value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rule,
            label: None,
            current_value: current_value.into(),
        }
    }

    /// Sets the label text.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A single field/rule mismatch found by one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the offending field.
    pub field_id: String,
    /// Message to present next to the field.
    pub message: String,
}

/// Decides which fields violate which rule.
///
/// Holds no state and knows nothing about presentation, so one model can be
/// shared by any number of controllers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationModel;

impl ValidationModel {
    /// Creates a new model.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks a single descriptor against its rule.
    #[must_use]
    pub fn check(&self, field: &FieldDescriptor) -> Option<Violation> {
        field
            .rule
            .validator()
            .validate(&field.current_value, field.label.as_deref())
            .err()
            .map(|message| Violation {
                field_id: field.id.clone(),
                message,
            })
    }

    /// Evaluates every descriptor, keeping input order in the output.
    #[must_use]
    pub fn evaluate(&self, fields: &[FieldDescriptor]) -> Vec<Violation> {
        fields.iter().filter_map(|field| self.check(field)).collect()
    }

    /// Returns whether no descriptor violates its rule.
    #[must_use]
    pub fn is_valid(&self, fields: &[FieldDescriptor]) -> bool {
        fields.iter().all(|field| self.check(field).is_none())
    }
}
