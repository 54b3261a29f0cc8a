#![allow(dead_code)]

use formguard_validation::{FieldDescriptor, RuleKind, ValidationModel, Violation};

pub fn required(id: &str, value: &str) -> FieldDescriptor {
    FieldDescriptor::new(id, RuleKind::ValueRequired, value)
}

pub fn email(id: &str, value: &str) -> FieldDescriptor {
    FieldDescriptor::new(id, RuleKind::EmailAddress, value)
}

pub fn evaluate(fields: &[FieldDescriptor]) -> Vec<Violation> {
    ValidationModel::new().evaluate(fields)
}

pub fn messages(fields: &[FieldDescriptor]) -> Vec<String> {
    evaluate(fields).into_iter().map(|v| v.message).collect()
}
