#![allow(dead_code)]

use formguard::document::{Element, MemoryDocument};
use formguard::{
    ElementRef, FormController, Overlay, SubmitOutcome, TooltipOptions, ValidationModel,
};

/// Overlay that records every call, for asserting on the presentation layer.
#[derive(Debug, Default)]
pub struct RecordingOverlay {
    pub calls: Vec<OverlayCall>,
    pub visible: Vec<(String, TooltipOptions)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayCall {
    Show(String),
    Destroy(String),
}

impl RecordingOverlay {
    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn options(&self, field_id: &str) -> Option<&TooltipOptions> {
        self.visible
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, options)| options)
    }
}

impl Overlay for RecordingOverlay {
    fn show(&mut self, field_id: &str, options: &TooltipOptions) {
        self.calls.push(OverlayCall::Show(field_id.to_string()));
        self.visible.retain(|(id, _)| id != field_id);
        self.visible.push((field_id.to_string(), options.clone()));
    }

    fn destroy(&mut self, field_id: &str) {
        self.calls.push(OverlayCall::Destroy(field_id.to_string()));
        self.visible.retain(|(id, _)| id != field_id);
    }
}

pub type Controller = FormController<MemoryDocument, RecordingOverlay>;

/// Handles into the registration form built by [`registration_form`].
pub struct Form {
    pub first_name: ElementRef,
    pub email: ElementRef,
    pub submit: ElementRef,
}

pub const ERROR_ATTR: &str = "data-validation-error-msg";

/// A registration form with a labelled required first name and a labelled
/// email address.
pub fn registration_form(first_name: &str, email: &str) -> (MemoryDocument, Form) {
    let mut doc = MemoryDocument::new();
    let form = doc.append(None, Element::new("form").class("js-registration-form"));

    doc.label(Some(form), "first-name", "First Name");
    let first_name = doc.append(
        Some(form),
        Element::input("text")
            .id("first-name")
            .class("js-validation-value-required")
            .value(first_name),
    );

    doc.label(Some(form), "email", "Email");
    let email = doc.append(
        Some(form),
        Element::input("text")
            .id("email")
            .class("js-validation-email-address")
            .value(email),
    );

    let submit = doc.append(
        Some(form),
        Element::new("button").class("submit").attr("type", "submit"),
    );

    (
        doc,
        Form {
            first_name,
            email,
            submit,
        },
    )
}

pub fn controller(doc: MemoryDocument) -> Controller {
    let mut controller = FormController::new(ValidationModel::new(), doc, RecordingOverlay::default());
    controller.init();
    controller
}

/// Clicks the submit control and dispatches every resulting event.
pub fn click_submit(controller: &mut Controller, submit: ElementRef) -> Vec<(SubmitOutcome, bool)> {
    let events = controller.document().click(submit);
    events
        .into_iter()
        .filter_map(|mut event| {
            let outcome = controller.dispatch(&mut event)?;
            Some((outcome, event.is_default_prevented()))
        })
        .collect()
}

/// Types a new value into a field and dispatches the key release.
pub fn type_into(controller: &mut Controller, field: ElementRef, value: &str) -> usize {
    let events = controller.document_mut().key_up(field, value);
    let count = events.len();
    for mut event in events {
        controller.dispatch(&mut event);
    }
    count
}

pub fn error_attr(controller: &Controller, field: ElementRef) -> Option<String> {
    use formguard::Document;
    controller.document().attr(field, ERROR_ATTR)
}
