//! Tests for init/enable/disable/destroy.

mod common;
use common::*;

use formguard::document::{Element, MemoryDocument};
use formguard::{Document, FormConfig, FormController, FormError, Lifecycle, ValidationModel};

#[test]
fn init_enables_and_resolves_children() {
    let (doc, form) = registration_form("", "");
    let controller = controller(doc);

    assert_eq!(controller.lifecycle(), Lifecycle::Enabled);
    assert!(controller.state().is_enabled);
    assert!(!controller.state().has_attempted_submit);

    let children = controller.children();
    assert_eq!(children.submit, vec![form.submit]);
    assert_eq!(children.text_inputs, vec![form.first_name, form.email]);
    assert_eq!(children.value_required, vec![form.first_name]);
    assert_eq!(children.email_address, vec![form.email]);
    assert_eq!(controller.document().listener_count(), 2);
}

#[test]
fn init_twice_is_a_no_op() {
    let (doc, form) = registration_form("", "");
    let mut controller = controller(doc);
    controller.init();

    assert_eq!(controller.document().listener_count(), 2);
    assert_eq!(click_submit(&mut controller, form.submit).len(), 1);
}

#[test]
fn enable_twice_binds_once() {
    let (doc, form) = registration_form("", "");
    let mut controller = controller(doc);
    controller.enable();
    controller.enable();

    assert_eq!(controller.document().listener_count(), 2);
    assert_eq!(click_submit(&mut controller, form.submit).len(), 1);
}

#[test]
fn enable_before_init_initializes() {
    let (doc, form) = registration_form("", "");
    let mut controller =
        FormController::new(ValidationModel::new(), doc, RecordingOverlay::default());
    assert_eq!(controller.lifecycle(), Lifecycle::Uninitialized);

    controller.enable();
    assert_eq!(controller.lifecycle(), Lifecycle::Enabled);
    assert_eq!(click_submit(&mut controller, form.submit).len(), 1);
}

#[test]
fn disable_removes_every_listener() {
    let (doc, form) = registration_form("", "bad");
    let mut controller = controller(doc);
    controller.disable();
    controller.disable();

    assert_eq!(controller.lifecycle(), Lifecycle::Disabled);
    assert!(!controller.state().is_enabled);
    assert_eq!(controller.document().listener_count(), 0);
    assert!(click_submit(&mut controller, form.submit).is_empty());
    assert_eq!(type_into(&mut controller, form.email, "x"), 0);
}

#[test]
fn re_enable_resets_submit_flag() {
    let (doc, form) = registration_form("", "bad");
    let mut controller = controller(doc);
    click_submit(&mut controller, form.submit);
    assert!(controller.state().has_attempted_submit);

    controller.disable();
    controller.enable();
    assert!(!controller.state().has_attempted_submit);
    assert_eq!(controller.document().listener_count(), 2);
}

#[test]
fn stale_event_after_disable_is_dropped() {
    let (doc, form) = registration_form("", "bad");
    let mut controller = controller(doc);
    let mut events = controller.document().click(form.submit);

    controller.disable();
    assert_eq!(controller.dispatch(&mut events[0]), None);
    assert!(!events[0].is_default_prevented());
    assert!(controller.overlay().calls.is_empty());
}

#[test]
fn destroy_clears_and_releases() {
    let (doc, form) = registration_form("", "bad");
    let mut controller = controller(doc);
    click_submit(&mut controller, form.submit);

    let (doc, overlay) = controller.destroy();
    assert_eq!(doc.listener_count(), 0);
    assert!(overlay.visible.is_empty());
    assert_eq!(doc.attr(form.first_name, ERROR_ATTR), None);
    assert_eq!(doc.attr(form.email, ERROR_ATTR), None);
}

#[test]
fn missing_container_binds_nothing() {
    let mut doc = MemoryDocument::new();
    let submit = doc.append(None, Element::new("button").class("submit"));
    let mut controller = controller(doc);

    assert_eq!(controller.children().container, None);
    assert!(controller.children().submit.is_empty());
    assert!(click_submit(&mut controller, submit).is_empty());
}

#[test]
fn unlabelled_fields_use_generic_messages() {
    let mut doc = MemoryDocument::new();
    let form = doc.append(None, Element::new("form").class("js-registration-form"));
    let nickname = doc.append(
        Some(form),
        Element::input("text").id("nickname").class("js-validation-value-required"),
    );
    let anonymous = doc.append(
        Some(form),
        Element::input("text").class("js-validation-email-address").value("nope"),
    );
    let submit = doc.append(Some(form), Element::new("button").class("submit"));

    let mut controller = controller(doc);
    let results = click_submit(&mut controller, submit);
    let violations = results[0].0.violations();

    assert_eq!(violations[0].field_id, "nickname");
    assert_eq!(violations[0].message, "Field cannot be blank.");
    assert_eq!(violations[1].field_id, anonymous.to_string());
    assert_eq!(violations[1].message, "Field is invalid.");
    assert_eq!(
        error_attr(&controller, nickname).as_deref(),
        Some("Field cannot be blank.")
    );
    assert_eq!(
        error_attr(&controller, anonymous).as_deref(),
        Some("Field is invalid.")
    );
}

#[test]
fn custom_config_selectors_and_attribute() {
    let mut doc = MemoryDocument::new();
    let form = doc.append(None, Element::new("form").id("signup"));
    let name = doc.append(Some(form), Element::input("text").id("name").attr("required", ""));
    let submit = doc.append(Some(form), Element::new("button").id("go"));

    let config = FormConfig {
        container: "form#signup".to_string(),
        submit: "#go".to_string(),
        value_required: "[required]".to_string(),
        error_attribute: "data-error-msg".to_string(),
        ..FormConfig::default()
    };
    let mut controller =
        FormController::with_config(ValidationModel::new(), doc, RecordingOverlay::default(), config)
            .unwrap();
    controller.init();

    let results = click_submit(&mut controller, submit);
    assert!(!results[0].0.is_accepted());
    assert_eq!(
        controller.document().attr(name, "data-error-msg").as_deref(),
        Some("Field cannot be blank.")
    );
    assert_eq!(controller.document().attr(name, ERROR_ATTR), None);
}

#[test]
fn invalid_config_is_rejected() {
    let (doc, _) = registration_form("", "");
    let config = FormConfig {
        text_input: "input, textarea".to_string(),
        ..FormConfig::default()
    };
    let result =
        FormController::with_config(ValidationModel::new(), doc, RecordingOverlay::default(), config);
    assert!(matches!(result, Err(FormError::InvalidSelector(_))));
}
