//! The form controller: event wiring, submit gating and error presentation.

use formguard_validation::{FieldDescriptor, RuleKind, ValidationModel, Violation};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::{FormConfig, Selectors};
use crate::document::{Document, ElementRef, EventKind, FormEvent, ListenerId};
use crate::error::Result;
use crate::overlay::Overlay;
use crate::selector::Selector;

/// Where a controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Constructed, `init` not yet run.
    #[default]
    Uninitialized,
    /// Listeners registered.
    Enabled,
    /// Listeners removed; `enable` or `init` binds them again.
    Disabled,
}

/// The controller's validation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FormState {
    /// Whether the controller's listeners are registered.
    pub is_enabled: bool,
    /// Set by the first submit that fails validation; switches key releases
    /// from lazy to live validation.
    pub has_attempted_submit: bool,
}

/// Element references resolved once by `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children {
    /// The form container; `None` when the page has none.
    pub container: Option<ElementRef>,
    pub submit: Vec<ElementRef>,
    pub text_inputs: Vec<ElementRef>,
    pub value_required: Vec<ElementRef>,
    pub email_address: Vec<ElementRef>,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No violation; the caller may perform the real submission.
    Accepted,
    /// Submission stays blocked; the violations are on screen.
    Blocked(Vec<Violation>),
}

impl SubmitOutcome {
    /// Returns whether the form may be submitted.
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns the violations that blocked submission.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Accepted => &[],
            Self::Blocked(violations) => violations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    Submit,
    KeyUp,
}

impl Handler {
    fn targets(self, children: &Children) -> &[ElementRef] {
        match self {
            Self::Submit => &children.submit,
            Self::KeyUp => &children.text_inputs,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Route {
    kind: EventKind,
    handler: Handler,
}

/// Descriptors of one pass, plus the element each field id came from.
struct Snapshot {
    fields: Vec<FieldDescriptor>,
    elements: Vec<(String, ElementRef)>,
}

impl Snapshot {
    fn element(&self, field_id: &str) -> Option<ElementRef> {
        self.elements
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, el)| *el)
    }
}

/// Binds a [`ValidationModel`] to a form in a [`Document`] and reports
/// violations through an [`Overlay`].
///
/// Validation is lazy until the first failed submit: before that, only the
/// submit control triggers a pass. Afterwards every key release in a text
/// input re-validates the whole form.
///
/// # Example
///
/// ```
/// use formguard::document::{Element, MemoryDocument};
/// use formguard::overlay::BootstrapTooltips;
/// use formguard::{FormController, ValidationModel};
///
/// let mut doc = MemoryDocument::new();
/// let form = doc.append(None, Element::new("form").class("js-registration-form"));
/// doc.append(
///     Some(form),
///     Element::input("text").id("first-name").class("js-validation-value-required"),
/// );
/// let submit = doc.append(Some(form), Element::new("button").class("submit"));
///
/// let mut controller = FormController::new(ValidationModel::new(), doc, BootstrapTooltips::new());
/// controller.init();
///
/// let events = controller.document().click(submit);
/// for mut event in events {
///     let outcome = controller.dispatch(&mut event).unwrap();
///     assert!(!outcome.is_accepted());
///     assert!(event.is_default_prevented());
/// }
/// assert!(controller.overlay().is_visible("first-name"));
/// ```
#[derive(Debug)]
pub struct FormController<D, O> {
    model: ValidationModel,
    document: D,
    overlay: O,
    config: FormConfig,
    selectors: Selectors,
    children: Children,
    routes: Vec<Route>,
    bindings: Vec<(ListenerId, Handler)>,
    lifecycle: Lifecycle,
    state: FormState,
}

impl<D: Document, O: Overlay> FormController<D, O> {
    /// Creates an uninitialized controller with the default config.
    pub fn new(model: ValidationModel, document: D, overlay: O) -> Self {
        Self {
            model,
            document,
            overlay,
            config: FormConfig::default(),
            selectors: Selectors::default(),
            children: Children::default(),
            routes: Vec::new(),
            bindings: Vec::new(),
            lifecycle: Lifecycle::Uninitialized,
            state: FormState::default(),
        }
    }

    /// Creates an uninitialized controller with a custom config.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormError::InvalidSelector`] if a configured selector
    /// cannot be parsed.
    pub fn with_config(
        model: ValidationModel,
        document: D,
        overlay: O,
        config: FormConfig,
    ) -> Result<Self> {
        let selectors = config.selectors()?;
        Ok(Self {
            config,
            selectors,
            ..Self::new(model, document, overlay)
        })
    }

    /// Sets the controller up and enables it.
    ///
    /// Runs, in order: handler setup, element resolution, layout, enable.
    /// Does nothing while the controller is enabled.
    pub fn init(&mut self) {
        if self.state.is_enabled {
            return;
        }

        self.setup_handlers();
        self.create_children();
        self.document.layout(&self.children);
        self.bind();
        debug!(
            text_inputs = self.children.text_inputs.len(),
            value_required = self.children.value_required.len(),
            email_address = self.children.email_address.len(),
            "form controller initialized"
        );
    }

    /// Registers the submit and key-release listeners.
    ///
    /// Does nothing if already enabled. Enabling resets the submit flag, so
    /// validation goes back to lazy mode. An uninitialized controller is
    /// initialized instead.
    pub fn enable(&mut self) {
        if self.state.is_enabled {
            return;
        }
        if self.lifecycle == Lifecycle::Uninitialized {
            self.init();
            return;
        }
        self.bind();
    }

    /// Unregisters every listener added by [`Self::enable`].
    ///
    /// Does nothing if already disabled. Rendered errors stay on screen.
    pub fn disable(&mut self) {
        if !self.state.is_enabled {
            return;
        }

        for (listener, _) in self.bindings.drain(..) {
            self.document.unlisten(listener);
        }
        self.state.is_enabled = false;
        self.lifecycle = Lifecycle::Disabled;
        debug!("form controller disabled");
    }

    /// Tears the controller down and hands back its collaborators.
    ///
    /// Listeners are removed, rendered errors are cleared and cached element
    /// references are dropped.
    pub fn destroy(mut self) -> (D, O) {
        self.disable();
        self.clear();
        self.children = Children::default();
        self.routes.clear();
        debug!("form controller destroyed");
        (self.document, self.overlay)
    }

    /// Routes an event to the handler registered for its listener.
    ///
    /// Returns the outcome for submit events and `None` otherwise. Events for
    /// listeners this controller does not own are dropped.
    pub fn dispatch(&mut self, event: &mut FormEvent) -> Option<SubmitOutcome> {
        let handler = self
            .bindings
            .iter()
            .find(|(listener, _)| *listener == event.listener())
            .map(|(_, handler)| *handler);

        match handler {
            Some(Handler::Submit) => Some(self.on_submit(event)),
            Some(Handler::KeyUp) => {
                self.on_key_up(event);
                None
            }
            None => {
                warn!(
                    listener = event.listener().get(),
                    "dropping event for unknown listener"
                );
                None
            }
        }
    }

    /// Handles activation of the submit control.
    ///
    /// Native submission is always suppressed; the outcome tells the caller
    /// whether to submit. A failed submit switches on live validation.
    pub fn on_submit(&mut self, event: &mut FormEvent) -> SubmitOutcome {
        event.prevent_default();

        let violations = self.validate();
        if violations.is_empty() {
            debug!("submit accepted");
            return SubmitOutcome::Accepted;
        }

        self.state.has_attempted_submit = true;
        debug!(violations = violations.len(), "submit blocked");
        SubmitOutcome::Blocked(violations)
    }

    /// Handles a key release in a text input.
    ///
    /// Ignored until a submit has failed.
    pub fn on_key_up(&mut self, event: &FormEvent) {
        if !self.state.has_attempted_submit {
            trace!(element = %event.target(), "lazy mode, key release ignored");
            return;
        }
        self.validate();
    }

    /// Clears rendered errors, evaluates the form and renders the result.
    pub fn validate(&mut self) -> Vec<Violation> {
        self.clear();

        let snapshot = self.snapshot();
        let violations = self.model.evaluate(&snapshot.fields);
        debug!(
            fields = snapshot.fields.len(),
            violations = violations.len(),
            "evaluated form"
        );

        self.render(&violations, &snapshot);
        violations
    }

    /// Returns the validation state.
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// Returns the lifecycle stage.
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns the resolved element references.
    pub const fn children(&self) -> &Children {
        &self.children
    }

    /// Returns the active config.
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the model.
    pub const fn model(&self) -> &ValidationModel {
        &self.model
    }

    /// Returns the document.
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// Returns the document mutably, e.g. to feed it user input.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Returns the overlay.
    pub const fn overlay(&self) -> &O {
        &self.overlay
    }

    fn setup_handlers(&mut self) {
        self.routes = vec![
            Route {
                kind: EventKind::Click,
                handler: Handler::Submit,
            },
            Route {
                kind: EventKind::KeyUp,
                handler: Handler::KeyUp,
            },
        ];
    }

    fn create_children(&mut self) {
        let container = self
            .document
            .find(None, &self.selectors.container)
            .into_iter()
            .next();
        if container.is_none() {
            warn!(selector = %self.selectors.container, "form container not found");
        }

        let find = |selector: &Selector| {
            container
                .map(|scope| self.document.find(Some(scope), selector))
                .unwrap_or_default()
        };

        self.children = Children {
            container,
            submit: find(&self.selectors.submit),
            text_inputs: find(&self.selectors.text_input),
            value_required: find(&self.selectors.value_required),
            email_address: find(&self.selectors.email_address),
        };
    }

    fn bind(&mut self) {
        for route in &self.routes {
            let targets = route.handler.targets(&self.children);
            let listener = self.document.listen(targets, route.kind);
            trace!(listener = listener.get(), kind = ?route.kind, targets = targets.len(), "listening");
            self.bindings.push((listener, route.handler));
        }

        self.state.is_enabled = true;
        self.state.has_attempted_submit = false;
        self.lifecycle = Lifecycle::Enabled;
        debug!(listeners = self.bindings.len(), "form controller enabled");
    }

    fn field_key(&self, element: ElementRef) -> String {
        self.document
            .attr(element, "id")
            .unwrap_or_else(|| element.to_string())
    }

    fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot {
            fields: Vec::new(),
            elements: Vec::new(),
        };

        let checks = [
            (RuleKind::ValueRequired, &self.children.value_required),
            (RuleKind::EmailAddress, &self.children.email_address),
        ];
        for (rule, elements) in checks {
            for &element in elements {
                let id = self.document.attr(element, "id");
                let label = id.as_deref().and_then(|id| self.document.label_for(id));
                let key = id.unwrap_or_else(|| element.to_string());

                snapshot.fields.push(FieldDescriptor {
                    id: key.clone(),
                    rule,
                    label,
                    current_value: self.document.value(element),
                });
                snapshot.elements.push((key, element));
            }
        }

        snapshot
    }

    fn render(&mut self, violations: &[Violation], snapshot: &Snapshot) {
        for violation in violations {
            let Some(element) = snapshot.element(&violation.field_id) else {
                warn!(field = %violation.field_id, "violation for unknown field");
                continue;
            };

            self.document
                .set_attr(element, &self.config.error_attribute, &violation.message);
            self.overlay.show(
                &violation.field_id,
                &self.config.tooltip.titled(violation.message.as_str()),
            );
            trace!(field = %violation.field_id, message = %violation.message, "rendered error");
        }
    }

    fn clear(&mut self) {
        let Some(container) = self.children.container else {
            return;
        };

        for element in self
            .document
            .find(Some(container), &self.selectors.error_marker)
        {
            let key = self.field_key(element);
            self.overlay.destroy(&key);
            self.document
                .remove_attr(element, &self.config.error_attribute);
            trace!(field = %key, "cleared error");
        }
    }
}
