//! Form fixtures: a registration form plus a script of user actions.

use std::collections::BTreeMap;
use std::path::Path;

use formguard::document::{Element, MemoryDocument};
use formguard::selector::{Matchable, SelectorPart};
use formguard::{ElementRef, FormError, Result, RuleKind, Selector, Selectors};
use serde::{Deserialize, Serialize};

/// Extra markup for an element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Markup {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
}

impl Markup {
    fn apply(&self, mut element: Element) -> Element {
        if let Some(id) = &self.id {
            element = element.id(id.as_str());
        }
        for class in &self.classes {
            element = element.class(class.as_str());
        }
        for (key, value) in &self.attrs {
            element = element.attr(key.as_str(), value.as_str());
        }
        element
    }
}

/// One input of the form.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureField {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_input_type")]
    pub input_type: String,
    /// Rules, applied through the configured rule selectors.
    #[serde(default)]
    pub rules: Vec<RuleKind>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

fn default_input_type() -> String {
    "text".to_string()
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Activate the submit control.
    Submit,
    /// Replace a field's value and release a key in it.
    KeyUp { field: String, value: String },
}

/// A form and the actions to replay against it.
///
/// Without explicit `form` or `submit` markup, those elements are built to
/// match the configured container and submit selectors.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub form: Option<Markup>,
    pub fields: Vec<FixtureField>,
    #[serde(default)]
    pub submit: Option<Markup>,
    #[serde(default)]
    pub script: Vec<Step>,
}

/// Element handles of a built fixture.
#[derive(Debug, Clone)]
pub struct Handles {
    pub submit: ElementRef,
    pub fields: BTreeMap<String, ElementRef>,
}

impl Handles {
    /// Resolves a field id.
    pub fn field(&self, id: &str) -> Result<ElementRef> {
        self.fields
            .get(id)
            .copied()
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }
}

impl Fixture {
    /// Decodes a fixture from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Builds the form in a fresh document.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnmatchedSelector`] when an element cannot be
    /// given markup matching its selector.
    pub fn build(&self, selectors: &Selectors) -> Result<(MemoryDocument, Handles)> {
        let mut doc = MemoryDocument::new();
        let form = match &self.form {
            Some(markup) => markup.apply(Element::new("form")),
            None => mark(Element::new(tag_of(&selectors.container, "form")), &selectors.container)?,
        };
        let form = doc.append(None, form);
        let mut fields = BTreeMap::new();

        for field in &self.fields {
            if let Some(label) = &field.label {
                doc.label(Some(form), &field.id, label);
            }

            let mut element = Element::input(&field.input_type)
                .id(field.id.as_str())
                .value(field.value.as_str());
            for rule in RuleKind::ALL.into_iter().filter(|rule| field.rules.contains(rule)) {
                element = mark(element, rule_selector(selectors, rule))?;
            }
            for class in &field.classes {
                element = element.class(class.as_str());
            }
            for (key, value) in &field.attrs {
                element = element.attr(key.as_str(), value.as_str());
            }
            let element = doc.append(Some(form), element);
            fields.insert(field.id.clone(), element);
        }

        let submit = match &self.submit {
            Some(markup) => markup.apply(Element::new("button").attr("type", "submit")),
            None => mark(
                Element::new(tag_of(&selectors.submit, "button")).attr("type", "submit"),
                &selectors.submit,
            )?,
        };
        let submit = doc.append(Some(form), submit);

        Ok((doc, Handles { submit, fields }))
    }
}

const fn rule_selector(selectors: &Selectors, rule: RuleKind) -> &Selector {
    match rule {
        RuleKind::ValueRequired => &selectors.value_required,
        RuleKind::EmailAddress => &selectors.email_address,
    }
}

fn tag_of<'a>(selector: &'a Selector, fallback: &'a str) -> &'a str {
    selector
        .parts()
        .iter()
        .find_map(|part| match part {
            SelectorPart::Tag(tag) => Some(tag.as_str()),
            _ => None,
        })
        .unwrap_or(fallback)
}

/// Adds the classes, id and attributes `selector` asks for.
fn mark(mut element: Element, selector: &Selector) -> Result<Element> {
    let unmatched = |element: &Element| FormError::UnmatchedSelector {
        tag: element.tag.clone(),
        selector: selector.to_string(),
    };
    for part in selector.parts() {
        element = match part {
            SelectorPart::Tag(tag) if element.tag() != tag.as_str() => {
                return Err(unmatched(&element));
            }
            SelectorPart::Tag(_) => element,
            SelectorPart::Class(class) => element.class(class.as_str()),
            SelectorPart::Id(id) => match element.attribute("id") {
                Some(current) if current != id.as_str() => return Err(unmatched(&element)),
                _ => element.id(id.as_str()),
            },
            SelectorPart::Attr { name, value } => {
                element.attr(name.as_str(), value.as_deref().unwrap_or_default())
            }
        };
    }
    Ok(element)
}
