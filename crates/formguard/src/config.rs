//! Controller configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::overlay::TooltipOptions;
use crate::selector::Selector;

/// Where the controller finds its elements and how it reports errors.
///
/// Every field has a default matching the stock registration form markup, so
/// a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// The form container.
    pub container: String,
    /// The submit control, inside the container.
    pub submit: String,
    /// Text inputs whose key releases trigger live validation.
    pub text_input: String,
    /// Fields that must not be empty.
    pub value_required: String,
    /// Fields that must hold an email address.
    pub email_address: String,
    /// Attribute carrying a field's current error message.
    pub error_attribute: String,
    /// Tooltip options; the title is replaced per violation.
    pub tooltip: TooltipOptions,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            container: ".js-registration-form".to_string(),
            submit: ".submit".to_string(),
            text_input: r#"[type="text"]"#.to_string(),
            value_required: ".js-validation-value-required".to_string(),
            email_address: ".js-validation-email-address".to_string(),
            error_attribute: "data-validation-error-msg".to_string(),
            tooltip: TooltipOptions::default(),
        }
    }
}

impl FormConfig {
    /// Decodes a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormError::Config`] if the JSON does not describe a config.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or decoding error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Parses every selector in the config.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormError::InvalidSelector`] for the first selector
    /// that does not parse, including an unusable error attribute name.
    pub fn selectors(&self) -> Result<Selectors> {
        Ok(Selectors {
            container: Selector::parse(&self.container)?,
            submit: Selector::parse(&self.submit)?,
            text_input: Selector::parse(&self.text_input)?,
            value_required: Selector::parse(&self.value_required)?,
            email_address: Selector::parse(&self.email_address)?,
            error_marker: Selector::parse(&format!("[{}]", self.error_attribute))?,
        })
    }
}

/// The parsed selectors of a [`FormConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub container: Selector,
    pub submit: Selector,
    pub text_input: Selector,
    pub value_required: Selector,
    pub email_address: Selector,
    /// Matches elements currently bearing the error attribute.
    pub error_marker: Selector,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            container: Selector::class("js-registration-form"),
            submit: Selector::class("submit"),
            text_input: Selector::attr_equals("type", "text"),
            value_required: Selector::class("js-validation-value-required"),
            email_address: Selector::class("js-validation-email-address"),
            error_marker: Selector::has_attr("data-validation-error-msg"),
        }
    }
}
