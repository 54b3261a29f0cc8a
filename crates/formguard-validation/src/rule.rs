//! Field rules and their validators.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Local part made of dot-separated atoms or a quoted string, then either a
/// bracketed dotted-quad or dot-separated labels ending in a 2+ letter TLD.
///
/// Whitespace is spelled out the way browsers define `\s`, which counts
/// U+FEFF but not U+0085. A quoted part stops at any browser line terminator.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:(?:[^<>()\[\]\\.,;:@"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+(?:\.[^<>()\[\]\\.,;:@"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+)*)|(?:"[^\n\r\x{2028}\x{2029}]+"))@(?:(?:\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(?:(?:[a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns the message to show if it is invalid.
    ///
    /// `label` is the text of the field's label, when the page has one.
    fn validate(&self, value: &str, label: Option<&str>) -> Result<(), String>;

    /// Returns the error message for a field with the given label.
    fn message(&self, label: Option<&str>) -> String;
}

/// The closed set of rules a field can be marked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// The field must not be empty.
    ValueRequired,
    /// The field must hold a syntactically valid email address.
    EmailAddress,
}

impl RuleKind {
    /// All rules, in the order a pass checks them.
    pub const ALL: [Self; 2] = [Self::ValueRequired, Self::EmailAddress];

    /// Returns the validator implementing this rule.
    #[must_use]
    pub fn validator(self) -> &'static dyn Validator {
        match self {
            Self::ValueRequired => &RequiredValidator,
            Self::EmailAddress => &EmailValidator,
        }
    }

    /// Returns the rule name used in fixtures and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValueRequired => "value_required",
            Self::EmailAddress => "email_address",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validator that rejects the empty string.
///
/// Only the exact empty string fails. A value made of whitespace is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredValidator;

impl Validator for RequiredValidator {
    fn validate(&self, value: &str, label: Option<&str>) -> Result<(), String> {
        if value.is_empty() {
            Err(self.message(label))
        } else {
            Ok(())
        }
    }

    fn message(&self, label: Option<&str>) -> String {
        label.map_or_else(
            || "Field cannot be blank.".to_string(),
            |label| format!("{label} cannot be blank"),
        )
    }
}

/// Validator for email addresses.
///
/// Syntax only: nothing here says the address can receive mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Returns whether `value` looks like an email address.
    #[must_use]
    pub fn is_match(value: &str) -> bool {
        EMAIL_REGEX.is_match(value)
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str, label: Option<&str>) -> Result<(), String> {
        if Self::is_match(value) {
            Ok(())
        } else {
            Err(self.message(label))
        }
    }

    fn message(&self, label: Option<&str>) -> String {
        label.map_or_else(
            || "Field is invalid.".to_string(),
            |label| format!("{label} is invalid."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator;
        assert!(v.validate("hello", None).is_ok());
        assert!(v.validate("", None).is_err());
        assert!(v.validate(" ", None).is_ok());
        assert!(v.validate("\t\n", None).is_ok());
    }

    #[test]
    fn test_required_messages() {
        let v = RequiredValidator;
        assert_eq!(
            v.validate("", Some("First Name")),
            Err("First Name cannot be blank".to_string())
        );
        assert_eq!(
            v.validate("", None),
            Err("Field cannot be blank.".to_string())
        );
    }

    #[test]
    fn test_email_validator() {
        let v = EmailValidator;
        assert!(v.validate("a@b.com", None).is_ok());
        assert!(v.validate("first.last@sub.domain.co", None).is_ok());
        assert!(v.validate("plainaddress", None).is_err());
        assert!(v.validate("a@b", None).is_err());
        assert!(v.validate("@b.com", None).is_err());
    }

    #[test]
    fn test_email_messages() {
        let v = EmailValidator;
        assert_eq!(
            v.validate("bad", Some("Email")),
            Err("Email is invalid.".to_string())
        );
        assert_eq!(v.validate("bad", None), Err("Field is invalid.".to_string()));
    }

    #[test]
    fn test_email_literal_forms() {
        assert!(EmailValidator::is_match("\"john doe\"@example.com"));
        assert!(EmailValidator::is_match("user@[192.168.0.1]"));
        assert!(EmailValidator::is_match("user+tag@my-host.example.org"));
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(!EmailValidator::is_match(""));
        assert!(!EmailValidator::is_match("a..b@example.com"));
        assert!(!EmailValidator::is_match(".a@example.com"));
        assert!(!EmailValidator::is_match("a b@example.com"));
        assert!(!EmailValidator::is_match("a@example.c"));
        assert!(!EmailValidator::is_match("a@b.com "));
        assert!(!EmailValidator::is_match("a@exa_mple.com"));
    }

    #[test]
    fn test_email_line_terminators_and_bom() {
        assert!(!EmailValidator::is_match("\"a\rb\"@example.com"));
        assert!(!EmailValidator::is_match("\"a\nb\"@example.com"));
        assert!(!EmailValidator::is_match("\"a\u{2028}b\"@example.com"));
        assert!(!EmailValidator::is_match("\"a\u{2029}b\"@example.com"));
        assert!(!EmailValidator::is_match("a\u{FEFF}b@example.com"));
        assert!(!EmailValidator::is_match("a\u{3000}b@example.com"));
        assert!(!EmailValidator::is_match("a\x0Bb@example.com"));
        assert!(EmailValidator::is_match("a\u{85}b@example.com"));
        assert!(EmailValidator::is_match("\"a\tb\"@example.com"));
    }

    #[test]
    fn test_rule_kind_dispatch() {
        assert!(RuleKind::ValueRequired.validator().validate("", None).is_err());
        assert!(RuleKind::EmailAddress.validator().validate("x", None).is_err());
        assert_eq!(RuleKind::EmailAddress.to_string(), "email_address");
    }
}
