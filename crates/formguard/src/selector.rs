//! Element selectors.
//!
//! Only compound selectors are understood: an optional tag name followed by
//! any number of `.class`, `#id`, `[attr]` and `[attr="value"]` parts.
//! Combinators (descendant, `>`, `+`, `~`) and selector lists are rejected;
//! scoping is done by passing a container to [`crate::Document::find`].

use crate::error::{FormError, Result};

/// A single part of a compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    /// Tag name (e.g., `input`).
    Tag(String),
    /// Class name (e.g., `.submit`).
    Class(String),
    /// Element id (e.g., `#email`).
    Id(String),
    /// Attribute presence or equality (e.g., `[type="text"]`).
    Attr { name: String, value: Option<String> },
}

/// Read access to the element properties a selector can test.
pub trait Matchable {
    /// Lowercase tag name.
    fn tag(&self) -> &str;
    /// Returns whether the element carries the class.
    fn has_class(&self, class: &str) -> bool;
    /// Returns an attribute value.
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    parts: Vec<SelectorPart>,
}

impl Selector {
    /// Parses a selector string.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidSelector`] for empty input, combinators,
    /// selector lists or malformed attribute parts.
    ///
    /// # Example
    ///
    /// ```
    /// use formguard::selector::{Selector, SelectorPart};
    ///
    /// let selector = Selector::parse(r#"input[type="text"]"#).unwrap();
    /// assert_eq!(selector.parts()[0], SelectorPart::Tag("input".to_string()));
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = || FormError::InvalidSelector(source.to_string());
        let input = source.trim();
        if input.is_empty() {
            return Err(invalid());
        }

        let mut parts = Vec::new();
        let mut rest = input;

        let tag_len = ident_len(rest);
        if tag_len > 0 {
            parts.push(SelectorPart::Tag(rest[..tag_len].to_ascii_lowercase()));
            rest = &rest[tag_len..];
        }

        while let Some(first) = rest.chars().next() {
            match first {
                '.' | '#' => {
                    let body = &rest[1..];
                    let len = ident_len(body);
                    if len == 0 {
                        return Err(invalid());
                    }
                    let name = body[..len].to_string();
                    parts.push(if first == '.' {
                        SelectorPart::Class(name)
                    } else {
                        SelectorPart::Id(name)
                    });
                    rest = &body[len..];
                }
                '[' => {
                    let end = rest.find(']').ok_or_else(invalid)?;
                    parts.push(parse_attr(&rest[1..end]).ok_or_else(invalid)?);
                    rest = &rest[end + 1..];
                }
                _ => return Err(invalid()),
            }
        }

        Ok(Self {
            source: input.to_string(),
            parts,
        })
    }

    /// Creates a `.class` selector.
    pub fn class(name: &str) -> Self {
        Self {
            source: format!(".{name}"),
            parts: vec![SelectorPart::Class(name.to_string())],
        }
    }

    /// Creates an `[attr]` selector.
    pub fn has_attr(name: &str) -> Self {
        Self {
            source: format!("[{name}]"),
            parts: vec![SelectorPart::Attr {
                name: name.to_string(),
                value: None,
            }],
        }
    }

    /// Creates an `[attr="value"]` selector.
    pub fn attr_equals(name: &str, value: &str) -> Self {
        Self {
            source: format!(r#"[{name}="{value}"]"#),
            parts: vec![SelectorPart::Attr {
                name: name.to_string(),
                value: Some(value.to_string()),
            }],
        }
    }

    /// Returns the selector as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the parsed parts.
    pub fn parts(&self) -> &[SelectorPart] {
        &self.parts
    }

    /// Returns whether the element satisfies every part.
    pub fn matches(&self, element: &impl Matchable) -> bool {
        self.parts.iter().all(|part| match part {
            SelectorPart::Tag(tag) => element.tag() == tag,
            SelectorPart::Class(class) => element.has_class(class),
            SelectorPart::Id(id) => element.attribute("id") == Some(id.as_str()),
            SelectorPart::Attr { name, value: None } => element.attribute(name).is_some(),
            SelectorPart::Attr {
                name,
                value: Some(value),
            } => element.attribute(name) == Some(value.as_str()),
        })
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn ident_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len())
}

fn parse_attr(inner: &str) -> Option<SelectorPart> {
    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => (name.trim(), Some(unquote(value.trim())?)),
        None => (inner.trim(), None),
    };
    if name.is_empty() || ident_len(name) != name.len() {
        return None;
    }
    Some(SelectorPart::Attr {
        name: name.to_string(),
        value,
    })
}

fn unquote(value: &str) -> Option<String> {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return Some(inner.to_string());
        }
    }
    (!value.is_empty() && ident_len(value) == value.len()).then(|| value.to_string())
}
