//! Error types for the form controller.

use thiserror::Error;

/// Errors raised while reading external input: selectors, config, fixtures.
///
/// Validation failures are not errors; they are reported as violations.
#[derive(Debug, Error)]
pub enum FormError {
    /// A selector uses syntax the document layer does not understand.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// A configuration or fixture document could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A fixture element cannot be built to match a configured selector.
    #[error("<{tag}> cannot match selector {selector}")]
    UnmatchedSelector { tag: String, selector: String },

    /// A script or fixture refers to a field the form does not contain.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Reading a configuration or fixture file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
