//! Parse error types for bundle sources.

use thiserror::Error;

/// An error that occurred while parsing bundle data.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source is not valid JSON.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The JSON is well-formed but does not follow the bundle format.
    #[error("malformed entry at '{key}': {message}")]
    Malformed { key: String, message: String },
}

impl ParseError {
    pub(crate) fn malformed(path: &[String], message: impl Into<String>) -> Self {
        let key = if path.is_empty() {
            "<root>".to_string()
        } else {
            path.join(".")
        };
        ParseError::Malformed {
            key,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Syntax {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}
