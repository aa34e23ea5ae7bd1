use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separates the namespace from the rest of a key path (`console:heading`).
pub const NAMESPACE_SEPARATOR: char = ':';

/// Separates key path segments.
pub const KEY_SEPARATOR: char = '.';

/// Reasons a key path string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPathError {
    #[error("key path is empty")]
    Empty,

    #[error("segment {index} is empty")]
    EmptySegment { index: usize },

    #[error("namespace is empty")]
    EmptyNamespace,

    #[error("more than one namespace separator")]
    ExtraNamespaceSeparator,
}

/// A non-empty sequence of segments identifying a node within a bundle.
///
/// Written dot-delimited (`console.applicationRoles.heading`). The console's
/// namespace form `console:applicationRoles.heading` parses to the same path.
///
/// # Example
///
/// ```
/// use lingo::KeyPath;
///
/// let dotted = KeyPath::parse("console.applicationRoles.heading").unwrap();
/// let namespaced = KeyPath::parse("console:applicationRoles.heading").unwrap();
/// assert_eq!(dotted, namespaced);
/// assert_eq!(dotted.segments().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse a dotted (optionally namespaced) key path.
    pub fn parse(input: &str) -> Result<KeyPath, KeyPathError> {
        if input.is_empty() {
            return Err(KeyPathError::Empty);
        }

        let (namespace, rest) = match input.split_once(NAMESPACE_SEPARATOR) {
            Some((namespace, rest)) => {
                if namespace.is_empty() {
                    return Err(KeyPathError::EmptyNamespace);
                }
                if rest.contains(NAMESPACE_SEPARATOR) {
                    return Err(KeyPathError::ExtraNamespaceSeparator);
                }
                (Some(namespace), rest)
            }
            None => (None, input),
        };

        let mut segments: Vec<String> = namespace.into_iter().map(str::to_string).collect();
        for raw in rest.split(KEY_SEPARATOR) {
            if raw.is_empty() {
                return Err(KeyPathError::EmptySegment {
                    index: segments.len(),
                });
            }
            segments.push(raw.to_string());
        }

        Ok(KeyPath { segments })
    }

    /// Build a path from already-validated segments.
    ///
    /// Returns `None` if `segments` is empty or any segment is empty or
    /// contains a separator.
    pub fn from_segments<I, S>(segments: I) -> Option<KeyPath>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let valid = !segments.is_empty()
            && segments.iter().all(|s| {
                !s.is_empty() && !s.contains(KEY_SEPARATOR) && !s.contains(NAMESPACE_SEPARATOR)
            });
        valid.then_some(KeyPath { segments })
    }

    /// The path segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment.
    pub fn last(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> KeyPath {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        KeyPath { segments }
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPath::parse(s)
    }
}

impl TryFrom<String> for KeyPath {
    type Error = KeyPathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        KeyPath::parse(&s)
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.to_string()
    }
}
