use std::collections::BTreeMap;

use serde::Serialize;

/// The outcome of resolving a key path.
///
/// Lists and records are handed back as structures; joining fragments or
/// rendering a notification is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolved {
    /// An interpolated message.
    Text(String),
    /// Ordered message fragments, each interpolated.
    List(Vec<String>),
    /// A structured payload such as `{ message, description }`.
    Record(BTreeMap<String, String>),
    /// No locale in the fallback chain defines the key; holds the sentinel
    /// (the key path, or the configured marker).
    Missing(String),
}

impl Resolved {
    /// The text of a `Text` result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Resolved::Text(text) => Some(text),
            Resolved::List(_) | Resolved::Record(_) | Resolved::Missing(_) => None,
        }
    }

    /// The fragments of a `List` result.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Resolved::List(items) => Some(items),
            Resolved::Text(_) | Resolved::Record(_) | Resolved::Missing(_) => None,
        }
    }

    /// The fields of a `Record` result.
    pub fn as_record(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Resolved::Record(fields) => Some(fields),
            Resolved::Text(_) | Resolved::List(_) | Resolved::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolved::Missing(_))
    }
}
