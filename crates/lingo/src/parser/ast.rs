//! Parsed message templates.
//!
//! These types are public so external tooling can inspect placeholder usage.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A message string split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, including markup such as `<1>…</1>`.
    Literal(String),
    /// A `{{name}}` placeholder.
    Placeholder {
        /// Variable name, trimmed of whitespace and the `-` marker.
        name: String,
        /// The token exactly as written, emitted when no value is supplied.
        raw: String,
    },
}

impl Template {
    /// A template consisting of a single literal.
    pub fn literal(text: impl Into<String>) -> Template {
        let text = text.into();
        if text.is_empty() {
            return Template::default();
        }
        Template {
            segments: vec![Segment::Literal(text)],
        }
    }

    /// Placeholder names in order of appearance (duplicates included).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template contains no placeholders.
    pub fn is_literal(&self) -> bool {
        self.placeholders().next().is_none()
    }
}

/// Reproduces the source text byte-for-byte.
impl Display for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Placeholder { raw, .. } => f.write_str(raw)?,
            }
        }
        Ok(())
    }
}
