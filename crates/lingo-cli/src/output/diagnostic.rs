//! Miette diagnostics for bundle parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::fs::read_to_string;
use std::path::Path;

use lingo::LoadError;
use lingo::parser::ParseError;
use miette::{Diagnostic, NamedSource, Report, SourceSpan, miette};
use thiserror::Error;

/// A miette-compatible diagnostic pointing into a bundle file.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(lingo::bundle))]
pub struct BundleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl BundleDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        match err {
            ParseError::Syntax { line, column, .. } => {
                Self::at_position(path, content, *line, *column, err.to_string())
            }
            ParseError::Malformed { key, .. } => {
                Self::at_key(path, content, key, err.to_string())
            }
        }
    }

    fn at_position(path: &Path, content: &str, line: usize, column: usize, message: String) -> Self {
        BundleDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (line_column_offset(content, line, column), 1).into(),
            message,
            help: None,
        }
    }

    fn at_key(path: &Path, content: &str, key: &str, message: String) -> Self {
        let (offset, len) = key_span(content, key);
        BundleDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, len).into(),
            message,
            help: Some(
                "values must be strings, arrays of strings, or objects of these".to_string(),
            ),
        }
    }
}

/// Render a load error, with source context when the file can be re-read.
pub fn load_error_report(err: LoadError) -> Report {
    let located = match &err {
        LoadError::Parse {
            path,
            line,
            column,
            ..
        } => read_to_string(path).ok().map(|content| {
            BundleDiagnostic::at_position(path, &content, *line, *column, err.to_string())
        }),
        LoadError::Malformed { path, key, .. } => read_to_string(path)
            .ok()
            .map(|content| BundleDiagnostic::at_key(path, &content, key, err.to_string())),
        LoadError::Io { .. } | LoadError::InvalidLocale { .. } | LoadError::NoPathForReload { .. } => {
            None
        }
    };
    match located {
        Some(diagnostic) => diagnostic.into(),
        None => miette!("{err}"),
    }
}

/// Convert a one-based line and column to a byte offset clamped to `content`.
fn line_column_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len())
}

/// Span of the quoted last segment of `key`, or the start of the file.
fn key_span(content: &str, key: &str) -> (usize, usize) {
    let last = key.rsplit(['.', ':']).next().unwrap_or(key);
    let quoted = format!("\"{last}\"");
    match content.find(&quoted) {
        Some(offset) => (offset, quoted.len()),
        None => (0, 1),
    }
}
