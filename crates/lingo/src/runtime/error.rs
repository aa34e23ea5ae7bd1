//! Error and warning types for bundle loading and resolution.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;
use crate::types::{KeyPathError, LocaleError, NodeKind, PluralForm};

/// Errors that occur while loading a bundle. The previously installed bundle
/// for the locale stays active.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a bundle.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bundle source is not valid JSON.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The JSON does not follow the bundle format.
    #[error("{path}: malformed entry at '{key}': {message}")]
    Malformed {
        path: PathBuf,
        key: String,
        message: String,
    },

    /// A bundle file or directory is not named after a valid locale.
    #[error("'{path}' is not named after a locale: {source}")]
    InvalidLocale {
        path: PathBuf,
        #[source]
        source: LocaleError,
    },

    /// Attempted to reload a bundle that was loaded from a string.
    #[error("cannot reload '{locale}': was loaded from string, not file")]
    NoPathForReload { locale: String },
}

impl LoadError {
    /// Attach the bundle source to a parser error.
    pub fn from_parse(path: impl Into<PathBuf>, error: ParseError) -> LoadError {
        let path = path.into();
        match error {
            ParseError::Syntax {
                line,
                column,
                message,
            } => LoadError::Parse {
                path,
                line,
                column,
                message,
            },
            ParseError::Malformed { key, message } => LoadError::Malformed { path, key, message },
        }
    }
}

/// An error that aborts a single resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The key path is empty or malformed.
    #[error("invalid key path '{path}': {source}")]
    InvalidKeyPath {
        path: String,
        #[source]
        source: KeyPathError,
    },
}

/// A recoverable problem noticed while resolving. The result still carries
/// best-effort output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveWarning {
    /// No bundle in the fallback chain defines the key.
    #[error("missing key '{key}' for locale '{locale}'{}", format_suggestions(.suggestions))]
    MissingKey {
        key: String,
        locale: String,
        suggestions: Vec<String>,
    },

    /// A placeholder had no value and was left verbatim.
    #[error("missing variable '{variable}' in '{key}'")]
    MissingVariable { key: String, variable: String },

    /// The key resolved to a list or record where text was requested.
    #[error("'{key}' is a {node_kind}, not text")]
    NotText { key: String, node_kind: NodeKind },
}

/// A finding from comparing a bundle against the baseline bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// The bundle defines a key the baseline does not.
    #[error("'{key}' in '{locale}' does not exist in the baseline")]
    UnknownKey { key: String, locale: String },

    /// The bundle's leaf has a different shape than the baseline's.
    #[error("'{key}' in '{locale}' is a {found}, baseline has a {expected}")]
    KindMismatch {
        key: String,
        locale: String,
        expected: NodeKind,
        found: NodeKind,
    },

    /// The translation uses a placeholder the baseline never supplies.
    #[error("'{key}' in '{locale}' uses placeholder '{placeholder}' not present in the baseline")]
    UnknownPlaceholder {
        key: String,
        locale: String,
        placeholder: String,
    },

    /// The bundle defines a plural variant the locale's rules never select.
    #[error("'{key}' in '{locale}' defines plural form '{form}' that '{locale}' never selects")]
    UnusedPluralForm {
        key: String,
        locale: String,
        form: PluralForm,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute up to three entries of `available` close to `target`.
///
/// Uses Levenshtein distance with a threshold of 1 for targets of three
/// characters or fewer and 2 otherwise. Results are ordered by distance,
/// then alphabetically.
pub fn compute_suggestions(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (levenshtein(target, candidate), candidate))
        .filter(|(distance, candidate)| *distance <= max_distance && candidate.as_str() != target)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
