//! Per-call resolution state.

use std::mem;

use crate::runtime::error::ResolveWarning;
use crate::types::{KeyPath, Value, Variables};

/// State carried through a single resolution.
///
/// The context tracks:
/// - The key being resolved (for warning messages)
/// - Caller-supplied variables and plural count
/// - Warnings collected along the way, deduplicated in discovery order
pub struct ResolveContext<'a> {
    key: &'a KeyPath,
    variables: &'a Variables,
    count: Option<u64>,
    warnings: Vec<ResolveWarning>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(key: &'a KeyPath, variables: &'a Variables, count: Option<u64>) -> Self {
        Self {
            key,
            variables,
            count,
            warnings: Vec::new(),
        }
    }

    pub fn key(&self) -> &KeyPath {
        self.key
    }

    /// Get a variable value.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// The plural count, if one was supplied.
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Add a warning unless an identical one was already recorded.
    pub fn add_warning(&mut self, warning: ResolveWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    /// Drain all collected warnings.
    pub fn take_warnings(&mut self) -> Vec<ResolveWarning> {
        mem::take(&mut self.warnings)
    }
}
