//! Comparing a translation bundle against the baseline bundle.

use serde::Serialize;

use crate::runtime::error::LoadWarning;
use crate::runtime::plural::plural_categories;
use crate::types::{Bundle, Entry, KeyPath, LocaleId, Node, NodeKind};

/// Check `target` against `baseline`.
///
/// Reports, in key order:
/// - leaves the baseline does not define
/// - leaves whose shape differs from the baseline's
/// - placeholders the baseline never uses at that key
/// - CLDR plural variants the target locale never selects
pub fn validate_bundle(baseline: &Bundle, target: &Bundle, locale: &LocaleId) -> Vec<LoadWarning> {
    let mut warnings = Vec::new();
    let categories = plural_categories(locale);

    for path in target.leaf_paths() {
        let Some(Entry::Node(node)) = target.get(&path) else {
            continue;
        };
        let key = path.to_string();

        let (expected, baseline_placeholders) = match baseline.get(&path) {
            Some(Entry::Node(base)) if base.is_leaf() => (base.kind(), base.placeholders()),
            Some(Entry::Template(template)) => (NodeKind::Text, template.placeholders().collect()),
            Some(Entry::Node(_)) | None => {
                warnings.push(LoadWarning::UnknownKey {
                    key,
                    locale: locale.to_string(),
                });
                continue;
            }
        };

        if expected != node.kind() {
            warnings.push(LoadWarning::KindMismatch {
                key,
                locale: locale.to_string(),
                expected,
                found: node.kind(),
            });
            continue;
        }

        for placeholder in node.placeholders().difference(&baseline_placeholders) {
            warnings.push(LoadWarning::UnknownPlaceholder {
                key: key.clone(),
                locale: locale.to_string(),
                placeholder: (*placeholder).to_string(),
            });
        }

        if let Node::Plural(forms) = node {
            for (form, _) in forms.forms() {
                if form.is_cldr() && !categories.contains(&form) {
                    warnings.push(LoadWarning::UnusedPluralForm {
                        key: key.clone(),
                        locale: locale.to_string(),
                        form,
                    });
                }
            }
        }
    }

    warnings
}

/// How much of the baseline a bundle translates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub translated: usize,
    pub total: usize,
    /// Baseline leaves the bundle does not define, in key order.
    pub missing: Vec<KeyPath>,
}

impl Coverage {
    /// Measure `target` against every leaf of `baseline`.
    pub fn measure(baseline: &Bundle, target: &Bundle) -> Coverage {
        let baseline_paths = baseline.leaf_paths();
        let total = baseline_paths.len();
        let missing: Vec<KeyPath> = baseline_paths
            .into_iter()
            .filter(|path| !target.get(path).is_some_and(|entry| entry.is_leaf()))
            .collect();
        Coverage {
            translated: total - missing.len(),
            total,
            missing,
        }
    }

    /// Translated share as a percentage; an empty baseline counts as complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.translated as f64 * 100.0 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
