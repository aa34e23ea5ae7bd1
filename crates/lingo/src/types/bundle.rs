use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use super::key_path::KeyPath;
use super::node::{Entry, Node, split_plural_suffix};
use crate::parser::{ParseError, parse_bundle, parse_bundle_value, validate_key};

/// The complete, immutable string tree for one locale.
///
/// # Example
///
/// ```
/// use lingo::{Bundle, KeyPath};
///
/// let bundle = Bundle::from_json_str(r#"{
///     "common": { "save": "Enregistrer" },
///     "errors": { "subtitles": { "0": "line one", "1": "line two" } }
/// }"#).unwrap();
///
/// assert_eq!(bundle.len(), 2);
/// let key = KeyPath::parse("common.save").unwrap();
/// assert!(bundle.get(&key).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    root: BTreeMap<String, Node>,
}

impl Bundle {
    /// Wrap an already-built tree.
    pub fn from_root(root: BTreeMap<String, Node>) -> Self {
        Bundle { root }
    }

    /// Parse a JSON bundle.
    pub fn from_json_str(input: &str) -> Result<Bundle, ParseError> {
        parse_bundle(input)
    }

    /// Convert an already-parsed JSON value.
    pub fn from_json_value(value: &JsonValue) -> Result<Bundle, ParseError> {
        parse_bundle_value(value)
    }

    /// Add `bundle` as the top-level branch `namespace`.
    ///
    /// Fails if the namespace is already present or is not a valid key.
    pub fn merge_namespace(&mut self, namespace: &str, bundle: Bundle) -> Result<(), ParseError> {
        validate_key(namespace, &[namespace.to_string()])?;
        if self.root.contains_key(namespace) {
            return Err(ParseError::malformed(
                &[namespace.to_string()],
                "namespace defined twice",
            ));
        }
        self.root
            .insert(namespace.to_string(), Node::Branch(bundle.root));
        Ok(())
    }

    /// Top-level nodes keyed by feature area.
    pub fn root(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    /// Look up a key path.
    ///
    /// Interior segments must name branches. The final segment may also
    /// address a member of a leaf (`subtitles.0`, `success.message`) or a
    /// folded plural variant by its suffixed key (`emails_other`).
    pub fn get(&self, path: &KeyPath) -> Option<Entry<'_>> {
        let segments = path.segments();
        let mut children = &self.root;

        for (i, segment) in segments.iter().enumerate() {
            let is_last = i + 1 == segments.len();
            match children.get(segment) {
                Some(Node::Branch(next)) if !is_last => children = next,
                Some(found) if is_last => return Some(Entry::Node(found)),
                Some(leaf) => {
                    return if i + 2 == segments.len() {
                        leaf.member(&segments[i + 1]).map(Entry::Template)
                    } else {
                        None
                    };
                }
                None if is_last => {
                    let (base, form) = split_plural_suffix(segment)?;
                    return match children.get(base) {
                        Some(Node::Plural(forms)) => forms.form(form).map(Entry::Template),
                        _ => None,
                    };
                }
                None => return None,
            }
        }

        None
    }

    /// The deepest branch along `path` and the index of the first segment
    /// that does not lead further into it.
    pub fn deepest_branch(&self, path: &KeyPath) -> (usize, &BTreeMap<String, Node>) {
        let segments = path.segments();
        let mut children = &self.root;
        for (i, segment) in segments.iter().enumerate() {
            match children.get(segment) {
                Some(Node::Branch(next)) if i + 1 < segments.len() => children = next,
                _ => return (i, children),
            }
        }
        (segments.len(), children)
    }

    /// Every leaf path in key order.
    pub fn leaf_paths(&self) -> Vec<KeyPath> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        collect_leaf_paths(&self.root, &mut prefix, &mut paths);
        paths
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        count_leaves(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect_leaf_paths(
    children: &BTreeMap<String, Node>,
    prefix: &mut Vec<String>,
    out: &mut Vec<KeyPath>,
) {
    for (key, node) in children {
        prefix.push(key.clone());
        match node {
            Node::Branch(next) => collect_leaf_paths(next, prefix, out),
            Node::Text(_) | Node::Plural(_) | Node::List(_) | Node::Record(_) => {
                if let Some(path) = KeyPath::from_segments(prefix.iter().cloned()) {
                    out.push(path);
                }
            }
        }
        prefix.pop();
    }
}

fn count_leaves(children: &BTreeMap<String, Node>) -> usize {
    children
        .values()
        .map(|node| match node {
            Node::Branch(next) => count_leaves(next),
            Node::Text(_) | Node::Plural(_) | Node::List(_) | Node::Record(_) => 1,
        })
        .sum()
}
