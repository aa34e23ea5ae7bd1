//! JSON bundle parser.
//!
//! Converts nested JSON objects into a typed [`Node`] tree:
//!
//! - string: a `Text` message
//! - array of strings, or object keyed only by decimal indices: a `List`
//! - object keyed only by plural form names: a `Plural`
//! - object whose keys are among `code`/`message`/`description` and include
//!   `message`: a `Record`
//! - any other object: a `Branch`, in which `name_one`/`name_other`/
//!   `name_plural`-style siblings are folded into a `Plural` stored at `name`
//!
//! Numbers, booleans, `null`, empty keys and keys containing `.` or `:` are
//! rejected with the offending key path.

use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};

use super::ast::Template;
use super::error::ParseError;
use super::template::parse_template;
use crate::types::{
    Bundle, KEY_SEPARATOR, NAMESPACE_SEPARATOR, Node, PluralForm, PluralForms, RECORD_FIELDS,
    split_plural_suffix,
};

/// Parse a JSON document into a bundle.
pub fn parse_bundle(input: &str) -> Result<Bundle, ParseError> {
    let value: JsonValue = serde_json::from_str(input)?;
    parse_bundle_value(&value)
}

/// Convert a parsed JSON value into a bundle.
pub fn parse_bundle_value(value: &JsonValue) -> Result<Bundle, ParseError> {
    let JsonValue::Object(map) = value else {
        return Err(ParseError::malformed(&[], "bundle root must be an object"));
    };
    let mut path = Vec::new();
    let root = branch(map, &mut path)?;
    Ok(Bundle::from_root(root))
}

/// Reject keys that cannot be addressed by a key path.
pub(crate) fn validate_key(key: &str, path: &[String]) -> Result<(), ParseError> {
    if key.is_empty() {
        return Err(ParseError::malformed(path, "empty key"));
    }
    if key.contains(KEY_SEPARATOR) || key.contains(NAMESPACE_SEPARATOR) {
        return Err(ParseError::malformed(
            path,
            format!("key '{key}' contains a path separator"),
        ));
    }
    Ok(())
}

fn node(value: &JsonValue, path: &mut Vec<String>) -> Result<Node, ParseError> {
    match value {
        JsonValue::String(text) => Ok(Node::Text(parse_template(text))),
        JsonValue::Array(items) => array_list(items, path).map(Node::List),
        JsonValue::Object(map) => object(map, path),
        JsonValue::Null => Err(ParseError::malformed(path, "null is not a message")),
        JsonValue::Bool(_) => Err(ParseError::malformed(path, "boolean is not a message")),
        JsonValue::Number(_) => Err(ParseError::malformed(
            path,
            "number is not a message; quote it as a string",
        )),
    }
}

fn array_list(items: &[JsonValue], path: &[String]) -> Result<Vec<Template>, ParseError> {
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(parse_template)
                .ok_or_else(|| ParseError::malformed(path, "list items must be strings"))
        })
        .collect()
}

fn object(map: &Map<String, JsonValue>, path: &mut Vec<String>) -> Result<Node, ParseError> {
    if !map.is_empty() && map.values().all(JsonValue::is_string) {
        if let Some(items) = indexed_list(map, path)? {
            return Ok(Node::List(items));
        }
        if let Some(forms) = plural_object(map) {
            return Ok(Node::Plural(forms));
        }
        if let Some(fields) = record(map) {
            return Ok(Node::Record(fields));
        }
    }
    branch(map, path).map(Node::Branch)
}

/// `{ "0": "…", "1": "…" }`, ordered by numeric index.
fn indexed_list(
    map: &Map<String, JsonValue>,
    path: &mut Vec<String>,
) -> Result<Option<Vec<Template>>, ParseError> {
    let all_indices = map
        .keys()
        .all(|key| !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()));
    if !all_indices {
        return Ok(None);
    }

    let mut indexed = BTreeMap::new();
    for (key, value) in map {
        let (Ok(index), Some(text)) = (key.parse::<usize>(), value.as_str()) else {
            return Ok(None);
        };
        if indexed.insert(index, parse_template(text)).is_some() {
            path.push(key.clone());
            let err = ParseError::malformed(path, "list index defined twice");
            path.pop();
            return Err(err);
        }
    }
    Ok(Some(indexed.into_values().collect()))
}

/// `{ "one": "…", "other": "…" }`.
fn plural_object(map: &Map<String, JsonValue>) -> Option<PluralForms> {
    let mut forms = BTreeMap::new();
    for (key, value) in map {
        let form = PluralForm::from_name(key)?;
        forms.insert(form, parse_template(value.as_str()?));
    }
    Some(PluralForms::new(forms))
}

/// `{ "message": "…", "description": "…" }`.
fn record(map: &Map<String, JsonValue>) -> Option<BTreeMap<String, Template>> {
    if !map.contains_key("message") || !map.keys().all(|k| RECORD_FIELDS.contains(&k.as_str())) {
        return None;
    }
    map.iter()
        .map(|(key, value)| Some((key.clone(), parse_template(value.as_str()?))))
        .collect()
}

fn branch(
    map: &Map<String, JsonValue>,
    path: &mut Vec<String>,
) -> Result<BTreeMap<String, Node>, ParseError> {
    let mut children = BTreeMap::new();
    let mut plural_groups: BTreeMap<String, BTreeMap<PluralForm, Template>> = BTreeMap::new();

    for (key, value) in map {
        path.push(key.clone());
        validate_key(key, path)?;

        if let (Some((base, form)), Some(text)) = (split_plural_suffix(key), value.as_str()) {
            // Only fold when the unsuffixed sibling is absent or a plain string.
            if map.get(base).is_none_or(JsonValue::is_string) {
                plural_groups
                    .entry(base.to_string())
                    .or_default()
                    .insert(form, parse_template(text));
                path.pop();
                continue;
            }
        }

        let child = node(value, path)?;
        path.pop();
        children.insert(key.clone(), child);
    }

    for (base, forms) in plural_groups {
        let mut plural = PluralForms::new(forms);
        if let Some(Node::Text(template)) = children.remove(&base) {
            plural = plural.with_base(template);
        }
        children.insert(base, Node::Plural(plural));
    }

    Ok(children)
}
