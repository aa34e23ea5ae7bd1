//! Placeholder substitution and leaf rendering.

use std::collections::BTreeMap;

use tracing::warn;

use crate::parser::{Segment, Template};
use crate::runtime::context::ResolveContext;
use crate::runtime::error::ResolveWarning;
use crate::runtime::plural::plural_category;
use crate::types::{Entry, LocaleId, Node, Resolved};

/// Variable name filled from the plural count when the caller gives none.
const COUNT_VARIABLE: &str = "count";

/// Substitute placeholders in a template.
///
/// A placeholder with no value is emitted exactly as written and recorded
/// as a `MissingVariable` warning.
pub fn interpolate(template: &Template, ctx: &mut ResolveContext<'_>) -> String {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Placeholder { name, raw } => {
                if let Some(value) = ctx.variable(name) {
                    output.push_str(&value.to_string());
                } else if let (COUNT_VARIABLE, Some(count)) = (name.as_str(), ctx.count()) {
                    output.push_str(&count.to_string());
                } else {
                    warn!(key = %ctx.key(), variable = %name, "missing interpolation variable");
                    output.push_str(raw);
                    ctx.add_warning(ResolveWarning::MissingVariable {
                        key: ctx.key().to_string(),
                        variable: name.clone(),
                    });
                }
            }
        }
    }
    output
}

/// Render a looked-up entry for the locale that supplied it.
///
/// Returns `None` for branches, which are not leaves.
pub fn render(entry: Entry<'_>, locale: &LocaleId, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
    let node = match entry {
        Entry::Template(template) => return Some(Resolved::Text(interpolate(template, ctx))),
        Entry::Node(node) => node,
    };

    match node {
        Node::Text(template) => Some(Resolved::Text(interpolate(template, ctx))),
        Node::Plural(forms) => {
            let template = match ctx.count() {
                Some(n) => forms.select(plural_category(locale, n)),
                None => forms.default_form(),
            }?;
            Some(Resolved::Text(interpolate(template, ctx)))
        }
        Node::List(items) => Some(Resolved::List(
            items.iter().map(|item| interpolate(item, ctx)).collect(),
        )),
        Node::Record(fields) => {
            let mut rendered = BTreeMap::new();
            for (name, template) in fields {
                rendered.insert(name.clone(), interpolate(template, ctx));
            }
            Some(Resolved::Record(rendered))
        }
        Node::Branch(_) => None,
    }
}
