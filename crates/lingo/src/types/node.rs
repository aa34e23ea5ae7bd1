use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::parser::Template;

/// Field names that mark a string-valued object as a notification record.
pub const RECORD_FIELDS: &[&str] = &["code", "message", "description"];

/// A plural variant name.
///
/// The six CLDR categories plus the `singular`/`plural` pair used by older
/// bundles. `Singular` is looked up for CLDR `one`, `Plural` for everything
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralForm {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
    Singular,
    Plural,
}

impl PluralForm {
    /// The six CLDR cardinal categories.
    pub const CLDR: [PluralForm; 6] = [
        PluralForm::Zero,
        PluralForm::One,
        PluralForm::Two,
        PluralForm::Few,
        PluralForm::Many,
        PluralForm::Other,
    ];

    /// Parse a variant name as written in bundles.
    pub fn from_name(name: &str) -> Option<PluralForm> {
        match name {
            "zero" => Some(PluralForm::Zero),
            "one" => Some(PluralForm::One),
            "two" => Some(PluralForm::Two),
            "few" => Some(PluralForm::Few),
            "many" => Some(PluralForm::Many),
            "other" => Some(PluralForm::Other),
            "singular" => Some(PluralForm::Singular),
            "plural" => Some(PluralForm::Plural),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PluralForm::Zero => "zero",
            PluralForm::One => "one",
            PluralForm::Two => "two",
            PluralForm::Few => "few",
            PluralForm::Many => "many",
            PluralForm::Other => "other",
            PluralForm::Singular => "singular",
            PluralForm::Plural => "plural",
        }
    }

    /// Whether this is one of the six CLDR categories.
    pub fn is_cldr(self) -> bool {
        !matches!(self, PluralForm::Singular | PluralForm::Plural)
    }
}

impl Display for PluralForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Split `name_other` into `("name", Other)`.
pub fn split_plural_suffix(key: &str) -> Option<(&str, PluralForm)> {
    let (base, suffix) = key.rsplit_once('_')?;
    if base.is_empty() {
        return None;
    }
    PluralForm::from_name(suffix).map(|form| (base, form))
}

/// The variants of a plural-capable message.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use lingo::{PluralForm, PluralForms};
/// use lingo::parser::parse_template;
///
/// let forms = PluralForms::new(BTreeMap::from([
///     (PluralForm::One, parse_template("{{count}} item")),
///     (PluralForm::Other, parse_template("{{count}} items")),
/// ]));
///
/// assert_eq!(forms.select(PluralForm::One).unwrap().to_string(), "{{count}} item");
/// assert_eq!(forms.select(PluralForm::Few).unwrap().to_string(), "{{count}} items");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluralForms {
    base: Option<Template>,
    forms: BTreeMap<PluralForm, Template>,
}

impl PluralForms {
    pub fn new(forms: BTreeMap<PluralForm, Template>) -> Self {
        PluralForms { base: None, forms }
    }

    /// Attach the unsuffixed sibling (`name` next to `name_plural`).
    pub fn with_base(mut self, base: Template) -> Self {
        self.base = Some(base);
        self
    }

    pub fn base(&self) -> Option<&Template> {
        self.base.as_ref()
    }

    pub fn form(&self, form: PluralForm) -> Option<&Template> {
        self.forms.get(&form)
    }

    /// Explicit variants in form order (the base is not included).
    pub fn forms(&self) -> impl Iterator<Item = (PluralForm, &Template)> {
        self.forms.iter().map(|(form, template)| (*form, template))
    }

    /// Pick the variant for a CLDR category.
    ///
    /// For `one`: `one`, `singular`, base, `other`, `plural`. For any other
    /// category `c`: `c`, `other`, `plural`, base.
    pub fn select(&self, category: PluralForm) -> Option<&Template> {
        let order: &[Option<PluralForm>] = match category {
            PluralForm::One | PluralForm::Singular => &[
                Some(PluralForm::One),
                Some(PluralForm::Singular),
                None,
                Some(PluralForm::Other),
                Some(PluralForm::Plural),
            ],
            PluralForm::Plural => &[
                Some(PluralForm::Other),
                Some(PluralForm::Plural),
                None,
            ],
            PluralForm::Zero
            | PluralForm::Two
            | PluralForm::Few
            | PluralForm::Many
            | PluralForm::Other => &[
                Some(category),
                Some(PluralForm::Other),
                Some(PluralForm::Plural),
                None,
            ],
        };
        self.first_available(order)
    }

    /// The variant used when no count is supplied: base, `other`, `plural`,
    /// `one`, `singular`.
    pub fn default_form(&self) -> Option<&Template> {
        self.first_available(&[
            None,
            Some(PluralForm::Other),
            Some(PluralForm::Plural),
            Some(PluralForm::One),
            Some(PluralForm::Singular),
        ])
    }

    /// `None` in `order` stands for the base form.
    fn first_available(&self, order: &[Option<PluralForm>]) -> Option<&Template> {
        order.iter().find_map(|slot| match slot {
            Some(form) => self.forms.get(form),
            None => self.base.as_ref(),
        })
    }

    fn templates(&self) -> impl Iterator<Item = &Template> {
        self.base.iter().chain(self.forms.values())
    }
}

/// The shape of a node, used in validation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Text,
    Plural,
    List,
    Record,
    Branch,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            NodeKind::Text => "text",
            NodeKind::Plural => "plural",
            NodeKind::List => "list",
            NodeKind::Record => "record",
            NodeKind::Branch => "branch",
        };
        f.write_str(name)
    }
}

/// A node in a bundle tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A message, possibly with placeholders.
    Text(Template),
    /// Plural variants of one message.
    Plural(PluralForms),
    /// Ordered message fragments (`{0: …, 1: …}`).
    List(Vec<Template>),
    /// A structured notification payload (`{ message, description }`).
    Record(BTreeMap<String, Template>),
    /// A feature area containing further nodes.
    Branch(BTreeMap<String, Node>),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::Plural(_) => NodeKind::Plural,
            Node::List(_) => NodeKind::List,
            Node::Record(_) => NodeKind::Record,
            Node::Branch(_) => NodeKind::Branch,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::Branch(_))
    }

    /// Templates held directly by this node. Empty for branches.
    pub fn templates(&self) -> Vec<&Template> {
        match self {
            Node::Text(template) => vec![template],
            Node::Plural(forms) => forms.templates().collect(),
            Node::List(items) => items.iter().collect(),
            Node::Record(fields) => fields.values().collect(),
            Node::Branch(_) => Vec::new(),
        }
    }

    /// Distinct placeholder names used by this node's templates.
    pub fn placeholders(&self) -> BTreeSet<&str> {
        self.templates()
            .into_iter()
            .flat_map(Template::placeholders)
            .collect()
    }

    /// Address a member of a leaf: a list index, a record field or a plural
    /// variant.
    pub(crate) fn member(&self, segment: &str) -> Option<&Template> {
        match self {
            Node::List(items) => {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                segment.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            Node::Record(fields) => fields.get(segment),
            Node::Plural(forms) => PluralForm::from_name(segment).and_then(|f| forms.form(f)),
            Node::Text(_) | Node::Branch(_) => None,
        }
    }
}

/// The result of looking up a key path in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// The path names a whole node.
    Node(&'a Node),
    /// The path names one template inside a leaf (`subtitles.0`,
    /// `success.message`, `emails_other`).
    Template(&'a Template),
}

impl Entry<'_> {
    pub fn is_leaf(&self) -> bool {
        match self {
            Entry::Node(node) => node.is_leaf(),
            Entry::Template(_) => true,
        }
    }
}
