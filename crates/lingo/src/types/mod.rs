mod bundle;
mod key_path;
mod locale_id;
mod node;
mod resolved;
mod value;

pub use bundle::Bundle;
pub use key_path::{KEY_SEPARATOR, KeyPath, KeyPathError, NAMESPACE_SEPARATOR};
pub use locale_id::{LocaleError, LocaleId};
pub use node::{
    Entry, Node, NodeKind, PluralForm, PluralForms, RECORD_FIELDS, split_plural_suffix,
};
pub use resolved::Resolved;
pub use value::{Value, Variables};
