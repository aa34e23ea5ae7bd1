pub mod parser;
pub mod runtime;
pub mod types;

#[cfg(feature = "global")]
pub mod global;

pub use runtime::{
    Coverage, FallbackChain, LoadError, LoadWarning, MissingKeyPolicy, ResolveError,
    ResolveWarning, Resolver, compute_suggestions,
};
pub use types::{
    Bundle, KeyPath, KeyPathError, LocaleError, LocaleId, Node, NodeKind, PluralForm,
    PluralForms, Resolved, Value, Variables,
};

/// Creates a `Variables` map from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, or strings directly.
///
/// # Example
///
/// ```
/// use lingo::{vars, Value};
///
/// let v = vars! { "count" => 3, "name" => "Alice" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["count"].as_number(), Some(3));
/// assert_eq!(v["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! vars {
    {} => {
        $crate::Variables::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Variables::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
