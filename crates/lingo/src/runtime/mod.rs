//! Bundle storage and key resolution.

mod context;
mod error;
mod fallback;
mod interpolate;
mod plural;
mod resolver;
mod validate;

pub use context::ResolveContext;
pub use error::{LoadError, LoadWarning, ResolveError, ResolveWarning, compute_suggestions};
pub use fallback::FallbackChain;
pub use interpolate::{interpolate, render};
pub use plural::{plural_categories, plural_category};
pub use resolver::{MissingKeyPolicy, Resolver};
pub use validate::{Coverage, validate_bundle};
