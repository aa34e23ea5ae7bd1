//! Process-wide resolver for the `global` feature.
//!
//! Provides shared access to one `Resolver` instance, removing the need to
//! pass `&Resolver` through every layer that renders a string.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::runtime::{LoadError, ResolveError};
use crate::{LocaleId, Resolved, Resolver, Variables};

static GLOBAL_RESOLVER: LazyLock<ArcSwap<Resolver>> =
    LazyLock::new(|| ArcSwap::from_pointee(Resolver::new()));

/// Replace the global resolver, e.g. with one built with custom fallbacks.
///
/// Bundles loaded into the previous resolver are not carried over, and a
/// `load_bundle` racing with `install` may land in the discarded instance.
/// Install once at startup, then load bundles.
pub fn install(resolver: Resolver) {
    GLOBAL_RESOLVER.store(Arc::new(resolver));
}

/// The current global resolver.
pub fn resolver() -> Arc<Resolver> {
    GLOBAL_RESOLVER.load_full()
}

/// Load a JSON bundle into the global resolver.
pub fn load_bundle(locale: &LocaleId, json: &str) -> Result<usize, LoadError> {
    GLOBAL_RESOLVER.load().load_bundle(locale, json)
}

/// Resolve a key with the global resolver.
pub fn resolve(
    locale: &str,
    key: &str,
    variables: &Variables,
    count: Option<u64>,
) -> Result<Resolved, ResolveError> {
    GLOBAL_RESOLVER.load().resolve(locale, key, variables, count)
}
