//! The locale-keyed resource resolver.
//!
//! The Resolver owns one immutable bundle per locale and answers key lookups
//! through a fallback chain.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use bon::Builder;
use tracing::{debug, warn};

use crate::runtime::context::ResolveContext;
use crate::runtime::error::{
    LoadError, LoadWarning, ResolveError, ResolveWarning, compute_suggestions,
};
use crate::runtime::fallback::FallbackChain;
use crate::runtime::interpolate::render;
use crate::runtime::validate::{Coverage, validate_bundle};
use crate::types::{Bundle, KeyPath, LocaleId, NodeKind, Resolved, Variables};

/// What `resolve` returns for a key no locale defines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// The key path exactly as the caller wrote it.
    #[default]
    KeyPath,
    /// A fixed marker string.
    Marker(String),
}

/// The bundles visible to one resolution.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    bundles: BTreeMap<LocaleId, Arc<Bundle>>,
    /// Source paths for reload. Only file- and directory-loaded locales.
    paths: BTreeMap<LocaleId, PathBuf>,
}

/// Resolves dotted key paths to localized strings.
///
/// Bundles live in a shared snapshot that readers load once per call, so
/// loading or reloading a bundle never blocks `resolve` and a resolution
/// never sees a mix of old and new bundle contents. All methods take `&self`;
/// share a Resolver across threads with an `Arc`.
///
/// # Example
///
/// ```
/// use lingo::{Resolved, Resolver, vars};
///
/// let resolver = Resolver::new();
/// resolver.load_bundle(&"en-US".parse().unwrap(), r#"{
///     "common": { "greeting": "Hello, {{name}}!" }
/// }"#).unwrap();
/// resolver.load_bundle(&"fr-FR".parse().unwrap(), r#"{
///     "common": {}
/// }"#).unwrap();
///
/// // fr-FR lacks the key, so the default locale supplies it.
/// let resolved = resolver
///     .resolve("fr-FR", "common.greeting", &vars! { "name" => "Ana" }, None)
///     .unwrap();
/// assert_eq!(resolved, Resolved::Text("Hello, Ana!".to_string()));
/// ```
#[derive(Builder)]
pub struct Resolver {
    /// The completeness baseline and last resort of every fallback chain.
    #[builder(default)]
    default_locale: LocaleId,

    /// Explicit fallbacks tried after a locale and its parents.
    #[builder(default)]
    fallbacks: BTreeMap<LocaleId, Vec<LocaleId>>,

    #[builder(default)]
    missing_key: MissingKeyPolicy,

    #[builder(skip = ArcSwap::from_pointee(Snapshot::default()))]
    state: ArcSwap<Snapshot>,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::builder().build()
    }
}

impl Resolver {
    /// Create a Resolver with `en-US` as the default locale.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_locale(&self) -> &LocaleId {
        &self.default_locale
    }

    pub fn missing_key_policy(&self) -> &MissingKeyPolicy {
        &self.missing_key
    }

    // =========================================================================
    // Bundle Loading
    // =========================================================================

    /// Install an already-built bundle, replacing any bundle for `locale`.
    pub fn install(&self, locale: &LocaleId, bundle: Bundle) {
        self.store(vec![(locale.clone(), bundle, None)]);
    }

    /// Parse a JSON bundle and install it. Returns the number of leaves.
    ///
    /// Bundles loaded this way cannot be reloaded via `reload()`. On error
    /// the previous bundle for `locale` stays active.
    pub fn load_bundle(&self, locale: &LocaleId, json: &str) -> Result<usize, LoadError> {
        let bundle = Bundle::from_json_str(json)
            .map_err(|e| LoadError::from_parse(format!("<{locale}>"), e))?;
        let count = bundle.len();
        self.store(vec![(locale.clone(), bundle, None)]);
        Ok(count)
    }

    /// Read a JSON bundle file and install it, remembering the path for
    /// `reload()`.
    ///
    /// ```ignore
    /// resolver.load_bundle_file(&"si-LK".parse()?, "locales/si-LK.json")?;
    /// ```
    pub fn load_bundle_file(
        &self,
        locale: &LocaleId,
        path: impl AsRef<Path>,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let bundle = read_bundle_file(path)?;
        let count = bundle.len();
        self.store(vec![(locale.clone(), bundle, Some(path.to_path_buf()))]);
        Ok(count)
    }

    /// Load one locale from a directory of `<namespace>.json` files, each
    /// becoming a top-level branch. The directory is remembered for
    /// `reload()`.
    pub fn load_bundle_dir(
        &self,
        locale: &LocaleId,
        dir: impl AsRef<Path>,
    ) -> Result<usize, LoadError> {
        let dir = dir.as_ref();
        let bundle = read_namespace_dir(dir)?;
        let count = bundle.len();
        self.store(vec![(locale.clone(), bundle, Some(dir.to_path_buf()))]);
        Ok(count)
    }

    /// Re-read a locale from the file or directory it was loaded from.
    ///
    /// Returns an error if the bundle was loaded from a string.
    pub fn reload(&self, locale: &LocaleId) -> Result<usize, LoadError> {
        let path = self
            .state
            .load()
            .paths
            .get(locale)
            .cloned()
            .ok_or_else(|| LoadError::NoPathForReload {
                locale: locale.to_string(),
            })?;

        let bundle = if path.is_dir() {
            read_namespace_dir(&path)?
        } else {
            read_bundle_file(&path)?
        };
        let count = bundle.len();
        self.store(vec![(locale.clone(), bundle, Some(path))]);
        Ok(count)
    }

    /// Load every bundle in a directory.
    ///
    /// Each `<locale>.json` file is one bundle. Each `<locale>/` directory is
    /// one bundle whose `<namespace>.json` files become top-level branches.
    /// Hidden entries and non-JSON files are skipped; any other name that is
    /// not a locale is `LoadError::InvalidLocale`. Either every bundle is
    /// installed or, on the first error, none is. Returns the loaded locales
    /// in order.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<LocaleId>, LoadError> {
        let dir = dir.as_ref();
        let mut loaded: BTreeMap<LocaleId, (Bundle, PathBuf)> = BTreeMap::new();

        for path in sorted_entries(dir)? {
            if file_name(&path).starts_with('.') {
                continue;
            }
            let name = if path.is_dir() {
                file_name(&path)
            } else if is_json(&path) {
                file_stem(&path)
            } else {
                continue;
            };
            let locale = LocaleId::parse(&name).map_err(|source| LoadError::InvalidLocale {
                path: path.clone(),
                source,
            })?;
            let bundle = if path.is_dir() {
                read_namespace_dir(&path)?
            } else {
                read_bundle_file(&path)?
            };
            if loaded.contains_key(&locale) {
                return Err(LoadError::Malformed {
                    path,
                    key: "<root>".to_string(),
                    message: format!("locale '{locale}' is defined more than once"),
                });
            }
            loaded.insert(locale, (bundle, path));
        }

        let locales: Vec<LocaleId> = loaded.keys().cloned().collect();
        self.store(
            loaded
                .into_iter()
                .map(|(locale, (bundle, path))| (locale, bundle, Some(path)))
                .collect(),
        );
        Ok(locales)
    }

    /// Publish bundles in one snapshot swap.
    fn store(&self, bundles: Vec<(LocaleId, Bundle, Option<PathBuf>)>) {
        let bundles: Vec<(LocaleId, Arc<Bundle>, Option<PathBuf>)> = bundles
            .into_iter()
            .map(|(locale, bundle, path)| (locale, Arc::new(bundle), path))
            .collect();

        self.state.rcu(|current| {
            let mut next = Snapshot::clone(current);
            for (locale, bundle, path) in &bundles {
                next.bundles.insert(locale.clone(), Arc::clone(bundle));
                match path {
                    Some(path) => next.paths.insert(locale.clone(), path.clone()),
                    None => next.paths.remove(locale),
                };
            }
            next
        });

        for (locale, bundle, path) in &bundles {
            debug!(
                locale = %locale,
                leaves = bundle.len(),
                path = ?path,
                "installed bundle"
            );
        }
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve a key path for a locale.
    ///
    /// Walks the fallback chain for `locale` and renders the first leaf found
    /// at `key`. A key no locale defines yields `Resolved::Missing`; only a
    /// malformed key path is an error.
    pub fn resolve(
        &self,
        locale: &str,
        key: &str,
        variables: &Variables,
        count: Option<u64>,
    ) -> Result<Resolved, ResolveError> {
        self.resolve_with_warnings(locale, key, variables, count)
            .map(|(resolved, _)| resolved)
    }

    /// Like `resolve`, also returning the warnings collected along the way.
    pub fn resolve_with_warnings(
        &self,
        locale: &str,
        key: &str,
        variables: &Variables,
        count: Option<u64>,
    ) -> Result<(Resolved, Vec<ResolveWarning>), ResolveError> {
        let path = KeyPath::parse(key).map_err(|source| ResolveError::InvalidKeyPath {
            path: key.to_string(),
            source,
        })?;
        let requested = self.requested_locale(locale);
        let chain = self.chain_for(&requested);
        let snapshot = self.state.load();
        let mut ctx = ResolveContext::new(&path, variables, count);

        for candidate in &chain {
            let Some(bundle) = snapshot.bundles.get(candidate) else {
                continue;
            };
            let Some(entry) = bundle.get(&path) else {
                continue;
            };
            if let Some(resolved) = render(entry, candidate, &mut ctx) {
                if candidate != &requested {
                    debug!(key = %path, requested = %requested, used = %candidate, "fell back");
                }
                return Ok((resolved, ctx.take_warnings()));
            }
        }

        let suggestions = snapshot
            .bundles
            .get(&self.default_locale)
            .map(|baseline| suggest_keys(baseline, &path))
            .unwrap_or_default();
        let warning = ResolveWarning::MissingKey {
            key: path.to_string(),
            locale: requested.to_string(),
            suggestions,
        };
        warn!("{warning}");
        ctx.add_warning(warning);

        Ok((Resolved::Missing(self.sentinel(key)), ctx.take_warnings()))
    }

    /// Resolve to a plain string.
    ///
    /// Lists, records and invalid key paths degrade to the missing-key
    /// sentinel.
    pub fn text(&self, locale: &str, key: &str, variables: &Variables) -> String {
        let node_kind = match self.resolve(locale, key, variables, None) {
            Ok(Resolved::Text(text) | Resolved::Missing(text)) => return text,
            Ok(Resolved::List(_)) => NodeKind::List,
            Ok(Resolved::Record(_)) => NodeKind::Record,
            Err(e) => {
                warn!("{e}");
                return self.sentinel(key);
            }
        };
        let warning = ResolveWarning::NotText {
            key: key.to_string(),
            node_kind,
        };
        warn!("{warning}");
        self.sentinel(key)
    }

    fn sentinel(&self, key: &str) -> String {
        match &self.missing_key {
            MissingKeyPolicy::KeyPath => key.to_string(),
            MissingKeyPolicy::Marker(marker) => marker.clone(),
        }
    }

    /// Parse the requested locale, falling back to the default when it is
    /// not a valid tag.
    fn requested_locale(&self, locale: &str) -> LocaleId {
        LocaleId::parse(locale).unwrap_or_else(|e| {
            warn!("{e}, using '{}'", self.default_locale);
            self.default_locale.clone()
        })
    }

    fn chain_for(&self, requested: &LocaleId) -> FallbackChain {
        FallbackChain::build(requested, &self.fallbacks, &self.default_locale)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The locales tried, in order, when resolving for `locale`.
    pub fn fallback_chain(&self, locale: &str) -> FallbackChain {
        self.chain_for(&self.requested_locale(locale))
    }

    /// Locales with an installed bundle, in order.
    pub fn loaded_locales(&self) -> Vec<LocaleId> {
        self.state.load().bundles.keys().cloned().collect()
    }

    /// The bundle installed for `locale`.
    pub fn bundle(&self, locale: &LocaleId) -> Option<Arc<Bundle>> {
        self.state.load().bundles.get(locale).cloned()
    }

    /// The file or directory `locale` was loaded from.
    pub fn source_path(&self, locale: &LocaleId) -> Option<PathBuf> {
        self.state.load().paths.get(locale).cloned()
    }

    /// Validate a locale's bundle against the default locale's bundle.
    ///
    /// Returns an empty vector if either bundle is not loaded.
    ///
    /// # Example
    ///
    /// ```
    /// use lingo::{LoadWarning, Resolver};
    ///
    /// let resolver = Resolver::new();
    /// let fr = "fr-FR".parse().unwrap();
    /// resolver.load_bundle(&"en-US".parse().unwrap(), r#"{ "hello": "Hello!" }"#).unwrap();
    /// resolver.load_bundle(&fr, r#"{ "hello": "Bonjour !", "extra": "En trop" }"#).unwrap();
    ///
    /// let warnings = resolver.validate(&fr);
    /// assert_eq!(warnings.len(), 1); // "extra" not in the baseline
    /// assert!(matches!(warnings[0], LoadWarning::UnknownKey { .. }));
    /// ```
    pub fn validate(&self, locale: &LocaleId) -> Vec<LoadWarning> {
        let snapshot = self.state.load();
        let (Some(baseline), Some(target)) = (
            snapshot.bundles.get(&self.default_locale),
            snapshot.bundles.get(locale),
        ) else {
            return Vec::new();
        };
        validate_bundle(baseline, target, locale)
    }

    /// How much of the default locale's bundle `locale` translates.
    ///
    /// Returns `None` if either bundle is not loaded.
    pub fn coverage(&self, locale: &LocaleId) -> Option<Coverage> {
        let snapshot = self.state.load();
        let baseline = snapshot.bundles.get(&self.default_locale)?;
        let target = snapshot.bundles.get(locale)?;
        Some(Coverage::measure(baseline, target))
    }
}

/// Keys near `path` that differ only in its first unmatched segment, drawn
/// from the children of the deepest branch it reaches.
fn suggest_keys(baseline: &Bundle, path: &KeyPath) -> Vec<String> {
    let (depth, children) = baseline.deepest_branch(path);
    let segments = path.segments();
    let Some(target) = segments.get(depth) else {
        return Vec::new();
    };
    let names: Vec<String> = children.keys().cloned().collect();
    compute_suggestions(target, &names)
        .into_iter()
        .map(|name| {
            let mut suggested = segments[..depth].to_vec();
            suggested.push(name);
            suggested.extend_from_slice(&segments[depth + 1..]);
            suggested.join(".")
        })
        .collect()
}

fn read_bundle_file(path: &Path) -> Result<Bundle, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Bundle::from_json_str(&content).map_err(|e| LoadError::from_parse(path, e))
}

/// Build one bundle from a directory of `<namespace>.json` files.
fn read_namespace_dir(dir: &Path) -> Result<Bundle, LoadError> {
    let mut bundle = Bundle::default();
    for path in sorted_entries(dir)? {
        if !path.is_file() || !is_json(&path) {
            continue;
        }
        let namespace = read_bundle_file(&path)?;
        bundle
            .merge_namespace(&file_stem(&path), namespace)
            .map_err(|e| LoadError::from_parse(&path, e))?;
    }
    Ok(bundle)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_error = |source: io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        paths.push(entry.map_err(io_error)?.path());
    }
    paths.sort();
    Ok(paths)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
