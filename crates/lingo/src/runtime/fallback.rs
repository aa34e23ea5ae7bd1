//! Locale fallback chain construction.

use std::collections::BTreeMap;
use std::slice::Iter;

use crate::types::LocaleId;

/// The ordered locales tried when looking up a key.
///
/// Built from the requested locale, its truncation parents, any configured
/// fallbacks for it, then the default locale and its parents. Each locale
/// appears once, at its first position.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use lingo::LocaleId;
/// use lingo::runtime::FallbackChain;
///
/// let requested: LocaleId = "zh-Hans-CN".parse().unwrap();
/// let chain = FallbackChain::build(&requested, &BTreeMap::new(), &LocaleId::default());
/// let tags: Vec<&str> = chain.iter().map(LocaleId::as_str).collect();
/// assert_eq!(tags, ["zh-Hans-CN", "zh-Hans", "zh", "en-US", "en"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    locales: Vec<LocaleId>,
}

impl FallbackChain {
    pub fn build(
        requested: &LocaleId,
        overrides: &BTreeMap<LocaleId, Vec<LocaleId>>,
        default: &LocaleId,
    ) -> FallbackChain {
        let mut chain = FallbackChain { locales: Vec::new() };

        chain.push_with_parents(requested);
        let explicit = overrides
            .get(requested)
            .or_else(|| {
                requested
                    .parents()
                    .iter()
                    .find_map(|parent| overrides.get(parent))
            })
            .map(Vec::as_slice)
            .unwrap_or_default();
        for fallback in explicit {
            chain.push_with_parents(fallback);
        }
        chain.push_with_parents(default);

        chain
    }

    fn push_with_parents(&mut self, locale: &LocaleId) {
        self.push(locale.clone());
        for parent in locale.parents() {
            self.push(parent);
        }
    }

    fn push(&mut self, locale: LocaleId) {
        if !self.locales.contains(&locale) {
            self.locales.push(locale);
        }
    }

    pub fn iter(&self) -> Iter<'_, LocaleId> {
        self.locales.iter()
    }

    pub fn as_slice(&self) -> &[LocaleId] {
        &self.locales
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl<'a> IntoIterator for &'a FallbackChain {
    type Item = &'a LocaleId;
    type IntoIter = Iter<'a, LocaleId>;

    fn into_iter(self) -> Self::IntoIter {
        self.locales.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> LocaleId {
        LocaleId::parse(tag).unwrap()
    }

    fn tags(chain: &FallbackChain) -> Vec<&str> {
        chain.iter().map(LocaleId::as_str).collect()
    }

    #[test]
    fn default_is_not_repeated() {
        let chain = FallbackChain::build(&locale("en-US"), &BTreeMap::new(), &locale("en-US"));
        assert_eq!(tags(&chain), ["en-US", "en"]);
    }

    #[test]
    fn explicit_fallbacks_come_before_default() {
        let overrides = BTreeMap::from([(locale("pt-BR"), vec![locale("pt-PT"), locale("es")])]);
        let chain = FallbackChain::build(&locale("pt-BR"), &overrides, &locale("en-US"));
        assert_eq!(
            tags(&chain),
            ["pt-BR", "pt", "pt-PT", "es", "en-US", "en"]
        );
    }

    #[test]
    fn parent_override_applies_to_regional_tag() {
        let overrides = BTreeMap::from([(locale("si"), vec![locale("ta-LK")])]);
        let chain = FallbackChain::build(&locale("si-LK"), &overrides, &locale("en-US"));
        assert_eq!(tags(&chain), ["si-LK", "si", "ta-LK", "ta", "en-US", "en"]);
    }
}
