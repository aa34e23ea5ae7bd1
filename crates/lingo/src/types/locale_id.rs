use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use icu_locale_core::LanguageIdentifier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An identifier that could not be parsed as a BCP-47 language tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid locale identifier '{tag}': {message}")]
pub struct LocaleError {
    pub tag: String,
    pub message: String,
}

/// A canonical language/region tag such as `fr-FR` or `si-LK`.
///
/// Tags are validated through ICU and stored in canonical form, so `fr_fr`,
/// `FR-fr` and `fr-FR` all name the same locale.
///
/// # Example
///
/// ```
/// use lingo::LocaleId;
///
/// let locale: LocaleId = "fr_fr".parse().unwrap();
/// assert_eq!(locale.as_str(), "fr-FR");
/// assert_eq!(locale.language(), "fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId {
    tag: String,
    language: String,
}

impl LocaleId {
    /// Parse and canonicalise a language tag.
    pub fn parse(tag: &str) -> Result<LocaleId, LocaleError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(LocaleError {
                tag: tag.to_string(),
                message: "empty tag".to_string(),
            });
        }
        let id: LanguageIdentifier =
            trimmed
                .replace('_', "-")
                .parse()
                .map_err(|e| LocaleError {
                    tag: tag.to_string(),
                    message: format!("{e}"),
                })?;
        Ok(LocaleId {
            tag: id.to_string(),
            language: id.language.as_str().to_string(),
        })
    }

    /// The canonical tag, e.g. `"fr-FR"`.
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// The primary language subtag, e.g. `"fr"` for `fr-FR`.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Less specific tags obtained by dropping trailing subtags, most specific
    /// first: `zh-Hans-CN` yields `zh-Hans` then `zh`.
    pub fn parents(&self) -> Vec<LocaleId> {
        let mut parents = Vec::new();
        let mut current = self.tag.as_str();
        while let Some(pos) = current.rfind('-') {
            current = &current[..pos];
            // A single-character subtag is an extension singleton, never a
            // standalone tag.
            if current.rsplit('-').next().is_some_and(|s| s.len() == 1) {
                continue;
            }
            if let Ok(parent) = LocaleId::parse(current) {
                parents.push(parent);
            }
        }
        parents
    }

    /// The ICU identifier for this tag.
    pub fn to_icu(&self) -> LanguageIdentifier {
        self.tag
            .parse()
            .unwrap_or(LanguageIdentifier::UNKNOWN)
    }
}

/// `en-US`, the conventional completeness baseline.
impl Default for LocaleId {
    fn default() -> Self {
        LocaleId {
            tag: "en-US".to_string(),
            language: "en".to_string(),
        }
    }
}

impl FromStr for LocaleId {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocaleId::parse(s)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = LocaleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        LocaleId::parse(&s)
    }
}

impl From<LocaleId> for String {
    fn from(locale: LocaleId) -> Self {
        locale.tag
    }
}

impl Display for LocaleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.tag)
    }
}
