//! CLDR plural category resolution.
//!
//! Different languages have different plural rules. English has "one" and
//! "other" (0 is plural), French and Sinhala put 0 and 1 in "one", Russian
//! has "one", "few", "many" and "other", and Arabic uses all six categories.
//!
//! Plural rules are cached per thread per locale tag to avoid re-creating
//! `PluralRules` instances on every call. If ICU cannot build rules for a
//! locale, the two-form rule applies: exactly 1 is "one", everything else is
//! "other".

use std::cell::RefCell;
use std::collections::HashMap;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::types::{LocaleId, PluralForm};

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by canonical locale tag.
    /// `None` records a locale whose rules could not be built.
    static PLURAL_RULES_CACHE: RefCell<HashMap<String, Option<PluralRules>>> =
        RefCell::new(HashMap::new());
}

/// Build cardinal `PluralRules` for a locale.
fn build_rules(locale: &LocaleId) -> Option<PluralRules> {
    let loc = Locale::from(locale.to_icu());
    PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into()).ok()
}

/// Translate a `PluralCategory` to the matching variant name.
fn category_form(category: PluralCategory) -> PluralForm {
    match category {
        PluralCategory::Zero => PluralForm::Zero,
        PluralCategory::One => PluralForm::One,
        PluralCategory::Two => PluralForm::Two,
        PluralCategory::Few => PluralForm::Few,
        PluralCategory::Many => PluralForm::Many,
        PluralCategory::Other => PluralForm::Other,
    }
}

fn two_form_rule(n: u64) -> PluralForm {
    if n == 1 {
        PluralForm::One
    } else {
        PluralForm::Other
    }
}

fn with_rules<T>(locale: &LocaleId, f: impl FnOnce(Option<&PluralRules>) -> T) -> T {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if !cache.contains_key(locale.as_str()) {
            cache.insert(locale.as_str().to_string(), build_rules(locale));
        }
        f(cache.get(locale.as_str()).and_then(Option::as_ref))
    })
}

/// Get the CLDR plural category for a count in a given locale.
///
/// Always returns one of the six CLDR forms.
///
/// # Examples
///
/// ```
/// use lingo::{LocaleId, PluralForm};
/// use lingo::runtime::plural_category;
///
/// let en: LocaleId = "en-US".parse().unwrap();
/// assert_eq!(plural_category(&en, 1), PluralForm::One);
/// assert_eq!(plural_category(&en, 0), PluralForm::Other);
///
/// let fr: LocaleId = "fr-FR".parse().unwrap();
/// assert_eq!(plural_category(&fr, 0), PluralForm::One);
/// ```
pub fn plural_category(locale: &LocaleId, n: u64) -> PluralForm {
    with_rules(locale, |rules| match rules {
        Some(rules) => category_form(rules.category_for(n)),
        None => two_form_rule(n),
    })
}

/// The CLDR categories a locale's cardinal rules can produce, in form order.
pub fn plural_categories(locale: &LocaleId) -> Vec<PluralForm> {
    with_rules(locale, |rules| match rules {
        Some(rules) => {
            let mut forms: Vec<PluralForm> = rules.categories().map(category_form).collect();
            forms.sort();
            forms
        }
        None => vec![PluralForm::One, PluralForm::Other],
    })
}
