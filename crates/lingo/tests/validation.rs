//! Tests for baseline validation and coverage.

use lingo::runtime::validate_bundle;
use lingo::{Bundle, KeyPath, LoadWarning, LocaleId, NodeKind, PluralForm, Resolver};

const EN: &str = r#"{
    "common": {
        "save": "Save",
        "greeting": "Hello, {{name}}!"
    },
    "files": { "one": "{{count}} file", "other": "{{count}} files" },
    "subtitles": ["Line one", "Line two"]
}"#;

fn locale(tag: &str) -> LocaleId {
    tag.parse().unwrap()
}

fn resolver(translations: &[(&str, &str)]) -> Resolver {
    let resolver = Resolver::new();
    resolver.load_bundle(&locale("en-US"), EN).unwrap();
    for (tag, json) in translations {
        resolver.load_bundle(&locale(tag), json).unwrap();
    }
    resolver
}

// =========================================================================
// Validation Warnings
// =========================================================================

#[test]
fn complete_translation_has_no_warnings() {
    let fr = r#"{
        "common": { "save": "Enregistrer", "greeting": "Bonjour, {{name}} !" },
        "files": { "one": "{{count}} fichier", "other": "{{count}} fichiers" },
        "subtitles": ["Ligne un", "Ligne deux"]
    }"#;
    let resolver = resolver(&[("fr-FR", fr)]);
    assert!(resolver.validate(&locale("fr-FR")).is_empty());
}

#[test]
fn all_findings_are_reported_in_key_order() {
    let fr = r#"{
        "common": { "save": "Enregistrer", "greeting": "Bonjour, {{nom}} !" },
        "extra": "En trop",
        "files": { "zero": "aucun fichier", "one": "{{count}} fichier", "other": "{{count}} fichiers" },
        "subtitles": "pas une liste"
    }"#;
    let resolver = resolver(&[("fr-FR", fr)]);
    let fr_fr = "fr-FR".to_string();

    assert_eq!(
        resolver.validate(&locale("fr-FR")),
        vec![
            LoadWarning::UnknownPlaceholder {
                key: "common.greeting".to_string(),
                locale: fr_fr.clone(),
                placeholder: "nom".to_string(),
            },
            LoadWarning::UnknownKey {
                key: "extra".to_string(),
                locale: fr_fr.clone(),
            },
            LoadWarning::UnusedPluralForm {
                key: "files".to_string(),
                locale: fr_fr.clone(),
                form: PluralForm::Zero,
            },
            LoadWarning::KindMismatch {
                key: "subtitles".to_string(),
                locale: fr_fr,
                expected: NodeKind::List,
                found: NodeKind::Text,
            },
        ]
    );
}

#[test]
fn key_under_baseline_leaf_is_unknown() {
    let fr = r#"{ "common": { "save": { "short": "OK" } } }"#;
    let resolver = resolver(&[("fr-FR", fr)]);
    assert_eq!(
        resolver.validate(&locale("fr-FR")),
        vec![LoadWarning::UnknownKey {
            key: "common.save.short".to_string(),
            locale: "fr-FR".to_string(),
        }]
    );
}

#[test]
fn plural_forms_used_by_locale_are_accepted() {
    let ru = r#"{ "files": { "one": "файл", "few": "файла", "many": "файлов", "other": "файла" } }"#;
    let resolver = resolver(&[("ru-RU", ru)]);
    assert!(resolver.validate(&locale("ru-RU")).is_empty());
}

#[test]
fn validation_needs_both_bundles() {
    let resolver = resolver(&[]);
    assert!(resolver.validate(&locale("fr-FR")).is_empty());
}

#[test]
fn validate_bundle_works_without_resolver() {
    let baseline = Bundle::from_json_str(r#"{ "a": "A" }"#).unwrap();
    let target = Bundle::from_json_str(r#"{ "a": "A", "b": "B" }"#).unwrap();
    let warnings = validate_bundle(&baseline, &target, &locale("de-DE"));
    assert_eq!(warnings.len(), 1);
    insta::assert_snapshot!(
        warnings[0].to_string(),
        @"'b' in 'de-DE' does not exist in the baseline"
    );
}

// =========================================================================
// Coverage
// =========================================================================

#[test]
fn partial_translation_coverage() {
    let fr = r#"{ "common": { "save": "Enregistrer" } }"#;
    let resolver = resolver(&[("fr-FR", fr)]);
    let coverage = resolver.coverage(&locale("fr-FR")).unwrap();

    assert_eq!(coverage.translated, 1);
    assert_eq!(coverage.total, 4);
    assert!(!coverage.is_complete());
    assert!((coverage.percent() - 25.0).abs() < f64::EPSILON);
    let missing: Vec<KeyPath> = ["common.greeting", "files", "subtitles"]
        .iter()
        .map(|key| KeyPath::parse(key).unwrap())
        .collect();
    assert_eq!(coverage.missing, missing);
}

#[test]
fn baseline_is_fully_covered_by_itself() {
    let resolver = resolver(&[]);
    let coverage = resolver.coverage(&locale("en-US")).unwrap();
    assert!(coverage.is_complete());
    assert_eq!(coverage.translated, coverage.total);
}

#[test]
fn unloaded_locale_has_no_coverage() {
    assert!(resolver(&[]).coverage(&locale("si-LK")).is_none());
}

#[test]
fn translated_placeholder_name_is_unknown() {
    let en = r#"{ "details": "Details: {{ description }}" }"#;
    let si = r#"{ "details": "විස්තර: {{ විස්තර }}" }"#;
    let resolver = Resolver::new();
    resolver.load_bundle(&locale("en-US"), en).unwrap();
    resolver.load_bundle(&locale("si-LK"), si).unwrap();

    assert_eq!(
        resolver.validate(&locale("si-LK")),
        vec![LoadWarning::UnknownPlaceholder {
            key: "details".to_string(),
            locale: "si-LK".to_string(),
            placeholder: "විස්තර".to_string(),
        }]
    );
}
