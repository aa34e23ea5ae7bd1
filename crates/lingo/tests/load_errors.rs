//! Tests for load failures, error messages and suggestions.

use std::io::{self, ErrorKind};
use std::path::PathBuf;

use lingo::{LoadError, LocaleId, NodeKind, ResolveWarning, Resolver, compute_suggestions, vars};
use serde_json::json;

fn en() -> LocaleId {
    "en-US".parse().unwrap()
}

fn load_err(json: &str) -> LoadError {
    Resolver::new().load_bundle(&en(), json).unwrap_err()
}

// =========================================================================
// Error Messages
// =========================================================================

#[test]
fn number_leaf_message() {
    let err = load_err(r#"{ "common": { "limit": 10 } }"#);
    insta::assert_snapshot!(
        err.to_string(),
        @"<en-US>: malformed entry at 'common.limit': number is not a message; quote it as a string"
    );
}

#[test]
fn null_leaf_message() {
    let err = load_err(r#"{ "common": { "save": null } }"#);
    insta::assert_snapshot!(
        err.to_string(),
        @"<en-US>: malformed entry at 'common.save': null is not a message"
    );
}

#[test]
fn separator_in_key_message() {
    let err = load_err(r#"{ "common": { "a.b": "x" } }"#);
    insta::assert_snapshot!(
        err.to_string(),
        @"<en-US>: malformed entry at 'common.a.b': key 'a.b' contains a path separator"
    );
}

#[test]
fn non_object_root_message() {
    let err = load_err(r#""just a string""#);
    insta::assert_snapshot!(
        err.to_string(),
        @"<en-US>: malformed entry at '<root>': bundle root must be an object"
    );
}

#[test]
fn syntax_error_carries_position() {
    let err = load_err("{\n  \"common\": {\n    \"save\": \"Save\",\n  }\n}");
    let LoadError::Parse {
        path, line, column, ..
    } = &err
    else {
        panic!("expected parse error, got {err:?}");
    };
    assert_eq!(path, &PathBuf::from("<en-US>"));
    assert_eq!(*line, 4);
    assert!(*column > 0);
}

#[test]
fn reload_without_path_message() {
    let resolver = Resolver::new();
    let fr: LocaleId = "fr-FR".parse().unwrap();
    resolver.load_bundle(&fr, "{}").unwrap();
    let err = resolver.reload(&fr).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"cannot reload 'fr-FR': was loaded from string, not file"
    );
}

#[test]
fn io_error_displays_path() {
    let err = LoadError::Io {
        path: PathBuf::from("/path/to/en-US.json"),
        source: io::Error::new(ErrorKind::NotFound, "file not found"),
    };
    let msg = err.to_string();
    assert!(msg.contains("/path/to/en-US.json"));
    assert!(msg.contains("file not found"));
}

#[test]
fn invalid_key_path_message() {
    let err = Resolver::new()
        .resolve("en-US", "common..save", &vars! {}, None)
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid key path 'common..save': segment 1 is empty"
    );
}

#[test]
fn missing_key_warning_message() {
    let warning = ResolveWarning::MissingKey {
        key: "common.sav".to_string(),
        locale: "fr-FR".to_string(),
        suggestions: vec!["common.save".to_string()],
    };
    insta::assert_snapshot!(
        warning.to_string(),
        @"missing key 'common.sav' for locale 'fr-FR', did you mean: common.save?"
    );

    let warning = ResolveWarning::MissingKey {
        key: "zzz".to_string(),
        locale: "fr-FR".to_string(),
        suggestions: Vec::new(),
    };
    insta::assert_snapshot!(warning.to_string(), @"missing key 'zzz' for locale 'fr-FR'");
}

#[test]
fn resolve_warnings_serialize_with_kind_tag() {
    let missing_key = ResolveWarning::MissingKey {
        key: "common.sav".to_string(),
        locale: "fr-FR".to_string(),
        suggestions: vec!["common.save".to_string()],
    };
    assert_eq!(
        serde_json::to_value(&missing_key).unwrap(),
        json!({
            "kind": "missing_key",
            "key": "common.sav",
            "locale": "fr-FR",
            "suggestions": ["common.save"]
        })
    );

    let missing_variable = ResolveWarning::MissingVariable {
        key: "common.greeting".to_string(),
        variable: "name".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&missing_variable).unwrap(),
        json!({ "kind": "missing_variable", "key": "common.greeting", "variable": "name" })
    );

    let not_text = ResolveWarning::NotText {
        key: "subtitles".to_string(),
        node_kind: NodeKind::List,
    };
    assert_eq!(
        serde_json::to_value(&not_text).unwrap(),
        json!({ "kind": "not_text", "key": "subtitles", "node_kind": "list" })
    );
    insta::assert_snapshot!(not_text.to_string(), @"'subtitles' is a list, not text");
}

// =========================================================================
// Failed Loads Keep the Previous Bundle
// =========================================================================

#[test]
fn malformed_bundle_leaves_previous_active() {
    let resolver = Resolver::new();
    resolver
        .load_bundle(&en(), r#"{ "common": { "save": "Save" } }"#)
        .unwrap();

    let result = resolver.load_bundle(&en(), r#"{ "common": { "save": 1 } }"#);
    assert!(matches!(result, Err(LoadError::Malformed { .. })));

    let resolved = resolver.resolve("en-US", "common.save", &vars! {}, None);
    assert_eq!(resolved.unwrap().as_text(), Some("Save"));
}

#[test]
fn invalid_json_leaves_previous_active() {
    let resolver = Resolver::new();
    resolver
        .load_bundle(&en(), r#"{ "common": { "save": "Save" } }"#)
        .unwrap();

    assert!(matches!(
        resolver.load_bundle(&en(), "{ not json"),
        Err(LoadError::Parse { .. })
    ));
    assert_eq!(resolver.bundle(&en()).unwrap().len(), 1);
}

// =========================================================================
// Suggestions
// =========================================================================

#[test]
fn compute_suggestions_finds_similar_keys() {
    let available = vec![
        "common.save".to_string(),
        "common.cancel".to_string(),
        "common.close".to_string(),
    ];

    let suggestions = compute_suggestions("common.sve", &available);
    assert_eq!(suggestions, vec!["common.save"]);

    // One edit from "common.close".
    let suggestions = compute_suggestions("common.clse", &available);
    assert_eq!(suggestions[0], "common.close");

    let suggestions = compute_suggestions("settings.title", &available);
    assert!(suggestions.is_empty());
}

#[test]
fn compute_suggestions_short_keys_use_distance_one() {
    let available = vec!["one".to_string(), "two".to_string()];
    assert_eq!(compute_suggestions("on", &available), vec!["one"]);
    assert!(compute_suggestions("tx", &available).is_empty());
}

#[test]
fn compute_suggestions_limits_to_three() {
    let available: Vec<String> = (0..10).map(|i| format!("item{i}")).collect();
    let suggestions = compute_suggestions("item", &available);
    assert_eq!(suggestions.len(), 3);
}
