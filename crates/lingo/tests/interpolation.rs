//! Tests for placeholder substitution.

use lingo::{LocaleId, ResolveWarning, Resolved, Resolver, Value, vars};

const EN: &str = r#"{
    "greeting": "Hello, {{name}}!",
    "spaced": "Hello, {{ name }}!",
    "unescaped": "Open {{- link}}",
    "total": "{{n}} items cost {{price}}",
    "twice": "{{a}} and {{a}} and {{b}}",
    "braces": "Use {name} or {0} literally",
    "markup": "<1>{{user}}</1> was invited",
    "emails": { "one": "{{count}} email", "other": "{{count}} emails" },
    "steps": ["Create {{thing}}", "Share {{thing}}"]
}"#;

fn resolver() -> Resolver {
    let resolver = Resolver::new();
    let en: LocaleId = "en-US".parse().unwrap();
    resolver.load_bundle(&en, EN).unwrap();
    resolver
}

fn resolve_text(key: &str, vars: &lingo::Variables) -> String {
    let resolved = resolver().resolve("en-US", key, vars, None).unwrap();
    resolved.as_text().unwrap().to_string()
}

#[test]
fn string_variable_is_substituted() {
    assert_eq!(
        resolve_text("greeting", &vars! { "name" => "Ana" }),
        "Hello, Ana!"
    );
}

#[test]
fn whitespace_inside_braces_is_ignored() {
    assert_eq!(resolve_text("spaced", &vars! { "name" => "Ana" }), "Hello, Ana!");
}

#[test]
fn unescaped_marker_is_substituted() {
    assert_eq!(
        resolve_text("unescaped", &vars! { "link" => "<a>docs</a>" }),
        "Open <a>docs</a>"
    );
}

#[test]
fn numbers_are_stringified() {
    assert_eq!(
        resolve_text("total", &vars! { "n" => 3, "price" => 2.5 }),
        "3 items cost 2.5"
    );
}

#[test]
fn single_braces_are_untouched() {
    let (resolved, warnings) = resolver()
        .resolve_with_warnings("en-US", "braces", &vars! { "name" => "x" }, None)
        .unwrap();
    assert_eq!(resolved.as_text(), Some("Use {name} or {0} literally"));
    assert!(warnings.is_empty());
}

#[test]
fn markup_passes_through() {
    assert_eq!(
        resolve_text("markup", &vars! { "user" => "ana@example.com" }),
        "<1>ana@example.com</1> was invited"
    );
}

// =========================================================================
// Missing Variables
// =========================================================================

#[test]
fn missing_variable_is_left_verbatim() {
    let (resolved, warnings) = resolver()
        .resolve_with_warnings("en-US", "spaced", &vars! {}, None)
        .unwrap();
    assert_eq!(resolved.as_text(), Some("Hello, {{ name }}!"));
    assert_eq!(
        warnings,
        vec![ResolveWarning::MissingVariable {
            key: "spaced".to_string(),
            variable: "name".to_string(),
        }]
    );
}

#[test]
fn missing_variable_warnings_are_deduplicated() {
    let (resolved, warnings) = resolver()
        .resolve_with_warnings("en-US", "twice", &vars! {}, None)
        .unwrap();
    assert_eq!(resolved.as_text(), Some("{{a}} and {{a}} and {{b}}"));
    let missing: Vec<&str> = warnings
        .iter()
        .filter_map(|w| match w {
            ResolveWarning::MissingVariable { variable, .. } => Some(variable.as_str()),
            ResolveWarning::MissingKey { .. } | ResolveWarning::NotText { .. } => None,
        })
        .collect();
    assert_eq!(missing, vec!["a", "b"]);
}

#[test]
fn extra_variables_are_ignored() {
    assert_eq!(
        resolve_text("greeting", &vars! { "name" => "Ana", "unused" => 1 }),
        "Hello, Ana!"
    );
}

// =========================================================================
// Count
// =========================================================================

#[test]
fn count_fills_count_placeholder() {
    let resolved = resolver().resolve("en-US", "emails", &vars! {}, Some(3));
    assert_eq!(resolved.unwrap(), Resolved::Text("3 emails".to_string()));
}

#[test]
fn explicit_count_variable_wins() {
    let resolved = resolver().resolve("en-US", "emails", &vars! { "count" => "three" }, Some(3));
    assert_eq!(resolved.unwrap(), Resolved::Text("three emails".to_string()));
}

#[test]
fn count_does_not_fill_other_names() {
    let resolved = resolver().resolve("en-US", "total", &vars! { "price" => "$4" }, Some(2));
    // `n` is not `count`, so it stays verbatim.
    assert_eq!(resolved.unwrap(), Resolved::Text("{{n}} items cost $4".to_string()));
}

// =========================================================================
// Lists
// =========================================================================

#[test]
fn list_items_are_interpolated() {
    let resolved = resolver()
        .resolve("en-US", "steps", &vars! { "thing" => Value::from("a role") }, None)
        .unwrap();
    assert_eq!(
        resolved,
        Resolved::List(vec!["Create a role".to_string(), "Share a role".to_string()])
    );
}

#[test]
fn list_without_variables_is_unchanged() {
    let resolved = resolver().resolve("en-US", "steps", &vars! {}, None).unwrap();
    assert_eq!(
        resolved,
        Resolved::List(vec![
            "Create {{thing}}".to_string(),
            "Share {{thing}}".to_string(),
        ])
    );
}

#[test]
fn non_latin_placeholder_names_are_placeholders() {
    let resolver = Resolver::new();
    let si: LocaleId = "si-LK".parse().unwrap();
    resolver
        .load_bundle(&si, r#"{ "details": "විස්තර: {{ විස්තර }}", "notice": "{{メッセージ}}" }"#)
        .unwrap();

    let (resolved, warnings) = resolver
        .resolve_with_warnings("si-LK", "details", &vars! {}, None)
        .unwrap();
    assert_eq!(resolved, Resolved::Text("විස්තර: {{ විස්තර }}".to_string()));
    assert_eq!(
        warnings,
        vec![ResolveWarning::MissingVariable {
            key: "details".to_string(),
            variable: "විස්තර".to_string(),
        }]
    );

    let resolved = resolver.resolve("si-LK", "notice", &vars! { "メッセージ" => "OK" }, None);
    assert_eq!(resolved.unwrap(), Resolved::Text("OK".to_string()));
}
