//! Property-based invariant tests for resolution.
//!
//! 1. Text without placeholders resolves to itself.
//! 2. A supplied variable is substituted exactly.
//! 3. An unsupplied placeholder is emitted as written.
//! 4. Resolution is deterministic for any count.
//! 5. Absent keys resolve to the key path.
//! 6. Template display reproduces any source string.
//! 7. Dotted key paths display as written.

use lingo::parser::parse_template;
use lingo::{KeyPath, LocaleId, Resolved, Resolver, vars};
use proptest::prelude::*;
use serde_json::json;

// ── Helpers ─────────────────────────────────────────────────────────────

fn resolver_with(body: &str) -> Resolver {
    let resolver = Resolver::new();
    let en: LocaleId = "en-US".parse().unwrap();
    let bundle = json!({ "props": { "body": body } }).to_string();
    resolver.load_bundle(&en, &bundle).unwrap();
    resolver
}

fn literal_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?<>/'é]{0,40}"
}

fn key_path() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,7}(\\.[a-z][a-zA-Z0-9_]{0,7}){0,3}"
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn literal_text_resolves_to_itself(text in literal_text()) {
        let resolver = resolver_with(&text);
        let resolved = resolver.resolve("en-US", "props.body", &vars! {}, None).unwrap();
        prop_assert_eq!(resolved, Resolved::Text(text));
    }

    #[test]
    fn supplied_variable_is_substituted(
        prefix in literal_text(),
        value in "[a-zA-Z0-9 {}]{0,20}",
    ) {
        let resolver = resolver_with(&format!("{prefix}{{{{name}}}}!"));
        let resolved = resolver
            .resolve("en-US", "props.body", &vars! { "name" => value.as_str() }, None)
            .unwrap();
        prop_assert_eq!(resolved, Resolved::Text(format!("{prefix}{value}!")));
    }

    #[test]
    fn unsupplied_placeholder_is_verbatim(
        name in "[a-z][a-z0-9_]{0,10}",
        pad in " {0,2}",
    ) {
        prop_assume!(name != "count");
        let token = format!("{{{{{pad}{name}{pad}}}}}");
        let resolver = resolver_with(&format!("Hi {token}"));
        let (resolved, warnings) = resolver
            .resolve_with_warnings("en-US", "props.body", &vars! {}, Some(1))
            .unwrap();
        prop_assert_eq!(resolved, Resolved::Text(format!("Hi {token}")));
        prop_assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn resolution_is_deterministic(count in proptest::option::of(0u64..1_000_000)) {
        let resolver = Resolver::new();
        let en: LocaleId = "en-US".parse().unwrap();
        resolver
            .load_bundle(&en, r#"{ "files": { "one": "{{count}} file", "other": "{{count}} files" } }"#)
            .unwrap();
        let first = resolver.resolve("fr-FR", "files", &vars! {}, count).unwrap();
        let second = resolver.resolve("fr-FR", "files", &vars! {}, count).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn absent_key_resolves_to_key_path(key in key_path()) {
        let resolver = resolver_with("present");
        let key = format!("absent.{key}");
        let resolved = resolver.resolve("si-LK", &key, &vars! {}, None).unwrap();
        prop_assert_eq!(resolved, Resolved::Missing(key));
    }

    #[test]
    fn template_display_reproduces_source(source in "[a-z{} -]{0,30}") {
        prop_assert_eq!(parse_template(&source).to_string(), source);
    }

    #[test]
    fn dotted_key_path_round_trips(key in key_path()) {
        let path = KeyPath::parse(&key).unwrap();
        prop_assert_eq!(path.to_string(), key);
    }
}
