//! Implementation of the `lingo resolve` command.

use std::path::PathBuf;

use clap::Args;
use lingo::{LocaleId, Resolved, ResolveWarning, Resolver, Value, Variables};
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::load_error_report;

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Directory of `<locale>.json` bundles and `<locale>/` namespace directories
    #[arg(long)]
    pub dir: PathBuf,

    /// Requested locale (e.g., si-LK)
    #[arg(long)]
    pub locale: String,

    /// Key path (e.g., console:applicationRoles.heading)
    #[arg(long)]
    pub key: String,

    /// Variable in name=value format (can be repeated)
    #[arg(short = 'p', long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, Value)>,

    /// Count used for plural selection
    #[arg(long)]
    pub count: Option<u64>,

    /// Locale at the end of every fallback chain
    #[arg(long, env = "LINGO_DEFAULT_LOCALE", default_value = "en-US")]
    pub default_locale: LocaleId,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for a resolution.
#[derive(Debug, Serialize)]
struct ResolveJson<'a> {
    fallback_chain: Vec<String>,
    result: &'a Resolved,
    warnings: &'a [ResolveWarning],
}

/// Parse `name=value`; integers and floats become numbers, anything else a string.
fn parse_key_val(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=value: no '=' found in '{s}'"))?;
    let value = if let Ok(n) = value.parse::<i64>() {
        Value::Number(n)
    } else if let Ok(f) = value.parse::<f64>() {
        Value::Float(f)
    } else {
        Value::String(value.to_string())
    };
    Ok((key.to_string(), value))
}

/// Run the resolve command.
pub fn run_resolve(args: ResolveArgs) -> Result<i32> {
    let resolver = Resolver::builder()
        .default_locale(args.default_locale.clone())
        .build();
    let locales = resolver.load_dir(&args.dir).map_err(load_error_report)?;
    if locales.is_empty() {
        return Err(miette!("No bundles found in {}", args.dir.display()));
    }

    let variables: Variables = args.vars.into_iter().collect();
    let (resolved, warnings) = match resolver.resolve_with_warnings(
        &args.locale,
        &args.key,
        &variables,
        args.count,
    ) {
        Ok(result) => result,
        Err(e) => {
            let label = "error".if_supports_color(Stream::Stderr, |t| t.red());
            eprintln!("{label}: {e}");
            return Ok(exitcode::DATAERR);
        }
    };

    if args.json {
        let output = ResolveJson {
            fallback_chain: resolver
                .fallback_chain(&args.locale)
                .iter()
                .map(ToString::to_string)
                .collect(),
            result: &resolved,
            warnings: &warnings,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        print_resolved(&resolved);
        for warning in &warnings {
            let label = "warning".if_supports_color(Stream::Stderr, |t| t.yellow());
            eprintln!("{label}: {warning}");
        }
    }

    if resolved.is_missing() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn print_resolved(resolved: &Resolved) {
    match resolved {
        Resolved::Text(text) | Resolved::Missing(text) => println!("{text}"),
        Resolved::List(items) => {
            for item in items {
                println!("- {item}");
            }
        }
        Resolved::Record(fields) => {
            for (name, value) in fields {
                let name = name.if_supports_color(Stream::Stdout, |t| t.bold());
                println!("{name}: {value}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_val_detects_numbers() {
        assert_eq!(
            parse_key_val("count=3").unwrap(),
            ("count".to_string(), Value::Number(3))
        );
        assert_eq!(
            parse_key_val("ratio=0.5").unwrap(),
            ("ratio".to_string(), Value::Float(0.5))
        );
        assert_eq!(
            parse_key_val("name=a=b").unwrap(),
            ("name".to_string(), Value::String("a=b".to_string()))
        );
        assert!(parse_key_val("name").is_err());
    }
}
