//! Coverage command implementation.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::Args;
use lingo::{Bundle, Coverage, LocaleId, Resolver};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use tracing::{debug, info};

use crate::output::load_error_report;
use crate::output::table::{LocaleCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Baseline bundle (e.g., en-US.json). Its file name is the baseline locale.
    #[arg(long)]
    pub baseline: PathBuf,

    /// Locales to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Directory containing `<locale>.json` files or `<locale>/` namespace
    /// directories. Defaults to the baseline's directory.
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson<'a> {
    locale: &'a str,
    #[serde(flatten)]
    coverage: &'a Coverage,
    percent: f64,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let baseline_locale = args
        .baseline
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| miette!("Baseline {:?} has no file name", args.baseline))?
        .parse::<LocaleId>()
        .into_diagnostic()?;

    let resolver = Resolver::builder()
        .default_locale(baseline_locale.clone())
        .build();
    resolver
        .load_bundle_file(&baseline_locale, &args.baseline)
        .map_err(load_error_report)?;

    let base_dir = args
        .translations
        .clone()
        .or_else(|| args.baseline.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut rows = Vec::new();
    for lang in &args.lang {
        let locale: LocaleId = lang.parse().into_diagnostic()?;
        load_translation(&resolver, &base_dir, lang, &locale)?;
        let coverage = match resolver.coverage(&locale) {
            Some(coverage) => coverage,
            None => untranslated(&resolver)?,
        };
        rows.push(LocaleCoverage {
            locale: locale.to_string(),
            coverage,
        });
    }

    let any_incomplete = rows.iter().any(|row| !row.coverage.is_complete());

    if args.json {
        let json_data: Vec<CoverageJson<'_>> = rows
            .iter()
            .map(|row| CoverageJson {
                locale: &row.locale,
                coverage: &row.coverage,
                percent: row.coverage.percent(),
            })
            .collect();
        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        println!("{}", format_coverage_table(&rows));
        for row in &rows {
            if !row.coverage.is_complete() {
                println!("\nMissing in {}:", row.locale);
                for key in &row.coverage.missing {
                    println!("  - {key}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Load `<lang>.json` or the `<lang>/` namespace directory, if either exists.
fn load_translation(
    resolver: &Resolver,
    base_dir: &Path,
    lang: &str,
    locale: &LocaleId,
) -> Result<()> {
    let file = base_dir.join(format!("{lang}.json"));
    let dir = base_dir.join(lang);
    let loaded = if file.is_file() {
        resolver.load_bundle_file(locale, &file)
    } else if dir.is_dir() {
        resolver.load_bundle_dir(locale, &dir)
    } else {
        info!(locale = %locale, "no bundle found, counting every key as missing");
        return Ok(());
    };
    let leaves = loaded.map_err(load_error_report)?;
    debug!(locale = %locale, leaves, "loaded translation");
    Ok(())
}

fn untranslated(resolver: &Resolver) -> Result<Coverage> {
    let baseline = resolver
        .bundle(resolver.default_locale())
        .ok_or_else(|| miette!("Baseline bundle is not loaded"))?;
    Ok(Coverage::measure(&baseline, &Bundle::default()))
}
