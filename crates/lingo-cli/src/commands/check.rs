//! Implementation of the `lingo check` command.

use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use clap::Args;
use lingo::parser::ParseError;
use lingo::runtime::validate_bundle;
use lingo::{Bundle, LoadWarning, LocaleId};
use miette::{IntoDiagnostic, Report, Result, miette};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::BundleDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Bundle files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Compare each file against this baseline bundle. The locale of each
    /// file is taken from its name, e.g. `fr-FR.json`.
    #[arg(long)]
    pub baseline: Option<PathBuf>,
}

/// Result of checking a single file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    warnings: Vec<LoadWarning>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let baseline = args.baseline.as_deref().map(read_baseline).transpose()?;

    let mut reports = Vec::new();
    for path in &args.files {
        let report = check_file(path, baseline.as_ref(), args.json);
        reports.push(report);
    }

    if args.json {
        let output = serde_json::to_string_pretty(&reports).into_diagnostic()?;
        println!("{output}");
    } else {
        print_summary(&reports);
    }

    if reports.iter().any(|report| report.error.is_some()) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn read_baseline(path: &Path) -> Result<Bundle> {
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read baseline {}: {e}", path.display()))?;
    Bundle::from_json_str(&content)
        .map_err(|e| BundleDiagnostic::from_parse_error(path, &content, &e).into())
}

fn check_file(path: &Path, baseline: Option<&Bundle>, quiet: bool) -> FileReport {
    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) => return FileReport::failed(path, format!("failed to read: {e}")),
    };

    let bundle = match Bundle::from_json_str(&content) {
        Ok(bundle) => bundle,
        Err(e) => {
            if !quiet {
                report_parse_error(path, &content, &e);
            }
            return FileReport::failed(path, e.to_string());
        }
    };

    let Some(baseline) = baseline else {
        return FileReport::passed(path, Vec::new());
    };
    match locale_from_file_name(path) {
        Ok(locale) => FileReport::passed(path, validate_bundle(baseline, &bundle, &locale)),
        Err(message) => FileReport::failed(path, message),
    }
}

fn report_parse_error(path: &Path, content: &str, err: &ParseError) {
    let diagnostic = BundleDiagnostic::from_parse_error(path, content, err);
    eprintln!("{:?}", Report::new(diagnostic));
}

fn locale_from_file_name(path: &Path) -> Result<LocaleId, String> {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| format!("'{}' has no file name", path.display()))?;
    stem.parse().map_err(|e| format!("{e}"))
}

fn print_summary(reports: &[FileReport]) {
    for report in reports {
        let path = report.path.display();
        match &report.error {
            Some(error) => {
                let label = "error".if_supports_color(Stream::Stdout, |t| t.red());
                println!("{label} {path}: {error}");
            }
            None => {
                let label = "ok".if_supports_color(Stream::Stdout, |t| t.green());
                println!("{label} {path}");
            }
        }
        for warning in &report.warnings {
            let label = "warning".if_supports_color(Stream::Stdout, |t| t.yellow());
            println!("  {label} {warning}");
        }
    }
}

impl FileReport {
    fn passed(path: &Path, warnings: Vec<LoadWarning>) -> Self {
        FileReport {
            path: path.to_path_buf(),
            error: None,
            warnings,
        }
    }

    fn failed(path: &Path, error: String) -> Self {
        FileReport {
            path: path.to_path_buf(),
            error: Some(error),
            warnings: Vec::new(),
        }
    }
}
