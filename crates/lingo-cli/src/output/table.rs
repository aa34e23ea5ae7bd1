//! Table formatting utilities for CLI output.

use comfy_table::{CellAlignment, ContentArrangement, Table, presets};
use lingo::Coverage;

/// Coverage data for a single locale.
pub struct LocaleCoverage {
    /// Locale tag (e.g., "fr-FR", "si-LK").
    pub locale: String,
    pub coverage: Coverage,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(rows: &[LocaleCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Coverage", "Percent", "Missing"]);

    for row in rows {
        let coverage = &row.coverage;
        table.add_row(vec![
            row.locale.clone(),
            format!("{}/{}", coverage.translated, coverage.total),
            format!("{:.1}%", coverage.percent()),
            coverage.missing.len().to_string(),
        ]);
    }
    for index in 1..=3 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}
