use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use crm_filter_core::catalog::FieldCatalog;
use serde_json::json;

use crate::loader::Report;

/// Output mode for rendering a filter run.
pub enum OutputMode {
    /// Human-readable table.
    Pretty,
    /// Machine-parseable JSON (a single object on stdout).
    Json,
}

/// Render `report` in the given mode.
pub fn render(report: &Report, catalog: &FieldCatalog, mode: &OutputMode) -> String {
    match mode {
        OutputMode::Pretty => render_pretty(report, catalog),
        OutputMode::Json => json!({
            "description": report.description,
            "total": report.total,
            "count": report.matched.len(),
            "items": report.matched,
        })
        .to_string(),
    }
}

/// Render only the filter description.
pub fn render_description(report: &Report, mode: &OutputMode) -> String {
    match mode {
        OutputMode::Pretty => report.description.clone(),
        OutputMode::Json => json!({"description": report.description}).to_string(),
    }
}

fn render_pretty(report: &Report, catalog: &FieldCatalog) -> String {
    let mut out = format!(
        "Filter: {}\n{} of {} contact(s) match\n",
        report.description,
        report.matched.len(),
        report.total
    );
    if report.projected.is_empty() {
        return out;
    }

    // Only show columns that carry a value for at least one match.
    let columns: Vec<_> = catalog
        .fields()
        .iter()
        .filter(|field| report.projected.iter().any(|p| !p.get(&field.key).is_empty()))
        .collect();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(columns.iter().map(|field| field.label.as_str()));
    for projected in &report.projected {
        table.add_row(columns.iter().map(|field| projected.get(&field.key)));
    }

    out.push_str(&table.to_string());
    out.push('\n');
    out
}
