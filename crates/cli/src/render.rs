//! Output formatting for the `query` command.

use clap::ValueEnum;
use localpay_core::{Diagnostic, MerchantRecord, QueryOutcome, Selection};
use serde_json::{Value, json};

/// Output format for merchant listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Fixed-width table
    #[default]
    Table,
    /// Merchant records as a JSON array
    Json,
    /// GeoJSON FeatureCollection of merchant points
    Geojson,
}

const PLACEHOLDER: &str = "-";

fn text(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(PLACEHOLDER)
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max).collect::<String>())
    } else {
        value.to_string()
    }
}

/// Render the selected merchants in the requested format.
pub(crate) fn render(format: OutputFormat, outcome: &QueryOutcome, selection: &Selection<'_>) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(outcome, selection)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&selection.records)?),
        OutputFormat::Geojson => Ok(serde_json::to_string_pretty(&geojson(&selection.records))?),
    }
}

/// Header line, one row per merchant, then a count summary.
pub(crate) fn render_table(outcome: &QueryOutcome, selection: &Selection<'_>) -> String {
    let mut out = format!("{:<24}{:<16}{:<11}{:<12}ADDRESS\n", "NAME", "CATEGORY", "LAT", "LON");
    for record in &selection.records {
        out.push_str(&format!(
            "{:<24}{:<16}{:<11.6}{:<12.6}{}\n",
            truncate(text(record.business_name.as_deref()), 20),
            truncate(text(record.category.as_deref()), 12),
            record.latitude,
            record.longitude,
            text(record.road_address.as_deref()),
        ));
    }
    out.push_str(&format!(
        "\n{} of {} merchants in {}{}\n",
        selection.records.len(),
        outcome.result.len(),
        outcome.result.jurisdiction,
        if outcome.cache_hit { " (cached)" } else { "" },
    ));
    out
}

/// Merchants as a GeoJSON FeatureCollection. Positions are `[lon, lat]`.
pub(crate) fn geojson(records: &[&MerchantRecord]) -> Value {
    let features: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [r.longitude, r.latitude]},
                "properties": {
                    "business_name": r.business_name,
                    "category": r.category,
                    "road_address": r.road_address,
                },
            })
        })
        .collect();

    json!({"type": "FeatureCollection", "features": features})
}

/// One line per diagnostic, plus the raw body for schema failures.
pub(crate) fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut out = format!("[{}] {}", diagnostic.kind.code(), diagnostic.message);
    if let Some(body) = &diagnostic.raw_body {
        out.push_str("\nresponse body:\n");
        out.push_str(body);
    }
    out
}
