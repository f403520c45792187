//! Thyroid chart configuration.
//!
//! Emits Chart.js-shaped config JSON; the page embeds it in a JSON script
//! tag for whatever charting runtime consumes it. The multi-year antibody
//! comparison takes precedence over the single-report trend chart, and both
//! are gated on the `hasChart` flag of their test source.

use serde_json::{json, Value};

use crate::loader::ReportContext;
use crate::models::{TestRecord, TrendData};

const TGAB_COLOR: &str = "#e17055";
const TPOAB_COLOR: &str = "#00b894";

/// Build the chart config for the context, if any chart-bearing test loaded.
pub fn chart_config(ctx: &ReportContext) -> Option<Value> {
    let chart_record = |id: &str| -> Option<&TestRecord> {
        let source = ctx.config.source(id)?;
        if !source.has_chart {
            return None;
        }
        ctx.records.get(id)
    };

    if let Some(record) = chart_record("thyroid_history") {
        if !record.history_data.is_empty() {
            return Some(history_chart(record));
        }
    }
    if let Some(record) = chart_record("thyroid") {
        if let Some(trend) = &record.trend_data {
            return Some(trend_chart(trend));
        }
    }
    None
}

/// Antibody history: two series on independent axes.
fn history_chart(record: &TestRecord) -> Value {
    let labels: Vec<&str> = record.history_data.iter().map(|p| p.date.as_str()).collect();
    let tgab: Vec<f64> = record.history_data.iter().map(|p| p.tgab).collect();
    let tpoab: Vec<f64> = record.history_data.iter().map(|p| p.tpoab).collect();
    let institutions: Vec<&str> = record
        .history_data
        .iter()
        .map(|p| p.institution.as_deref().unwrap_or(""))
        .collect();

    json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [
                {
                    "label": "TGAb (IU/mL)",
                    "data": tgab,
                    "borderColor": TGAB_COLOR,
                    "fill": false,
                    "tension": 0.4,
                    "yAxisID": "y"
                },
                {
                    "label": "TPOAb (kIU/L)",
                    "data": tpoab,
                    "borderColor": TPOAB_COLOR,
                    "fill": false,
                    "tension": 0.4,
                    "yAxisID": "y1"
                }
            ]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": { "display": true, "text": "Thyroid antibody history" },
                "tooltip": { "institutions": institutions }
            },
            "scales": {
                "y": {
                    "position": "left",
                    "title": { "display": true, "text": "TGAb (IU/mL)" }
                },
                "y1": {
                    "position": "right",
                    "title": { "display": true, "text": "TPOAb (kIU/L)" },
                    "grid": { "drawOnChartArea": false }
                }
            }
        }
    })
}

/// Current-report trend chart from the document's own series.
fn trend_chart(trend: &TrendData) -> Value {
    let datasets: Vec<Value> = trend
        .datasets
        .iter()
        .map(|series| {
            json!({
                "label": series.name,
                "data": series.data,
                "borderColor": series.color.as_deref().unwrap_or("#636e72"),
                "fill": false,
                "tension": 0.4
            })
        })
        .collect();

    json!({
        "type": "line",
        "data": { "labels": trend.labels, "datasets": datasets },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": { "display": true, "text": "Thyroid trend" }
            }
        }
    })
}
