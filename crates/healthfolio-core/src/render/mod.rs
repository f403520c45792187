//! Static HTML rendering for the report page.
//!
//! Produces a self-contained page: header, navigation, one card per test
//! group with collapsible history sections, the thyroid chart config, the
//! advice overview and a usage note. A failure inside one record's renderer
//! is caught at the card boundary and shown as an inline notice; it never
//! takes down the rest of the page.

mod advice;
mod card;
mod chart;
mod nav;

pub use advice::*;
pub use card::*;
pub use chart::*;
pub use nav::*;

use thiserror::Error;

use crate::grouping::{build_navigation, display_groups, TestGroup};
use crate::loader::{LoadError, ReportContext};
use crate::models::RecordKind;
use crate::search;

/// Per-record rendering errors, caught at the card boundary.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("result rows do not match the {kind:?} schema")]
    RowMismatch { kind: RecordKind },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Escape text for HTML interpolation.
pub fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full report page.
///
/// With a search query, cards whose content does not match are dropped and
/// matches inside the surviving cards are highlighted.
pub fn render_page(ctx: &ReportContext, query: Option<&str>) -> String {
    let groups = display_groups(&ctx.config.active_tests, &ctx.records, ctx.default_year);
    let menu = build_navigation(&ctx.config, &ctx.records, ctx.default_year);

    let mut cards = String::new();
    for group in &groups {
        if let Some(q) = query {
            let hit = group
                .entries
                .iter()
                .any(|e| search::record_matches(e.test_type, e.record, q));
            if !hit {
                continue;
            }
        }
        let mut section = render_group(group, ctx);
        if let Some(q) = query {
            section = search::highlight_html(&section, q);
        }
        cards.push_str(&section);
    }

    let chart_section = chart_config(ctx)
        .map(|config| {
            format!(
                r#"<div class="card" id="chart-card">
<h3>📈 Thyroid trend</h3>
<canvas id="thyroidChart"></canvas>
<script id="thyroidChartConfig" type="application/json">{config}</script>
</div>
"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Health Report</title>
<style>{css}</style>
</head>
<body>
{nav}
<div class="container">
{header}
{cards}{chart}{advice}
{notes}
</div>
</body>
</html>"#,
        css = PAGE_CSS,
        nav = render_nav(&menu),
        header = render_header(ctx),
        cards = cards,
        chart = chart_section,
        advice = render_advice_overview(ctx.advice.as_ref()),
        notes = render_notes(ctx),
    )
}

/// Render one group: the current card plus its history section.
fn render_group(group: &TestGroup<'_>, ctx: &ReportContext) -> String {
    let current = group.current();
    let mut body = render_card(current, ctx);

    if let Some(history) = group.history() {
        body.push_str(&render_history(&group.base, &history, ctx));
    }

    format!(
        "<div class=\"card\" id=\"test-{id}\">\n{body}</div>\n",
        id = esc(current.test_type),
    )
}

fn render_header(ctx: &ReportContext) -> String {
    let info = &ctx.config.patient_info;
    let unknown = "unknown";
    format!(
        r#"<div class="card header-card">
<h1>🏥 Personal Health Report</h1>
<div class="header-meta">
<span>🗓️ Last update: {update}</span>
<span>📍 Institution: {institution}</span>
<span>👩‍⚕️ Doctors: {doctors}</span>
</div>
</div>
"#,
        update = esc(info.last_update.as_deref().unwrap_or(unknown)),
        institution = esc(info.institution.as_deref().unwrap_or(unknown)),
        doctors = esc(info.doctors.as_deref().unwrap_or(unknown)),
    )
}

fn render_notes(ctx: &ReportContext) -> String {
    let reminder = ctx
        .config
        .general_notes
        .as_deref()
        .unwrap_or("Re-check your panels on the schedule your doctor recommended.");
    format!(
        r#"<div class="card" id="usage-notes">
<h3 class="notes-title">📖 How to read this report</h3>
<div class="note-item"><strong>📋 Advice:</strong> each test card carries its own doctor's notes below the results.</div>
<div class="note-item"><strong>🔄 Follow-up:</strong> {reminder}</div>
</div>"#,
        reminder = esc(reminder),
    )
}

/// Full-page panel for fatal load errors, with a reload action.
pub fn render_error_page(error: &LoadError) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Health Report</title>
<style>{css}</style>
</head>
<body>
<div class="container">
<div class="card error-card">
<h2>⚠️ Failed to load report data</h2>
<p>{message}</p>
<p>Check that the data files exist and are readable.</p>
<div class="error-actions"><a href="" class="button">Reload</a></div>
</div>
</div>
</body>
</html>"#,
        css = PAGE_CSS,
        message = esc(&error.to_string()),
    )
}

const PAGE_CSS: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; line-height: 1.6; color: #2d3436; background: #f5f6fa; }
.container { max-width: 960px; margin: 0 auto; padding: 24px 16px; }
.card { background: #ffffff; border-radius: 12px; padding: 24px; margin-bottom: 24px; box-shadow: 0 2px 8px rgba(0,0,0,0.06); }
.card h2 { display: flex; align-items: center; gap: 10px; margin-bottom: 20px; }
.header-meta { display: flex; flex-wrap: wrap; gap: 16px; color: #636e72; }
.info-box { background: rgba(116, 185, 255, 0.1); border-left: 4px solid #74b9ff; border-radius: 8px; padding: 12px 16px; margin-bottom: 16px; }
.donation-box { background: rgba(231, 76, 60, 0.08); border-left: 4px solid #e74c3c; }
.donation-box .fields { display: flex; flex-wrap: wrap; gap: 16px; }
table { width: 100%; border-collapse: collapse; margin-bottom: 16px; }
th, td { padding: 8px 12px; text-align: left; border-bottom: 1px solid #dfe6e9; }
th { background: #f1f2f6; }
.status-normal { color: #00b894; }
.status-abnormal { color: #e74c3c; font-weight: 600; }
.note-item { border-left: 4px solid #74b9ff; background: rgba(116, 185, 255, 0.08); border-radius: 8px; padding: 10px 14px; margin-bottom: 10px; }
.render-failed { border-left: 4px solid #e74c3c; background: rgba(231, 76, 60, 0.08); padding: 10px 14px; border-radius: 8px; }
.history-section { border-top: 2px solid #dfe6e9; margin-top: 20px; padding-top: 16px; }
.year-group > .year-content { display: none; }
.year-group.open > .year-content { display: block; }
.year-toggle { cursor: pointer; color: #0984e3; margin: 8px 0; }
.history-item { border: 1px solid #dfe6e9; border-radius: 8px; padding: 16px; margin: 12px 0; }
.nav { background: #ffffff; border-bottom: 1px solid #dfe6e9; padding: 8px 16px; display: flex; gap: 12px; }
.dropdown-content { margin-left: 12px; }
.dropdown-item { display: block; color: #2d3436; text-decoration: none; padding: 4px 0; }
.advice-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; }
.advice-card { border-radius: 12px; padding: 16px; border: 1px solid #dfe6e9; }
.advice-more { font-size: 14px; margin-top: 8px; }
.key-points { border-radius: 12px; padding: 16px; margin-top: 16px; border: 1px solid #74b9ff55; }
.search-highlight { background: #ffeaa7; }
.error-card { text-align: center; }
.error-card h2 { color: #e74c3c; justify-content: center; }
.error-actions { margin-top: 20px; }
.button { display: inline-block; background: #0984e3; color: #ffffff; border-radius: 8px; padding: 8px 20px; text-decoration: none; }
#thyroidChart { width: 100%; min-height: 280px; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ReportContext;
    use crate::models::{Diagnosis, ReportConfig, TestRecord, TestSource};
    use std::collections::HashMap;

    fn make_record(name: &str, sort: f64) -> TestRecord {
        TestRecord {
            diagnosis: Diagnosis {
                name: name.to_string(),
                color: Some("#e17055".to_string()),
                icon: Some("🏥".to_string()),
                sort,
                kind: None,
            },
            test_info: None,
            results: Vec::new(),
            medications: Vec::new(),
            recommendations: None,
            donation_info: None,
            physical_exam: Vec::new(),
            imaging_results: Vec::new(),
            trend_data: None,
            history_data: Vec::new(),
        }
    }

    pub(super) fn make_context(specs: &[(&str, f64)]) -> ReportContext {
        let mut records = HashMap::new();
        let mut available = HashMap::new();
        for (id, sort) in specs {
            records.insert(id.to_string(), make_record(id, *sort));
            available.insert(
                id.to_string(),
                TestSource {
                    data_file: format!("{id}.json"),
                    name: id.to_string(),
                    icon: None,
                    has_chart: false,
                },
            );
        }
        ReportContext {
            config: ReportConfig {
                active_tests: specs.iter().map(|(id, _)| id.to_string()).collect(),
                available_tests: available,
                patient_info: Default::default(),
                general_notes: None,
            },
            records,
            advice: None,
            default_year: 2026,
        }
    }

    #[test]
    fn test_page_contains_cards_in_display_order() {
        let ctx = make_context(&[("checkup_2021", 5.0), ("blood_2022", 9.0)]);
        let page = render_page(&ctx, None);

        let blood = page.find("id=\"test-blood_2022\"").unwrap();
        let checkup = page.find("id=\"test-checkup_2021\"").unwrap();
        assert!(blood < checkup, "blood (sort 9) should render before checkup (sort 5)");
        assert!(page.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_history_section_only_for_groups_with_history() {
        let ctx = make_context(&[("checkup_2020", 5.0), ("checkup_2021", 5.0), ("blood_2022", 9.0)]);
        let page = render_page(&ctx, None);

        // One card per group; checkup card carries the single history section.
        assert_eq!(page.matches("class=\"history-section\"").count(), 1);
        assert!(page.contains("id=\"history-checkup-2020\""));
        assert!(!page.contains("id=\"test-checkup_2020\""));
    }

    #[test]
    fn test_search_filters_and_highlights() {
        let ctx = make_context(&[("checkup_2021", 5.0), ("blood_2022", 9.0)]);
        let page = render_page(&ctx, Some("blood"));

        assert!(page.contains("id=\"test-blood_2022\""));
        assert!(!page.contains("id=\"test-checkup_2021\""));
        assert!(page.contains("search-highlight"));
    }

    #[test]
    fn test_error_page_mentions_cause() {
        let page = render_error_page(&LoadError::NoTestData);
        assert!(page.contains("no test data could be loaded"));
        assert!(page.contains("Reload"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(esc("a<b&\"c\""), "a&lt;b&amp;&quot;c&quot;");
        assert_eq!(esc("plain"), "plain");
    }
}
