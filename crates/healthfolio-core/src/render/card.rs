//! Per-record card rendering.

use crate::grouping::{base_type, GroupEntry, HistoryView};
use crate::loader::ReportContext;
use crate::models::{
    AllergyRow, CheckupRow, ExamSection, RecordKind, ResultRow, StandardRow, TestRecord,
};

use super::{esc, render_general_advice, RenderError, RenderResult};

/// Render one record's card body, isolating failures.
///
/// A record whose rows do not match its schema kind produces an inline
/// "render failed" notice instead of unwinding into the page assembly.
pub fn render_card(entry: GroupEntry<'_>, ctx: &ReportContext) -> String {
    match render_card_inner(entry.test_type, entry.record, ctx) {
        Ok(html) => html,
        Err(err) => format!(
            "<div class=\"render-failed\">⚠️ render failed for <code>{id}</code>: {err}</div>\n",
            id = esc(entry.test_type),
        ),
    }
}

fn render_card_inner(
    test_type: &str,
    record: &TestRecord,
    ctx: &ReportContext,
) -> RenderResult<String> {
    let color = record.diagnosis.color.as_deref().unwrap_or("#666666");
    let icon = record.diagnosis.icon.as_deref().unwrap_or("📋");
    let mut out = format!(
        "<h2 style=\"color: {color}\"><span>{icon}</span> {name}</h2>\n",
        color = esc(color),
        icon = esc(icon),
        name = esc(&record.diagnosis.name),
    );

    if let Some(info) = &record.test_info {
        out.push_str(&format!(
            "<div class=\"info-box\">🔬 Tested: {date} {time} ({method})</div>\n",
            date = esc(info.date.as_deref().unwrap_or("unknown")),
            time = esc(info.time.as_deref().unwrap_or("")),
            method = esc(info.method.as_deref().unwrap_or("unknown")),
        ));
    }

    match record.kind() {
        RecordKind::Standard => {
            out.push_str(&standard_table(&record.results)?);
        }
        RecordKind::Allergy => {
            out.push_str(&allergy_table(&record.results)?);
        }
        RecordKind::ComprehensiveCheckup => {
            out.push_str(&comprehensive_tables(&record.results)?);
            out.push_str(&exam_sections("👩‍⚕️ Physical exam", &record.physical_exam));
            out.push_str(&exam_sections("📸 Imaging", &record.imaging_results));
        }
        RecordKind::Donation => {
            out.push_str(&donation_box(record));
            out.push_str(&standard_table(&record.results)?);
        }
    }

    if !record.medications.is_empty() {
        out.push_str("<h4>💊 Current medication plan</h4>\n");
        for med in &record.medications {
            out.push_str(&format!(
                "<div class=\"note-item\"><strong>{name}</strong> — {dosage}, {timing}<br><span class=\"indication\">{indication}</span></div>\n",
                name = esc(&med.name),
                dosage = esc(med.dosage.as_deref().unwrap_or("")),
                timing = esc(med.timing.as_deref().unwrap_or("")),
                indication = esc(med.indication.as_deref().unwrap_or("")),
            ));
        }
    }

    if record.recommendations.is_some() {
        out.push_str(&recommendations_section(test_type, record, ctx));
    }

    Ok(out)
}

/// Render a group's history: year buckets, collapsed by default, each record
/// going through the same card renderer as the current one.
pub fn render_history(base: &str, history: &HistoryView<'_>, ctx: &ReportContext) -> String {
    let mut out = format!(
        "<div class=\"history-section\">\n<div class=\"history-summary\">📋 History ({total} records, {years} years)</div>\n",
        total = history.total(),
        years = history.buckets.len(),
    );

    for bucket in &history.buckets {
        out.push_str(&format!(
            "<div class=\"year-group\">\n<div class=\"year-toggle\">📋 Show history ({year}) ▼</div>\n<div class=\"year-content\" id=\"history-{base}-{year}\">\n",
            base = esc(base),
            year = bucket.year,
        ));
        for entry in &bucket.entries {
            out.push_str(&format!(
                "<div class=\"history-item\" id=\"history-item-{id}\" data-year=\"{year}\">\n{card}</div>\n",
                id = esc(entry.test_type),
                year = entry.year,
                card = render_card(*entry, ctx),
            ));
        }
        out.push_str("</div>\n</div>\n");
    }

    out.push_str("</div>\n");
    out
}

fn status_class(is_normal: bool) -> &'static str {
    if is_normal {
        "status-normal"
    } else {
        "status-abnormal"
    }
}

fn standard_rows(results: &[ResultRow]) -> RenderResult<Vec<&StandardRow>> {
    results
        .iter()
        .map(|row| match row {
            ResultRow::Standard(row) => Ok(row),
            _ => Err(RenderError::RowMismatch { kind: RecordKind::Standard }),
        })
        .collect()
}

fn standard_table(results: &[ResultRow]) -> RenderResult<String> {
    let rows = standard_rows(results)?;
    if rows.is_empty() {
        return Ok(String::new());
    }
    // The unit column appears only when the data carries units.
    let with_unit = rows[0].unit.is_some();

    let mut out = String::from("<table>\n<thead><tr><th>Item</th><th>Result</th>");
    if with_unit {
        out.push_str("<th>Unit</th>");
    }
    out.push_str("<th>Status</th><th>Reference</th></tr></thead>\n<tbody>\n");

    for row in rows {
        out.push_str(&format!(
            "<tr><td>{name}</td><td class=\"{class}\">{value}</td>",
            name = esc(&row.name),
            class = status_class(row.is_normal),
            value = esc(&row.value),
        ));
        if with_unit {
            out.push_str(&format!("<td>{}</td>", esc(row.unit.as_deref().unwrap_or(""))));
        }
        out.push_str(&format!(
            "<td class=\"{class}\">{status}</td><td>{reference}</td></tr>\n",
            class = status_class(row.is_normal),
            status = esc(&row.status),
            reference = esc(&row.reference),
        ));
    }

    out.push_str("</tbody>\n</table>\n");
    Ok(out)
}

fn allergy_table(results: &[ResultRow]) -> RenderResult<String> {
    let rows: Vec<&AllergyRow> = results
        .iter()
        .map(|row| match row {
            ResultRow::Allergy(row) => Ok(row),
            _ => Err(RenderError::RowMismatch { kind: RecordKind::Allergy }),
        })
        .collect::<RenderResult<_>>()?;
    if rows.is_empty() {
        return Ok(String::new());
    }

    let mut out = String::from(
        "<table>\n<thead><tr><th>Allergen class</th><th>Allergen</th><th>Sensitivity</th><th>IgE (kU/L)</th><th>Season</th></tr></thead>\n<tbody>\n",
    );
    for row in rows {
        let class = status_class(!row.is_allergic);
        out.push_str(&format!(
            "<tr><td>{category}</td><td>{allergen}</td><td class=\"{class}\">{sensitivity}</td><td class=\"{class}\">{ige}</td><td>{season}</td></tr>\n",
            category = esc(&row.category),
            allergen = esc(&row.allergen),
            sensitivity = esc(&row.sensitivity),
            ige = esc(&row.ige_value),
            season = esc(row.season.as_deref().unwrap_or("")),
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    Ok(out)
}

fn comprehensive_tables(results: &[ResultRow]) -> RenderResult<String> {
    let rows: Vec<&CheckupRow> = results
        .iter()
        .map(|row| match row {
            ResultRow::Checkup(row) => Ok(row),
            _ => Err(RenderError::RowMismatch { kind: RecordKind::ComprehensiveCheckup }),
        })
        .collect::<RenderResult<_>>()?;

    // Category partition preserves first-seen order.
    let mut categories: Vec<(&str, Vec<&CheckupRow>)> = Vec::new();
    for row in rows {
        match categories.iter_mut().find(|(name, _)| *name == row.category) {
            Some((_, bucket)) => bucket.push(row),
            None => categories.push((&row.category, vec![row])),
        }
    }

    let mut out = String::new();
    for (category, rows) in categories {
        out.push_str(&format!("<h4>🔬 {}</h4>\n", esc(category)));
        out.push_str(
            "<table>\n<thead><tr><th>Item</th><th>Result</th><th>Unit</th><th>Status</th><th>Reference</th></tr></thead>\n<tbody>\n",
        );
        for row in rows {
            out.push_str(&format!(
                "<tr><td>{name}</td><td class=\"{class}\">{value}</td><td>{unit}</td><td class=\"{class}\">{status}</td><td>{reference}</td></tr>\n",
                name = esc(&row.name),
                class = status_class(row.is_normal),
                value = esc(&row.value),
                unit = esc(row.unit.as_deref().unwrap_or("")),
                status = esc(&row.status),
                reference = esc(&row.reference),
            ));
        }
        out.push_str("</tbody>\n</table>\n");
    }
    Ok(out)
}

fn exam_sections(title: &str, sections: &[ExamSection]) -> String {
    if sections.is_empty() {
        return String::new();
    }
    let mut out = format!("<h4>{title}</h4>\n");
    for section in sections {
        out.push_str(&format!(
            "<div class=\"info-box\"><strong>{label}:</strong><ul>",
            label = esc(&section.label),
        ));
        for finding in &section.findings {
            out.push_str(&format!("<li>{}</li>", esc(finding)));
        }
        out.push_str("</ul></div>\n");
    }
    out
}

fn donation_box(record: &TestRecord) -> String {
    let Some(info) = &record.donation_info else {
        return String::new();
    };
    let unknown = "unknown";
    format!(
        r#"<div class="info-box donation-box"><div class="fields">
<div><strong>🩸 Volume:</strong> {volume}</div>
<div><strong>✅ Screening:</strong> {status}</div>
<div><strong>🔴 Blood type:</strong> {blood_type}</div>
<div><strong>➕ Rh factor:</strong> {rh}</div>
</div></div>
"#,
        volume = esc(info.volume.as_deref().unwrap_or(unknown)),
        status = esc(info.status.as_deref().unwrap_or(unknown)),
        blood_type = esc(info.blood_type.as_deref().unwrap_or(unknown)),
        rh = esc(info.rh_type.as_deref().unwrap_or(unknown)),
    )
}

fn push_note(out: &mut String, label: &str, text: Option<&str>) {
    if let Some(text) = text {
        out.push_str(&format!(
            "<div class=\"note-item\"><strong>{label}:</strong> {text}</div>\n",
            text = esc(text),
        ));
    }
}

fn recommendations_section(test_type: &str, record: &TestRecord, ctx: &ReportContext) -> String {
    let Some(rec) = &record.recommendations else {
        return String::new();
    };
    let color = record.diagnosis.color.as_deref().unwrap_or("#666666");
    let mut out = format!(
        "<div class=\"recommendations\">\n<h4 style=\"color: {color}\">🩺 Doctor's notes</h4>\n",
        color = esc(color),
    );

    push_note(&mut out, "🩺 Diagnosis", rec.diagnosis.as_deref());
    push_note(&mut out, "💊 Treatment", rec.treatment.as_deref());

    if !rec.lifestyle.is_empty() {
        out.push_str("<div class=\"note-item\"><strong>🥗 Lifestyle:</strong><ul>");
        for item in &rec.lifestyle {
            out.push_str(&format!("<li>{}</li>", esc(item)));
        }
        out.push_str("</ul></div>\n");
    }

    // Allergy-specific guidance.
    if record.kind() == RecordKind::Allergy {
        push_note(&mut out, "🌸 Seasonal protection", rec.seasonal_protection.as_deref());
        push_note(&mut out, "💊 Medication guidance", rec.medication_guidance.as_deref());
        if !rec.environmental_management.is_empty() {
            out.push_str("<div class=\"note-item\"><strong>🏡 Environment:</strong><ul>");
            for item in &rec.environmental_management {
                out.push_str(&format!("<li>{}</li>", esc(item)));
            }
            out.push_str("</ul></div>\n");
        }
        push_note(&mut out, "⚠️ Watch for", rec.symptoms.as_deref());
    }

    if let Some(notes) = &rec.donation_notes {
        out.push_str(&format!(
            "<div class=\"note-item donation-box\"><strong>🩸 Blood-test reminder:</strong> {}</div>\n",
            esc(notes),
        ));
    }
    if let Some(follow_up) = &rec.follow_up {
        out.push_str(&format!(
            "<div class=\"note-item\"><strong>🔄 Follow-up:</strong> {}</div>\n",
            esc(follow_up),
        ));
    }

    out.push_str(&render_general_advice(base_type(test_type), ctx.advice.as_ref()));
    out.push_str("</div>\n");
    out
}
