//! Substring search over record content, with match highlighting.

use crate::models::{ResultRow, TestRecord};
use crate::render::esc;

/// All text of a record a search query can hit, one piece per line.
pub fn searchable_text(test_type: &str, record: &TestRecord) -> String {
    let mut pieces: Vec<String> = vec![test_type.to_string(), record.diagnosis.name.clone()];

    for row in &record.results {
        match row {
            ResultRow::Standard(row) => {
                pieces.push(row.name.clone());
                pieces.push(row.value.clone());
                pieces.push(row.status.clone());
                pieces.push(row.reference.clone());
            }
            ResultRow::Allergy(row) => {
                pieces.push(row.category.clone());
                pieces.push(row.allergen.clone());
                pieces.push(row.sensitivity.clone());
                pieces.push(row.ige_value.clone());
            }
            ResultRow::Checkup(row) => {
                pieces.push(row.category.clone());
                pieces.push(row.name.clone());
                pieces.push(row.value.clone());
                pieces.push(row.status.clone());
                pieces.push(row.reference.clone());
            }
        }
    }

    for med in &record.medications {
        pieces.push(med.name.clone());
        pieces.extend(med.indication.clone());
    }

    if let Some(rec) = &record.recommendations {
        pieces.extend(rec.diagnosis.clone());
        pieces.extend(rec.treatment.clone());
        pieces.extend(rec.lifestyle.iter().cloned());
        pieces.extend(rec.seasonal_protection.clone());
        pieces.extend(rec.medication_guidance.clone());
        pieces.extend(rec.environmental_management.iter().cloned());
        pieces.extend(rec.symptoms.clone());
        pieces.extend(rec.donation_notes.clone());
        pieces.extend(rec.follow_up.clone());
    }

    for section in record.physical_exam.iter().chain(&record.imaging_results) {
        pieces.push(section.label.clone());
        pieces.extend(section.findings.iter().cloned());
    }

    pieces.join("\n")
}

/// Case-insensitive substring match. An empty query matches everything.
pub fn record_matches(test_type: &str, record: &TestRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    searchable_text(test_type, record).to_lowercase().contains(&query)
}

/// Wrap query matches in rendered HTML with a highlight span.
///
/// Only text between tags is touched; tag names and attribute values are
/// never rewritten. The query is matched in its escaped form, so it lines
/// up with the escaped card content.
pub fn highlight_html(html: &str, query: &str) -> String {
    let needle = esc(query.trim()).to_lowercase();
    if needle.is_empty() {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(tag_start) = rest.find('<') {
        let (text, tail) = rest.split_at(tag_start);
        out.push_str(&wrap_matches(text, &needle));
        match tail.find('>') {
            Some(tag_end) => {
                out.push_str(&tail[..=tag_end]);
                rest = &tail[tag_end + 1..];
            }
            None => {
                out.push_str(tail);
                return out;
            }
        }
    }
    out.push_str(&wrap_matches(rest, &needle));
    out
}

fn wrap_matches(text: &str, needle: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let needle_chars: Vec<char> = needle.chars().collect();
    let n = needle_chars.len();

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let matches = i + n <= chars.len()
            && chars[i..i + n]
                .iter()
                .zip(&needle_chars)
                .all(|(c, q)| c.to_lowercase().eq(q.to_lowercase()));
        if matches {
            out.push_str("<span class=\"search-highlight\">");
            out.extend(&chars[i..i + n]);
            out.push_str("</span>");
            i += n;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}
