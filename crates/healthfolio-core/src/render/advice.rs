//! Advice overview and per-test advice sections.

use crate::models::{AdviceBook, AdviceCategory, AdviceEntry};

use super::esc;

/// Overview card: the four category summaries plus key points.
///
/// Without loaded advice data the section degrades to a loading placeholder
/// instead of failing the page.
pub fn render_advice_overview(advice: Option<&AdviceBook>) -> String {
    let Some(book) = advice else {
        return r#"<div class="card" id="advice-overview">
<h3>💡 Medical advice</h3>
<div class="note-item placeholder">Advice data is still loading...</div>
</div>
"#
        .to_string();
    };

    let mut cards = String::new();
    for category in AdviceCategory::ALL {
        let Some(section) = book.section(category) else {
            continue;
        };
        let color = category.color();
        let mut summary = String::new();
        for entry in section.sections.iter().take(2) {
            summary.push_str(&format!(
                "<div><strong style=\"color: {color}\">{category}:</strong> {content}</div>\n",
                category = esc(&entry.category),
                content = esc(&truncate(&entry.content, 60)),
            ));
        }
        if section.sections.len() > 2 {
            summary.push_str(&format!(
                "<div class=\"advice-more\" style=\"color: {color}\">{} more entries...</div>\n",
                section.sections.len() - 2,
            ));
        }
        cards.push_str(&format!(
            r#"<div class="advice-card" id="advice-{key}" style="border-color: {color}">
<h3 style="color: {color}">{icon} {title}</h3>
{summary}</div>
"#,
            key = category.key(),
            icon = category.icon(),
            title = category.title(),
        ));
    }

    let key_points = book
        .summary
        .as_ref()
        .filter(|s| !s.key_points.is_empty())
        .map(|summary| {
            let mut out =
                String::from("<div class=\"key-points\">\n<h3>🎯 Key points</h3>\n<ul>\n");
            for point in &summary.key_points {
                out.push_str(&format!("<li>{}</li>\n", esc(point)));
            }
            out.push_str("</ul>\n</div>\n");
            out
        })
        .unwrap_or_default();

    format!(
        r#"<div class="card" id="advice-overview">
<h3>💡 Medical advice</h3>
<div class="advice-grid">
{cards}</div>
{key_points}</div>
"#
    )
}

/// General advice sections relevant to one test card.
pub fn render_general_advice(base_type: &str, advice: Option<&AdviceBook>) -> String {
    let Some(book) = advice else {
        return String::new();
    };

    let mut out = String::new();
    for category in AdviceCategory::relevant_for(base_type) {
        let Some(section) = book.section(*category) else {
            continue;
        };
        if section.sections.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "<div class=\"note-item\"><strong>{icon} {title}:</strong>\n",
            icon = esc(section.icon.as_deref().unwrap_or(category.icon())),
            title = esc(&section.title),
        ));
        for entry in &section.sections {
            out.push_str(&render_entry(entry));
        }
        out.push_str("</div>\n");
    }
    out
}

fn render_entry(entry: &AdviceEntry) -> String {
    let mut out = format!(
        "<div class=\"advice-entry\"><strong>{category}:</strong> {content}",
        category = esc(&entry.category),
        content = esc(&entry.content),
    );
    if !entry.details.is_empty() {
        out.push_str("<ul>");
        for detail in &entry.details {
            out.push_str(&format!("<li>{}</li>", esc(detail)));
        }
        out.push_str("</ul>");
    }
    out.push_str("</div>\n");
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_chars).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdviceSection, AdviceSummary};
    use std::collections::HashMap;

    fn entry(category: &str, content: &str) -> AdviceEntry {
        AdviceEntry {
            category: category.to_string(),
            content: content.to_string(),
            details: Vec::new(),
        }
    }

    fn make_book() -> AdviceBook {
        let mut advice = HashMap::new();
        advice.insert(
            "lifestyle".to_string(),
            AdviceSection {
                title: "Daily routine".to_string(),
                icon: Some("📝".to_string()),
                color: None,
                sections: vec![
                    entry("Sleep", "Keep a regular schedule."),
                    entry("Stress", "Take breaks."),
                    entry("Sun", "Get outside daily."),
                ],
            },
        );
        advice.insert(
            "diet".to_string(),
            AdviceSection {
                title: "Food".to_string(),
                icon: None,
                color: None,
                sections: vec![entry("Iodine", "Moderate intake.")],
            },
        );
        AdviceBook {
            advice,
            summary: Some(AdviceSummary { key_points: vec!["Re-check yearly".to_string()] }),
        }
    }

    #[test]
    fn test_overview_placeholder_without_data() {
        let html = render_advice_overview(None);
        assert!(html.contains("still loading"));
    }

    #[test]
    fn test_overview_summaries_and_overflow_count() {
        let book = make_book();
        let html = render_advice_overview(Some(&book));
        assert!(html.contains("id=\"advice-lifestyle\""));
        assert!(html.contains("1 more entries..."));
        assert!(html.contains("Re-check yearly"));
        // Categories absent from the document are skipped.
        assert!(!html.contains("id=\"advice-exercise\""));
    }

    #[test]
    fn test_long_content_is_truncated() {
        let mut book = make_book();
        let long = "x".repeat(100);
        book.advice.get_mut("diet").unwrap().sections = vec![entry("Iodine", &long)];
        let html = render_advice_overview(Some(&book));
        assert!(html.contains(&format!("{}...", "x".repeat(60))));
        assert!(!html.contains(&long));
    }

    #[test]
    fn test_general_advice_follows_relevance_mapping() {
        let book = make_book();
        // "checkup" maps to lifestyle + exercise; only lifestyle exists.
        let html = render_general_advice("checkup", Some(&book));
        assert!(html.contains("Daily routine"));
        assert!(!html.contains("Food"));

        // "blood" maps to lifestyle + diet + exercise.
        let html = render_general_advice("blood", Some(&book));
        assert!(html.contains("Food"));
    }

    #[test]
    fn test_general_advice_empty_without_data() {
        assert!(render_general_advice("blood", None).is_empty());
    }
}
