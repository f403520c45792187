//! Navigation menu derived from the loaded record set.
//!
//! The menu re-uses [`group_records`](super::group_records) for its own
//! category split, so the entry it marks as "latest" for a base type is
//! always the record the report renderer put on the visible card.

use std::collections::HashMap;

use crate::models::{AdviceCategory, ReportConfig, TestRecord};

use super::group_records;

/// What activating a menu item does.
#[derive(Debug, Clone, PartialEq)]
pub enum NavTarget {
    /// Plain link, used by the static fallback menu.
    Link { url: String },
    /// Scroll to the card of a group's latest record.
    Card { test_type: String },
    /// Scroll to a card, then expand the history bucket holding the record.
    HistoryEntry {
        base_type: String,
        year: i32,
        test_type: String,
    },
    /// Open one of the advice categories.
    Advice { category: AdviceCategory },
}

/// One actionable menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub name: String,
    pub icon: String,
    pub target: NavTarget,
}

/// A titled dropdown of menu entries.
#[derive(Debug, Clone, PartialEq)]
pub struct NavSection {
    pub title: String,
    pub icon: String,
    pub items: Vec<NavItem>,
}

/// The complete navigation menu.
#[derive(Debug, Clone, PartialEq)]
pub struct NavMenu {
    pub sections: Vec<NavSection>,
    /// False for the static fallback built without loaded data.
    pub live: bool,
}

const SPECIALIZED_TITLE: &str = "Specialized tests";
const REPORTS_TITLE: &str = "Reports";
const ADVICE_TITLE: &str = "Medical advice";

/// Build the navigation menu from the loaded record set.
///
/// Identifiers containing `"checkup"` land in the reports section, all
/// others under specialized tests. Within each section records are grouped
/// by base type and ordered newest-first; only a group's latest entry gets a
/// plain scroll action, every other entry is addressed through its history
/// bucket. Empty sections are omitted.
pub fn build_navigation(
    config: &ReportConfig,
    records: &HashMap<String, TestRecord>,
    default_year: i32,
) -> NavMenu {
    let (reports, specialized): (Vec<String>, Vec<String>) = config
        .active_tests
        .iter()
        .filter(|id| records.contains_key(*id))
        .cloned()
        .partition(|id| id.contains("checkup"));

    let mut sections = Vec::new();
    for (title, icon, ids) in [
        (SPECIALIZED_TITLE, "🔬", specialized),
        (REPORTS_TITLE, "🩺", reports),
    ] {
        let items = section_items(config, records, &ids, default_year);
        if !items.is_empty() {
            sections.push(NavSection {
                title: title.to_string(),
                icon: icon.to_string(),
                items,
            });
        }
    }
    sections.push(advice_section());

    NavMenu { sections, live: true }
}

fn section_items(
    config: &ReportConfig,
    records: &HashMap<String, TestRecord>,
    ids: &[String],
    default_year: i32,
) -> Vec<NavItem> {
    let mut items = Vec::new();
    for group in group_records(ids, records, default_year) {
        for (position, entry) in group.entries.iter().enumerate() {
            let (name, icon) = match config.source(entry.test_type) {
                Some(source) => (
                    source.name.clone(),
                    source.icon.clone().unwrap_or_else(|| "📋".to_string()),
                ),
                None => (entry.test_type.to_string(), "📋".to_string()),
            };
            let target = if position == 0 {
                NavTarget::Card { test_type: entry.test_type.to_string() }
            } else {
                NavTarget::HistoryEntry {
                    base_type: group.base.clone(),
                    year: entry.year,
                    test_type: entry.test_type.to_string(),
                }
            };
            items.push(NavItem { name, icon, target });
        }
    }
    items
}

fn advice_section() -> NavSection {
    NavSection {
        title: ADVICE_TITLE.to_string(),
        icon: "💡".to_string(),
        items: AdviceCategory::ALL
            .into_iter()
            .map(|category| NavItem {
                name: category.title().to_string(),
                icon: category.icon().to_string(),
                target: NavTarget::Advice { category },
            })
            .collect(),
    }
}

/// Static fallback menu for when no record store is available yet.
///
/// Carries no live data; entries link to the standalone per-test pages.
pub fn fallback_navigation() -> NavMenu {
    fn link(name: &str, icon: &str, url: &str) -> NavItem {
        NavItem {
            name: name.to_string(),
            icon: icon.to_string(),
            target: NavTarget::Link { url: url.to_string() },
        }
    }

    NavMenu {
        sections: vec![
            NavSection {
                title: SPECIALIZED_TITLE.to_string(),
                icon: "🔬".to_string(),
                items: vec![
                    link("Blood count", "🩸", "blood/routine.html"),
                    link("Biochemistry", "⚗️", "blood/biochemistry.html"),
                    link("Thyroid function", "🏥", "thyroid/t3t4tsh.html"),
                    link("Thyroid antibodies", "🔬", "thyroid/antibody.html"),
                    link("Food allergy", "🍎", "allergy/food.html"),
                    link("Environmental allergy", "🌿", "allergy/environment.html"),
                ],
            },
            NavSection {
                title: REPORTS_TITLE.to_string(),
                icon: "🩺".to_string(),
                items: vec![
                    link("Full physical", "📋", "check/physical.html"),
                    link("ECG", "❤️", "check/ecg.html"),
                    link("Blood pressure", "📊", "check/blood-pressure.html"),
                ],
            },
            advice_section(),
        ],
        live: false,
    }
}
