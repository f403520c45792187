//! Navigation menu rendering.

use crate::grouping::{NavMenu, NavTarget};

use super::esc;

/// Render the menu as dropdown sections.
///
/// History entries carry the `(base type, year)` address as data attributes
/// so client-side code can expand the right year bucket after scrolling.
pub fn render_nav(menu: &NavMenu) -> String {
    let mut out = String::from("<nav class=\"nav\">\n");
    for section in &menu.sections {
        out.push_str(&format!(
            "<div class=\"dropdown\">\n<button class=\"dropdown-btn\">{icon} {title} ▼</button>\n<div class=\"dropdown-content\">\n",
            icon = esc(&section.icon),
            title = esc(&section.title),
        ));
        for item in &section.items {
            let (href, attrs) = match &item.target {
                NavTarget::Link { url } => (esc(url), String::new()),
                NavTarget::Card { test_type } => (format!("#test-{}", esc(test_type)), String::new()),
                NavTarget::HistoryEntry { base_type, year, test_type } => (
                    format!("#test-{}", esc(test_type)),
                    format!(
                        " data-history-base=\"{}\" data-history-year=\"{}\" data-history-item=\"{}\"",
                        esc(base_type),
                        year,
                        esc(test_type),
                    ),
                ),
                NavTarget::Advice { category } => (format!("#advice-{}", category.key()), String::new()),
            };
            out.push_str(&format!(
                "<a class=\"dropdown-item\" href=\"{href}\"{attrs}>{icon} {name}</a>\n",
                icon = esc(&item.icon),
                name = esc(&item.name),
            ));
        }
        out.push_str("</div>\n</div>\n");
    }
    out.push_str("</nav>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::{fallback_navigation, NavItem, NavSection};
    use crate::models::AdviceCategory;

    #[test]
    fn test_fallback_menu_renders_links() {
        let html = render_nav(&fallback_navigation());
        assert!(html.contains("href=\"blood/routine.html\""));
        assert!(html.contains("Specialized tests"));
        assert!(html.contains("#advice-medication"));
    }

    #[test]
    fn test_history_entries_carry_address_attributes() {
        let menu = NavMenu {
            sections: vec![NavSection {
                title: "Reports".to_string(),
                icon: "🩺".to_string(),
                items: vec![
                    NavItem {
                        name: "Annual checkup".to_string(),
                        icon: "📋".to_string(),
                        target: NavTarget::Card { test_type: "checkup_2021".to_string() },
                    },
                    NavItem {
                        name: "Annual checkup".to_string(),
                        icon: "📋".to_string(),
                        target: NavTarget::HistoryEntry {
                            base_type: "checkup".to_string(),
                            year: 2020,
                            test_type: "checkup_2020".to_string(),
                        },
                    },
                ],
            }],
            live: true,
        };
        let html = render_nav(&menu);
        assert!(html.contains("href=\"#test-checkup_2021\""));
        assert!(html.contains("data-history-base=\"checkup\""));
        assert!(html.contains("data-history-year=\"2020\""));
        assert!(html.contains("data-history-item=\"checkup_2020\""));
    }

    #[test]
    fn test_advice_targets_link_to_overview_anchors() {
        let menu = NavMenu {
            sections: vec![NavSection {
                title: "Medical advice".to_string(),
                icon: "💡".to_string(),
                items: vec![NavItem {
                    name: "Diet".to_string(),
                    icon: "🍎".to_string(),
                    target: NavTarget::Advice { category: AdviceCategory::Diet },
                }],
            }],
            live: true,
        };
        assert!(render_nav(&menu).contains("href=\"#advice-diet\""));
    }
}
