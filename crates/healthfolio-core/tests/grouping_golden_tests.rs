//! Golden tests for the grouping pipeline.
//!
//! These verify grouping, ordering and navigation agreement against known
//! record sets.

use std::collections::HashMap;

use healthfolio_core::grouping::{build_navigation, display_groups, group_records, NavTarget};
use healthfolio_core::models::{ReportConfig, TestRecord, TestSource};

const DEFAULT_YEAR: i32 = 2026;

fn make_record(name: &str, sort: f64) -> TestRecord {
    let json = format!(
        r#"{{ "diagnosis": {{ "name": "{name}", "sort": {sort} }} }}"#
    );
    serde_json::from_str(&json).unwrap()
}

fn make_records(specs: &[(&str, f64)]) -> HashMap<String, TestRecord> {
    specs
        .iter()
        .map(|(id, sort)| (id.to_string(), make_record(id, *sort)))
        .collect()
}

fn make_config(active: &[&str]) -> ReportConfig {
    let available = active
        .iter()
        .map(|id| {
            (
                id.to_string(),
                TestSource {
                    data_file: format!("{id}.json"),
                    name: format!("{id} name"),
                    icon: None,
                    has_chart: false,
                },
            )
        })
        .collect();
    ReportConfig {
        active_tests: active.iter().map(|s| s.to_string()).collect(),
        available_tests: available,
        patient_info: Default::default(),
        general_notes: None,
    }
}

/// One golden grouping case.
struct GoldenCase {
    id: &'static str,
    active: &'static [&'static str],
    records: &'static [(&'static str, f64)],
    /// base → expected years, newest first
    expected_groups: &'static [(&'static str, &'static [i32])],
    /// expected display order of bases
    expected_order: &'static [&'static str],
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "checkup-blood-example",
            active: &["checkup_2020", "checkup_2021", "blood_2022"],
            records: &[("checkup_2020", 5.0), ("checkup_2021", 5.0), ("blood_2022", 9.0)],
            expected_groups: &[("checkup", &[2021, 2020]), ("blood", &[2022])],
            expected_order: &["blood", "checkup"],
        },
        GoldenCase {
            id: "single-group",
            active: &["thyroid_2023"],
            records: &[("thyroid_2023", 7.0)],
            expected_groups: &[("thyroid", &[2023])],
            expected_order: &["thyroid"],
        },
        GoldenCase {
            id: "missing-record-skipped",
            active: &["blood_2022", "liver_2020"],
            records: &[("blood_2022", 9.0)],
            expected_groups: &[("blood", &[2022])],
            expected_order: &["blood"],
        },
        GoldenCase {
            id: "sort-ties-keep-first-seen",
            active: &["liver_2020", "kidney_2021", "blood_2022"],
            records: &[("liver_2020", 4.0), ("kidney_2021", 4.0), ("blood_2022", 4.0)],
            expected_groups: &[("liver", &[2020]), ("kidney", &[2021]), ("blood", &[2022])],
            expected_order: &["liver", "kidney", "blood"],
        },
        GoldenCase {
            id: "undated-defaults-to-current-year",
            active: &["thyroid_2023", "thyroid"],
            records: &[("thyroid_2023", 7.0), ("thyroid", 7.0)],
            // 2026 > 2023: the undated record lands in the current slot.
            expected_groups: &[("thyroid", &[DEFAULT_YEAR, 2023])],
            expected_order: &["thyroid"],
        },
    ]
}

#[test]
fn test_golden_grouping_cases() {
    for case in golden_cases() {
        let active: Vec<String> = case.active.iter().map(|s| s.to_string()).collect();
        let records = make_records(case.records);

        let groups = group_records(&active, &records, DEFAULT_YEAR);
        assert_eq!(groups.len(), case.expected_groups.len(), "case {}", case.id);
        for (group, (base, years)) in groups.iter().zip(case.expected_groups) {
            assert_eq!(group.base, *base, "case {}: base mismatch", case.id);
            let actual: Vec<i32> = group.entries.iter().map(|e| e.year).collect();
            assert_eq!(actual, *years, "case {}: years for {}", case.id, base);
        }

        let ordered = display_groups(&active, &records, DEFAULT_YEAR);
        let order: Vec<&str> = ordered.iter().map(|g| g.base.as_str()).collect();
        assert_eq!(order, case.expected_order, "case {}: display order", case.id);
    }
}

#[test]
fn test_groups_are_strictly_newest_first_with_stable_ties() {
    let active: Vec<String> = ["checkup_2019", "checkup_2021", "checkup_2020", "checkup"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let records = make_records(&[
        ("checkup_2019", 5.0),
        ("checkup_2021", 5.0),
        ("checkup_2020", 5.0),
        ("checkup", 5.0),
    ]);

    let groups = group_records(&active, &records, 2021);
    let order: Vec<(&str, i32)> = groups[0]
        .entries
        .iter()
        .map(|e| (e.test_type, e.year))
        .collect();
    // The undated record shares year 2021 with checkup_2021 and keeps its
    // later encounter position.
    assert_eq!(
        order,
        vec![
            ("checkup_2021", 2021),
            ("checkup", 2021),
            ("checkup_2020", 2020),
            ("checkup_2019", 2019),
        ]
    );
}

#[test]
fn test_history_partition_counts() {
    let active: Vec<String> = ["checkup_2019", "checkup_2020", "checkup_2021"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let records = make_records(&[
        ("checkup_2019", 5.0),
        ("checkup_2020", 5.0),
        ("checkup_2021", 5.0),
    ]);

    let groups = group_records(&active, &records, DEFAULT_YEAR);
    let group = &groups[0];
    let history = group.history().expect("size-3 group has history");

    assert_eq!(history.total(), group.entries.len() - 1);
    let bucket_sum: usize = history.buckets.iter().map(|b| b.entries.len()).sum();
    assert_eq!(bucket_sum, group.entries.len() - 1);
}

#[test]
fn test_navigation_agrees_with_content_on_latest_records() {
    let active = ["checkup_2020", "checkup_2021", "blood_2022", "blood_2021", "thyroid"];
    let records = make_records(&[
        ("checkup_2020", 5.0),
        ("checkup_2021", 5.0),
        ("blood_2022", 9.0),
        ("blood_2021", 9.0),
        ("thyroid", 7.0),
    ]);
    let config = make_config(&active);

    let groups = display_groups(&config.active_tests, &records, DEFAULT_YEAR);
    let menu = build_navigation(&config, &records, DEFAULT_YEAR);

    // Every scroll-to-card target in the menu is the head record of the
    // corresponding content group.
    for section in &menu.sections {
        for item in &section.items {
            if let NavTarget::Card { test_type } = &item.target {
                let head = groups
                    .iter()
                    .find(|g| g.entries.iter().any(|e| e.test_type == test_type))
                    .map(|g| g.current().test_type)
                    .expect("nav card target must exist in content groups");
                assert_eq!(head, test_type, "nav and content disagree on latest record");
            }
        }
    }

    // And every group head has a card target somewhere in the menu.
    for group in &groups {
        let head = group.current().test_type;
        let found = menu.sections.iter().any(|s| {
            s.items.iter().any(|i| {
                matches!(&i.target, NavTarget::Card { test_type } if test_type == head)
            })
        });
        assert!(found, "group head {head} missing from navigation");
    }
}
