//! Test-record grouping pipeline.
//!
//! Pipeline: active identifiers → base-type groups → history split
//!
//! Both the report renderer and the navigation builder derive their view of
//! "which records belong together, newest first" from [`group_records`], so
//! the two can never disagree on the latest record of a group.

mod history;
mod navigation;

pub use history::*;
pub use navigation::*;

use std::collections::HashMap;

use crate::models::TestRecord;

/// Strip a trailing `_YYYY` suffix from a test identifier.
///
/// Only a 4-digit suffix separated by an underscore counts; a year embedded
/// elsewhere (e.g. `thyroid_2021_redo`) is left alone.
pub fn base_type(test_type: &str) -> &str {
    if let Some(idx) = test_type.len().checked_sub(5) {
        if test_type.is_char_boundary(idx) {
            let (head, tail) = test_type.split_at(idx);
            let tail = tail.as_bytes();
            if tail[0] == b'_' && tail[1..].iter().all(u8::is_ascii_digit) && !head.is_empty() {
                return head;
            }
        }
    }
    test_type
}

/// Extract the first 4-digit run from a test identifier.
///
/// Identifiers without a year sort as `default_year` (the current calendar
/// year at load time), i.e. as the most recent entry of their group.
pub fn extract_year(test_type: &str, default_year: i32) -> i32 {
    let bytes = test_type.as_bytes();
    let mut run = 0;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            run += 1;
            if run == 4 {
                return test_type[i - 3..=i].parse().unwrap_or(default_year);
            }
        } else {
            run = 0;
        }
    }
    default_year
}

/// One loaded record bound to its identifier and derived year.
#[derive(Debug, Clone, Copy)]
pub struct GroupEntry<'a> {
    /// Full test identifier, e.g. `"checkup_2021"`.
    pub test_type: &'a str,
    pub record: &'a TestRecord,
    /// Extracted (or defaulted) year used for ordering.
    pub year: i32,
}

/// All records sharing a base type, ordered newest-first.
///
/// Groups are only created for identifiers with a loaded record, so a group
/// is never empty.
#[derive(Debug)]
pub struct TestGroup<'a> {
    /// Shared base type of every entry.
    pub base: String,
    /// Entries sorted descending by year; ties keep encounter order.
    pub entries: Vec<GroupEntry<'a>>,
}

impl<'a> TestGroup<'a> {
    /// The latest record of the group, rendered unconditionally.
    pub fn current(&self) -> GroupEntry<'a> {
        self.entries[0]
    }

    /// Editorial weight of the group: the `sort` field of its latest record.
    pub fn sort_weight(&self) -> f64 {
        self.current().record.diagnosis.sort
    }
}

/// Bucket loaded records by base type.
///
/// Walks `active` in order; identifiers without a loaded record are silently
/// skipped so one missing data file never aborts the rest of the report.
/// Groups come back in first-seen order; entries within a group are sorted
/// descending by extracted year with a stable sort, so same-year records
/// keep their encounter order. Empty input yields an empty output.
pub fn group_records<'a>(
    active: &'a [String],
    records: &'a HashMap<String, TestRecord>,
    default_year: i32,
) -> Vec<TestGroup<'a>> {
    let mut groups: Vec<TestGroup<'a>> = Vec::new();

    for test_type in active {
        let Some(record) = records.get(test_type) else {
            continue;
        };
        let entry = GroupEntry {
            test_type,
            record,
            year: extract_year(test_type, default_year),
        };
        let base = base_type(test_type);
        match groups.iter_mut().find(|g| g.base == base) {
            Some(group) => group.entries.push(entry),
            None => groups.push(TestGroup { base: base.to_string(), entries: vec![entry] }),
        }
    }

    for group in &mut groups {
        group.entries.sort_by(|a, b| b.year.cmp(&a.year));
    }

    groups
}

/// Groups in display order: descending `sort` weight of each group's latest
/// record, ties resolved to first-seen order (stable sort).
pub fn display_groups<'a>(
    active: &'a [String],
    records: &'a HashMap<String, TestRecord>,
    default_year: i32,
) -> Vec<TestGroup<'a>> {
    let mut groups = group_records(active, records, default_year);
    groups.sort_by(|a, b| {
        b.sort_weight()
            .partial_cmp(&a.sort_weight())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups
}
