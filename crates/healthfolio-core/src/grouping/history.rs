//! History selection: current record vs. year-bucketed history.

use super::{GroupEntry, TestGroup};

/// History records of a group, bucketed by year, newest bucket first.
#[derive(Debug)]
pub struct HistoryView<'a> {
    pub buckets: Vec<YearBucket<'a>>,
}

impl HistoryView<'_> {
    /// Total number of history records across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }
}

/// All history records sharing a year, in encounter order.
#[derive(Debug)]
pub struct YearBucket<'a> {
    pub year: i32,
    pub entries: Vec<GroupEntry<'a>>,
}

impl<'a> TestGroup<'a> {
    /// Split off the history of this group.
    ///
    /// The first entry is the current record and is not part of the result.
    /// A group of size 1 has no history at all, not an empty one.
    pub fn history(&self) -> Option<HistoryView<'a>> {
        if self.entries.len() < 2 {
            return None;
        }

        let mut buckets: Vec<YearBucket<'a>> = Vec::new();
        for entry in &self.entries[1..] {
            match buckets.iter_mut().find(|b| b.year == entry.year) {
                Some(bucket) => bucket.entries.push(*entry),
                None => buckets.push(YearBucket { year: entry.year, entries: vec![*entry] }),
            }
        }
        buckets.sort_by(|a, b| b.year.cmp(&a.year));

        Some(HistoryView { buckets })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::super::group_records;
    use super::super::tests::{make_record, make_store};
    use crate::models::TestRecord;

    fn single_group<'a>(
        active: &'a [String],
        records: &'a HashMap<String, TestRecord>,
    ) -> super::super::TestGroup<'a> {
        let mut groups = group_records(active, records, 2026);
        assert_eq!(groups.len(), 1);
        groups.remove(0)
    }

    #[test]
    fn test_size_one_group_has_no_history() {
        let records = make_store(&[("blood_2022", 9.0)]);
        let active = vec!["blood_2022".to_string()];
        let group = single_group(&active, &records);
        assert!(group.history().is_none());
    }

    #[test]
    fn test_history_counts_add_up() {
        let records = make_store(&[
            ("checkup_2019", 5.0),
            ("checkup_2020", 5.0),
            ("checkup_2021", 5.0),
        ]);
        let active: Vec<String> = ["checkup_2019", "checkup_2020", "checkup_2021"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let group = single_group(&active, &records);

        let history = group.history().unwrap();
        assert_eq!(group.current().year, 2021);
        assert_eq!(history.total(), group.entries.len() - 1);
        let years: Vec<i32> = history.buckets.iter().map(|b| b.year).collect();
        assert_eq!(years, vec![2020, 2019]);
    }

    #[test]
    fn test_duplicate_years_share_a_bucket() {
        let mut records = make_store(&[("thyroid_2023", 7.0), ("thyroid_2021", 7.0)]);
        records.insert("thyroid".to_string(), make_record("undated", 7.0));

        let active: Vec<String> = ["thyroid_2023", "thyroid_2021", "thyroid"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        // Default year 2021 puts the undated record into the 2021 bucket...
        let mut groups = group_records(&active, &records, 2021);
        assert_eq!(groups.len(), 1);
        let group = groups.remove(0);

        // ...but 2023 still wins the current slot.
        assert_eq!(group.current().year, 2023);
        let history = group.history().unwrap();
        assert_eq!(history.buckets.len(), 1);
        assert_eq!(history.buckets[0].year, 2021);
        assert_eq!(history.buckets[0].entries.len(), 2);
        assert_eq!(history.total(), 2);
    }
}
