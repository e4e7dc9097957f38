//! crates/symptom_journal_core/src/range.rs
//!
//! Range filtering and display ordering shared by listing, prompting,
//! linking and exporting.

use crate::domain::{DateRange, LlmOutputRecord, LogEntry};
use chrono::NaiveDate;

/// Optional inclusive bounds. An absent side never excludes anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateBounds {
    pub const UNBOUNDED: DateBounds = DateBounds { from: None, to: None };

    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if matches!(self.from, Some(from) if date < from) {
            return false;
        }
        if matches!(self.to, Some(to) if date > to) {
            return false;
        }
        true
    }
}

impl From<DateRange> for DateBounds {
    fn from(range: DateRange) -> Self {
        Self {
            from: Some(range.from),
            to: Some(range.to),
        }
    }
}

/// Anything that is filtered by a single calendar date.
pub trait Dated {
    fn date_key(&self) -> NaiveDate;
}

impl Dated for LogEntry {
    fn date_key(&self) -> NaiveDate {
        self.entry_date
    }
}

/// Outputs are filtered by the start of the range they cover.
impl Dated for LlmOutputRecord {
    fn date_key(&self) -> NaiveDate {
        self.target_range.from
    }
}

/// Keeps the items whose date lies within `bounds`, preserving their order.
pub fn filter_by_range<T, I>(items: I, bounds: &DateBounds) -> Vec<T>
where
    T: Dated,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .filter(|item| bounds.contains(item.date_key()))
        .collect()
}

/// Newest entry date first; same-day entries newest-created first.
pub fn sort_entries_for_display(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| {
        b.entry_date
            .cmp(&a.entry_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Newest-created output first.
pub fn sort_outputs_for_display(outputs: &mut [LlmOutputRecord]) {
    outputs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Oldest entry date first, keeping stored order within a day. Used for prompt logs.
pub fn sort_entries_chronologically(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| a.entry_date.cmp(&b.entry_date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderedSet;
    use chrono::{DateTime, Duration, Utc};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn at(minutes: i64) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
            + Duration::minutes(minutes)
    }

    fn entry(id: &str, day: &str, created_minute: i64) -> LogEntry {
        LogEntry {
            id: id.to_string(),
            created_at: at(created_minute),
            entry_date: date(day),
            complaint_text: format!("complaint {id}"),
            weight_score: None,
            tags: OrderedSet::new(),
            llm_summary_ids: OrderedSet::new(),
        }
    }

    fn week() -> Vec<LogEntry> {
        (1..=7)
            .map(|d| entry(&format!("e{d}"), &format!("2024-01-0{d}"), d))
            .collect()
    }

    fn ids(entries: &[LogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn every_filtered_item_lies_within_bounds() {
        let bounds = DateBounds::new(Some(date("2024-01-02")), Some(date("2024-01-04")));
        let filtered = filter_by_range(week(), &bounds);
        assert_eq!(filtered.len(), 3);
        for e in &filtered {
            assert!(date("2024-01-02") <= e.entry_date && e.entry_date <= date("2024-01-04"));
        }
    }

    #[test]
    fn absent_bounds_never_exclude() {
        assert_eq!(filter_by_range(week(), &DateBounds::UNBOUNDED).len(), 7);

        let only_to = DateBounds::new(None, Some(date("2024-01-02")));
        assert_eq!(ids(&filter_by_range(week(), &only_to)), ["e1", "e2"]);

        let only_from = DateBounds::new(Some(date("2024-01-06")), None);
        assert_eq!(ids(&filter_by_range(week(), &only_from)), ["e6", "e7"]);
    }

    #[test]
    fn filter_preserves_input_order() {
        let mut reversed = week();
        reversed.reverse();
        let bounds = DateBounds::new(Some(date("2024-01-03")), Some(date("2024-01-05")));
        assert_eq!(ids(&filter_by_range(reversed, &bounds)), ["e5", "e4", "e3"]);
    }

    #[test]
    fn mid_week_range_lists_newest_day_first() {
        let bounds = DateBounds::new(Some(date("2024-01-03")), Some(date("2024-01-05")));
        let mut selected = filter_by_range(week(), &bounds);
        sort_entries_for_display(&mut selected);
        assert_eq!(ids(&selected), ["e5", "e4", "e3"]);
    }

    #[test]
    fn same_day_entries_show_newest_created_first() {
        let mut entries = vec![
            entry("early", "2024-01-03", 1),
            entry("other-day", "2024-01-02", 99),
            entry("late", "2024-01-03", 50),
        ];
        sort_entries_for_display(&mut entries);
        assert_eq!(ids(&entries), ["late", "early", "other-day"]);
    }

    #[test]
    fn chronological_sort_is_stable_within_a_day() {
        let mut entries = vec![
            entry("b", "2024-01-03", 9),
            entry("a", "2024-01-01", 1),
            entry("c", "2024-01-03", 2),
        ];
        sort_entries_chronologically(&mut entries);
        assert_eq!(ids(&entries), ["a", "b", "c"]);
    }

    #[test]
    fn bounds_from_range_are_inclusive() {
        let bounds: DateBounds = DateRange::new(date("2024-01-03"), date("2024-01-03")).into();
        assert!(bounds.contains(date("2024-01-03")));
        assert!(!bounds.contains(date("2024-01-02")));
        assert_ne!(bounds, DateBounds::UNBOUNDED);
    }
}
