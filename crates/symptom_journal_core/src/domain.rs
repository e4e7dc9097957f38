//! crates/symptom_journal_core/src/domain.rs
//!
//! Defines the core data structures for the symptom journal.
//! These structs are what the key-value store persists and what the
//! export file contains, so their serde shape is part of the contract.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

//=========================================================================================
// OrderedSet
//=========================================================================================

/// A set of strings that remembers insertion order.
///
/// Used for entry tags and output back-references. Duplicates are dropped on
/// construction and on insert, including when a stored collection is read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct OrderedSet(Vec<String>);

impl OrderedSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts `value` unless already present. Returns `true` if it was added.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl FromIterator<String> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl From<Vec<String>> for OrderedSet {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<OrderedSet> for Vec<String> {
    fn from(set: OrderedSet) -> Self {
        set.0
    }
}

//=========================================================================================
// Date Range
//=========================================================================================

/// An inclusive `[from, to]` pair of calendar dates.
///
/// `from <= to` is not enforced; a reversed range simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The `days`-long range that ends on `to`, e.g. 7 days ending on the 7th starts on the 1st.
    /// A `days` of zero is treated as one.
    pub fn ending_at(to: NaiveDate, days: u32) -> Self {
        let span = u64::from(days.max(1) - 1);
        let from = to.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

//=========================================================================================
// Log Entries
//=========================================================================================

/// One user-authored symptom/complaint record keyed by calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub entry_date: NaiveDate,
    pub complaint_text: String,
    pub weight_score: Option<i32>,
    #[serde(default)]
    pub tags: OrderedSet,
    /// Ids of output records whose range covered this entry. Only the linker adds to it.
    #[serde(default)]
    pub llm_summary_ids: OrderedSet,
}

/// The owner-editable part of an entry, used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub entry_date: NaiveDate,
    pub complaint_text: String,
    pub weight_score: Option<i32>,
    pub tags: Vec<String>,
}

//=========================================================================================
// LLM Output Records
//=========================================================================================

/// The structured result of parsing one pasted model reply, tied to a date range.
/// Created once and never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmOutputRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub target_range: DateRange,
    pub prompt_version: String,
    pub model_info: Option<String>,
    pub summary_text: String,
    pub patterns_text: String,
    pub cautions_text: String,
    pub one_step_text: String,
    pub rewrite_text: String,
    pub raw_text: String,
}

impl LlmOutputRecord {
    /// True when none of the five sections could be recovered from `raw_text`.
    pub fn parse_failed(&self) -> bool {
        [
            &self.summary_text,
            &self.patterns_text,
            &self.cautions_text,
            &self.one_step_text,
            &self.rewrite_text,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}

/// A pasted reply together with the range it is about.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplySubmission {
    pub target_range: DateRange,
    pub model_info: Option<String>,
    pub raw_text: String,
}
