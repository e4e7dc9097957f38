//! crates/symptom_journal_core/src/linker.rs
//!
//! Stamps back-references from entries to a newly saved output record.
//! This is the one place where saving an output mutates the entry collection.

use crate::domain::{LlmOutputRecord, LogEntry};

/// Adds `output.id` to every entry dated inside `output.target_range`.
///
/// Entries outside the range are left untouched. Linking the same output
/// twice is a no-op the second time. Returns how many entries gained the id.
pub fn link_output(entries: &mut [LogEntry], output: &LlmOutputRecord) -> usize {
    entries
        .iter_mut()
        .filter(|entry| output.target_range.contains(entry.entry_date))
        .map(|entry| entry.llm_summary_ids.insert(output.id.as_str()))
        .filter(|added| *added)
        .count()
}
