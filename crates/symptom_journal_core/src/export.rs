//! crates/symptom_journal_core/src/export.rs
//!
//! Assembles the downloadable snapshot of both collections.

use crate::domain::{LlmOutputRecord, LogEntry};
use crate::range::{filter_by_range, DateBounds};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Suggested file name for the downloaded export.
pub const EXPORT_FILE_NAME: &str = "symptom-log-export.json";

/// The export document: `{exportedAt, logEntries, llmOutputs}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub exported_at: DateTime<Utc>,
    pub log_entries: Vec<LogEntry>,
    pub llm_outputs: Vec<LlmOutputRecord>,
}

/// Copies the entries and outputs that fall inside `bounds`, in stored order.
/// Entries match on their entry date, outputs on the start of their target range.
pub fn assemble_export(
    entries: &[LogEntry],
    outputs: &[LlmOutputRecord],
    bounds: &DateBounds,
    exported_at: DateTime<Utc>,
) -> ExportSnapshot {
    ExportSnapshot {
        exported_at,
        log_entries: filter_by_range(entries.iter().cloned(), bounds),
        llm_outputs: filter_by_range(outputs.iter().cloned(), bounds),
    }
}
