//! crates/symptom_journal_core/src/prompt.rs
//!
//! Renders the instruction prompt the user copies into an external model.
//! The numbered output format at the bottom of the template is the contract
//! the reply parser relies on; keep headings and numbering in sync with it.

use crate::domain::LogEntry;
use chrono::NaiveDate;

/// Identifies the template below. Stored on every output record.
pub const PROMPT_VERSION: &str = "v0.1";

/// Rendered in place of the log excerpt when the range has no entries.
pub const NO_LOGS_PLACEHOLDER: &str = "- (no logs)";

pub const PROMPT_TEMPLATE: &str = "You help turn a personal symptom log into neutral observation notes.
Rules:
- Do not diagnose or make definitive medical claims
- Do not suggest strenuous or risky exercise
- Only suggest low-effort steps that take 10-15 minutes or less
- Follow the output format below (1-6) exactly
- Always include the numbers 1) to 6) with their headings (no missing or reordered numbers)

Period: {FROM} to {TO}

Logs:
{LOGS}

Output format:
1) Summary in 5 lines or fewer
2) Most frequent complaints (bullet points)
3) Conditions that tend to make things worse (hypotheses, one line each)
4) Signs to watch for (conditional, never definitive)
5) One step for tomorrow (exactly one, 10-15 minutes or less, concrete)
6) Neutral rewording of self-critical remarks (short)";

/// Renders one entry as `- DATE: TEXT (severity N / tags: a, b)`.
/// The parenthesis is omitted when there is neither a score nor tags.
pub fn render_log_line(entry: &LogEntry) -> String {
    let mut details = Vec::new();
    if let Some(score) = entry.weight_score {
        details.push(format!("severity {score}"));
    }
    if !entry.tags.is_empty() {
        details.push(format!("tags: {}", entry.tags.as_slice().join(", ")));
    }

    let detail = if details.is_empty() {
        String::new()
    } else {
        format!(" ({})", details.join(" / "))
    };
    format!("- {}: {}{}", entry.entry_date, entry.complaint_text, detail)
}

/// Renders the log excerpt, one line per entry in the given order.
pub fn render_logs(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return NO_LOGS_PLACEHOLDER.to_string();
    }
    entries
        .iter()
        .map(render_log_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full prompt for `[from, to]` from the entries already selected for that range.
pub fn build_prompt(from: NaiveDate, to: NaiveDate, entries: &[LogEntry]) -> String {
    PROMPT_TEMPLATE
        .replacen("{FROM}", &from.to_string(), 1)
        .replacen("{TO}", &to.to_string(), 1)
        .replacen("{LOGS}", &render_logs(entries), 1)
}
