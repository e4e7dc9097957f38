//! crates/symptom_journal_core/src/review.rs
//!
//! Text helpers for reviewing stored entries and outputs.

use crate::domain::LlmOutputRecord;

/// Character budget of list previews.
pub const PREVIEW_CHARS: usize = 30;

/// Shortens `text` to `max_chars` characters, appending `…` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// The list preview of an output: its summary, or the raw reply when parsing failed.
pub fn output_preview(output: &LlmOutputRecord) -> String {
    let source = if output.summary_text.is_empty() {
        &output.raw_text
    } else {
        &output.summary_text
    };
    preview(source, PREVIEW_CHARS)
}

/// Plain-text detail view of an output record, sections in reply order then the raw text.
pub fn render_output_detail(output: &LlmOutputRecord) -> String {
    let status = if output.parse_failed() { "failed" } else { "ok" };
    format!(
        "Period: {} to {}\nParsed: {}\n\n1) {}\n\n2) {}\n\n3/4) {}\n\n5) {}\n\n6) {}\n\n(raw)\n{}",
        output.target_range.from,
        output.target_range.to,
        status,
        output.summary_text,
        output.patterns_text,
        output.cautions_text,
        output.one_step_text,
        output.rewrite_text,
        output.raw_text,
    )
}
