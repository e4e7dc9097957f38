//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API
//! server, and their conversions to and from the core domain types.

use crate::error::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use symptom_journal_core::review::{output_preview, preview, PREVIEW_CHARS};
use symptom_journal_core::{
    DateBounds, DateRange, EntryDraft, LlmOutputRecord, LogEntry, PromptBundle, ReplySubmission,
    SavedReply,
};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Query Parameters
//=========================================================================================

/// Optional date bounds. Empty values (`?from=`) count as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Quick range: the last `days` days ending at `to` (or today). Ignored when `from` is set.
    pub days: Option<u32>,
}

impl RangeQuery {
    pub fn bounds(&self, today: NaiveDate) -> Result<DateBounds, ApiError> {
        let from = parse_optional_date("from", self.from.as_deref())?;
        let to = parse_optional_date("to", self.to.as_deref())?;

        match (from, self.days) {
            (None, Some(days)) => {
                let range = DateRange::ending_at(to.unwrap_or(today), days);
                Ok(DateBounds::from(range))
            }
            _ => Ok(DateBounds::new(from, to)),
        }
    }
}

/// Parses an optional `YYYY-MM-DD` value, treating blank as absent.
pub fn parse_optional_date(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("'{}' is not a valid {} date", raw, name))),
    }
}

/// Parses a `YYYY-MM-DD` value that must be present.
pub fn parse_required_date(name: &str, value: &str) -> Result<NaiveDate, ApiError> {
    parse_optional_date(name, Some(value))?
        .ok_or_else(|| ApiError::BadRequest(format!("{} date is required", name)))
}

//=========================================================================================
// Log Entries
//=========================================================================================

/// Body of entry create and update requests.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    /// `YYYY-MM-DD`
    #[schema(example = "2024-01-07")]
    pub entry_date: String,
    pub complaint_text: String,
    pub weight_score: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TryFrom<EntryRequest> for EntryDraft {
    type Error = ApiError;

    fn try_from(req: EntryRequest) -> Result<Self, Self::Error> {
        Ok(EntryDraft {
            entry_date: parse_required_date("entryDate", &req.entry_date)?,
            complaint_text: req.complaint_text,
            weight_score: req.weight_score,
            tags: req.tags,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub entry_date: NaiveDate,
    pub complaint_text: String,
    pub weight_score: Option<i32>,
    pub tags: Vec<String>,
    pub llm_summary_ids: Vec<String>,
    /// Short form of the complaint for list views.
    pub preview: String,
}

impl From<LogEntry> for EntryResponse {
    fn from(entry: LogEntry) -> Self {
        let short = preview(&entry.complaint_text, PREVIEW_CHARS);
        Self {
            id: entry.id,
            created_at: entry.created_at,
            entry_date: entry.entry_date,
            complaint_text: entry.complaint_text,
            weight_score: entry.weight_score,
            tags: entry.tags.into(),
            llm_summary_ids: entry.llm_summary_ids.into(),
            preview: short,
        }
    }
}

//=========================================================================================
// Prompts
//=========================================================================================

/// Both bounds are optional; a missing `to` means today and a missing `from`
/// means the configured quick range ending at `to`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PromptRequest {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub prompt: String,
    pub entry_count: usize,
}

impl From<PromptBundle> for PromptResponse {
    fn from(bundle: PromptBundle) -> Self {
        Self {
            from: bundle.range.from,
            to: bundle.range.to,
            prompt: bundle.prompt,
            entry_count: bundle.entry_count,
        }
    }
}

//=========================================================================================
// Output Records
//=========================================================================================

/// A pasted model reply for the range it answers.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveReplyRequest {
    #[schema(example = "2024-01-01")]
    pub from: String,
    #[schema(example = "2024-01-07")]
    pub to: String,
    pub model_info: Option<String>,
    pub raw_text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RangeDto {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub target_range: RangeDto,
    pub prompt_version: String,
    pub model_info: Option<String>,
    pub summary_text: String,
    pub patterns_text: String,
    pub cautions_text: String,
    pub one_step_text: String,
    pub rewrite_text: String,
    pub raw_text: String,
    /// False when no numbered section could be read from the reply.
    pub parsed: bool,
    pub preview: String,
}

impl From<LlmOutputRecord> for OutputResponse {
    fn from(output: LlmOutputRecord) -> Self {
        let parsed = !output.parse_failed();
        let short = output_preview(&output);
        Self {
            id: output.id,
            created_at: output.created_at,
            target_range: RangeDto {
                from: output.target_range.from,
                to: output.target_range.to,
            },
            prompt_version: output.prompt_version,
            model_info: output.model_info,
            summary_text: output.summary_text,
            patterns_text: output.patterns_text,
            cautions_text: output.cautions_text,
            one_step_text: output.one_step_text,
            rewrite_text: output.rewrite_text,
            raw_text: output.raw_text,
            parsed,
            preview: short,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveReplyResponse {
    pub output: OutputResponse,
    pub linked_entries: usize,
}

impl TryFrom<SaveReplyRequest> for ReplySubmission {
    type Error = ApiError;

    fn try_from(req: SaveReplyRequest) -> Result<Self, Self::Error> {
        Ok(ReplySubmission {
            target_range: DateRange::new(
                parse_required_date("from", &req.from)?,
                parse_required_date("to", &req.to)?,
            ),
            model_info: req.model_info,
            raw_text: req.raw_text,
        })
    }
}

impl From<SavedReply> for SaveReplyResponse {
    fn from(saved: SavedReply) -> Self {
        Self {
            linked_entries: saved.linked_entries,
            output: saved.record.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
