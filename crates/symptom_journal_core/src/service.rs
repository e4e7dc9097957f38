//! crates/symptom_journal_core/src/service.rs
//!
//! `JournalService` sequences the stores, filter, prompt builder, parser and
//! linker for each user action. Every mutating action is a read-modify-write
//! of whole collections; mutating actions are serialized behind one lock.

use crate::domain::{
    DateRange, EntryDraft, LlmOutputRecord, LogEntry, OrderedSet, ReplySubmission,
};
use crate::error::{JournalError, JournalResult};
use crate::export::{assemble_export, ExportSnapshot};
use crate::linker::link_output;
use crate::parser::parse_reply;
use crate::ports::{Clock, IdGenerator, KeyValueStore};
use crate::prompt::{build_prompt, PROMPT_VERSION};
use crate::range::{
    filter_by_range, sort_entries_chronologically, sort_entries_for_display,
    sort_outputs_for_display, DateBounds,
};
use crate::store::{EntryStore, OutputStore};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// A rendered prompt and what went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptBundle {
    pub range: DateRange,
    pub prompt: String,
    pub entry_count: usize,
}

/// The outcome of saving a pasted reply.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedReply {
    pub record: LlmOutputRecord,
    /// Entries that gained a back-reference to `record`.
    pub linked_entries: usize,
}

pub struct JournalService {
    entries: EntryStore,
    outputs: OutputStore,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    writes: Mutex<()>,
}

impl JournalService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            entries: EntryStore::entries(store.clone()),
            outputs: OutputStore::outputs(store),
            ids,
            clock,
            writes: Mutex::new(()),
        }
    }

    /// Today's date according to the injected clock (UTC).
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    //=====================================================================================
    // Log Entries
    //=====================================================================================

    pub async fn create_entry(&self, draft: EntryDraft) -> JournalResult<LogEntry> {
        let draft = normalize_draft(draft)?;
        let _guard = self.writes.lock().await;

        let mut entries = self.entries.load().await;
        let entry = LogEntry {
            id: self.ids.next_id(),
            created_at: self.clock.now(),
            entry_date: draft.entry_date,
            complaint_text: draft.complaint_text,
            weight_score: draft.weight_score,
            tags: draft.tags.into_iter().collect(),
            llm_summary_ids: OrderedSet::new(),
        };
        entries.items.push(entry.clone());
        self.entries.save(&entries).await?;

        info!(entry_id = %entry.id, entry_date = %entry.entry_date, "Log entry created");
        Ok(entry)
    }

    pub async fn get_entry(&self, id: &str) -> JournalResult<LogEntry> {
        self.entries
            .load()
            .await
            .items
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| JournalError::NotFound(format!("Log entry {id}")))
    }

    /// Replaces the editable fields. Id, creation time and back-references are kept.
    pub async fn update_entry(&self, id: &str, draft: EntryDraft) -> JournalResult<LogEntry> {
        let draft = normalize_draft(draft)?;
        let _guard = self.writes.lock().await;

        let mut entries = self.entries.load().await;
        let entry = entries
            .items
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| JournalError::NotFound(format!("Log entry {id}")))?;
        entry.entry_date = draft.entry_date;
        entry.complaint_text = draft.complaint_text;
        entry.weight_score = draft.weight_score;
        entry.tags = draft.tags.into_iter().collect();
        let updated = entry.clone();

        self.entries.save(&entries).await?;
        info!(entry_id = %id, "Log entry updated");
        Ok(updated)
    }

    /// Removes an entry. Output records that reference it are left alone.
    pub async fn delete_entry(&self, id: &str) -> JournalResult<()> {
        let _guard = self.writes.lock().await;

        let mut entries = self.entries.load().await;
        let before = entries.items.len();
        entries.items.retain(|entry| entry.id != id);
        if entries.items.len() == before {
            return Err(JournalError::NotFound(format!("Log entry {id}")));
        }

        self.entries.save(&entries).await?;
        info!(entry_id = %id, "Log entry deleted");
        Ok(())
    }

    /// Entries within `bounds`, newest date first.
    pub async fn list_entries(&self, bounds: &DateBounds) -> Vec<LogEntry> {
        let mut entries = filter_by_range(self.entries.load().await.items, bounds);
        sort_entries_for_display(&mut entries);
        debug!(count = entries.len(), "Listed log entries");
        entries
    }

    //=====================================================================================
    // Prompt and Replies
    //=====================================================================================

    /// Renders the prompt for `range` from the entries dated inside it, oldest first.
    pub async fn build_prompt(&self, range: DateRange) -> PromptBundle {
        let mut entries = filter_by_range(self.entries.load().await.items, &range.into());
        sort_entries_chronologically(&mut entries);

        PromptBundle {
            range,
            prompt: build_prompt(range.from, range.to, &entries),
            entry_count: entries.len(),
        }
    }

    /// Parses and stores a pasted reply, then links it from the covered entries.
    ///
    /// The raw text is stored as given even when nothing could be parsed.
    /// If the entry write fails after the record was stored, the record is still
    /// returned and the entries simply lack the back-reference.
    pub async fn save_reply(&self, submission: ReplySubmission) -> JournalResult<SavedReply> {
        if submission.raw_text.trim().is_empty() {
            return Err(JournalError::Validation(
                "reply text must not be empty".to_string(),
            ));
        }
        let model_info = submission
            .model_info
            .map(|info| info.trim().to_string())
            .filter(|info| !info.is_empty());
        let parsed = parse_reply(&submission.raw_text);
        let parse_failed = parsed.is_empty();

        let _guard = self.writes.lock().await;

        let record = LlmOutputRecord {
            id: self.ids.next_id(),
            created_at: self.clock.now(),
            target_range: submission.target_range,
            prompt_version: PROMPT_VERSION.to_string(),
            model_info,
            summary_text: parsed.summary_text,
            patterns_text: parsed.patterns_text,
            cautions_text: parsed.cautions_text,
            one_step_text: parsed.one_step_text,
            rewrite_text: parsed.rewrite_text,
            raw_text: submission.raw_text,
        };

        let mut outputs = self.outputs.load().await;
        outputs.items.push(record.clone());
        self.outputs.save(&outputs).await?;

        let mut entries = self.entries.load().await;
        let mut linked_entries = link_output(&mut entries.items, &record);
        if linked_entries > 0 {
            if let Err(e) = self.entries.save(&entries).await {
                error!(output_id = %record.id, error = %e, "Failed to store back-references");
                linked_entries = 0;
            }
        }

        info!(
            output_id = %record.id,
            parsed = !parse_failed,
            linked_entries,
            "Model reply saved"
        );
        Ok(SavedReply {
            record,
            linked_entries,
        })
    }

    /// Outputs whose range starts within `bounds`, newest first.
    pub async fn list_outputs(&self, bounds: &DateBounds) -> Vec<LlmOutputRecord> {
        let mut outputs = filter_by_range(self.outputs.load().await.items, bounds);
        sort_outputs_for_display(&mut outputs);
        debug!(count = outputs.len(), "Listed output records");
        outputs
    }

    pub async fn get_output(&self, id: &str) -> JournalResult<LlmOutputRecord> {
        self.outputs
            .load()
            .await
            .items
            .into_iter()
            .find(|output| output.id == id)
            .ok_or_else(|| JournalError::NotFound(format!("Output record {id}")))
    }

    //=====================================================================================
    // Export
    //=====================================================================================

    pub async fn export(&self, bounds: &DateBounds) -> ExportSnapshot {
        let entries = self.entries.load().await;
        let outputs = self.outputs.load().await;
        let snapshot = assemble_export(&entries.items, &outputs.items, bounds, self.clock.now());
        info!(
            entries = snapshot.log_entries.len(),
            outputs = snapshot.llm_outputs.len(),
            "Export assembled"
        );
        snapshot
    }
}

/// Trims the complaint and tags, rejecting a blank complaint.
fn normalize_draft(draft: EntryDraft) -> JournalResult<EntryDraft> {
    let complaint_text = draft.complaint_text.trim().to_string();
    if complaint_text.is_empty() {
        return Err(JournalError::Validation(
            "complaint text must not be empty".to_string(),
        ));
    }
    let tags = draft
        .tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    Ok(EntryDraft {
        complaint_text,
        tags,
        ..draft
    })
}
