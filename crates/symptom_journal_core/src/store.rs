//! crates/symptom_journal_core/src/store.rs
//!
//! The Entry Store and Output Store: two independently keyed JSON collections
//! on top of a `KeyValueStore`. Reads never fail; a missing, unreadable or
//! malformed collection is treated as empty, and a record that no longer
//! matches the schema is carried through writes untouched.

use crate::domain::{LlmOutputRecord, LogEntry};
use crate::ports::{KeyValueStore, PortError, PortResult};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key of the log entry collection.
pub const ENTRIES_KEY: &str = "entries";
/// Storage key of the output record collection.
pub const OUTPUTS_KEY: &str = "outputs";

/// A whole collection of `T` stored as one JSON array under a single key.
pub struct Collection<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _items: PhantomData<fn() -> T>,
}

pub type EntryStore = Collection<LogEntry>;
pub type OutputStore = Collection<LlmOutputRecord>;

impl EntryStore {
    pub fn entries(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, ENTRIES_KEY)
    }
}

impl OutputStore {
    pub fn outputs(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, OUTPUTS_KEY)
    }
}

/// The loaded contents of a collection.
///
/// Records that do not decode as `T` are skipped for reading but kept as raw
/// JSON, and `Collection::save` writes them back after the readable ones.
#[derive(Debug)]
pub struct Records<T> {
    pub items: Vec<T>,
    unreadable: Vec<Value>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            unreadable: Vec::new(),
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _items: PhantomData,
        }
    }

    /// Loads the full collection. Never fails: a missing key, an unreadable
    /// backend or a document that is not a JSON array all give an empty
    /// collection, and single off-schema records are set aside.
    pub async fn load(&self) -> Records<T> {
        let raw = match self.store.load(self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = self.key, "Collection not stored yet, starting empty");
                return Records::default();
            }
            Err(e) => {
                warn!(key = self.key, error = %e, "Failed to read collection, treating it as empty");
                return Records::default();
            }
        };

        let values: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!(key = self.key, error = %e, "Stored collection is malformed, treating it as empty");
                return Records::default();
            }
        };

        let mut records = Records::default();
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(item) => records.items.push(item),
                Err(e) => {
                    warn!(key = self.key, index, error = %e, "Skipping unreadable record");
                    records.unreadable.push(value);
                }
            }
        }
        records
    }

    /// Replaces the full collection, keeping any unreadable records.
    pub async fn save(&self, records: &Records<T>) -> PortResult<()> {
        let mut values = records
            .items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        values.extend(records.unreadable.iter().cloned());

        let raw = serde_json::to_string(&values).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.store.save(self.key, &raw).await?;
        debug!(key = self.key, count = values.len(), "Collection saved");
        Ok(())
    }
}
