//! crates/symptom_journal_core/src/ports.rs
//!
//! Defines the service contracts (traits) the journal core depends on.
//! These traits form the boundary of the hexagonal architecture: persistence,
//! identifier generation and the wall clock are supplied from outside so the
//! core stays free of any specific storage backend or platform randomness.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., files, database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Opaque key-value persistence holding one serialized collection per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored document for `key`, or `None` if nothing was saved under it.
    async fn load(&self, key: &str) -> PortResult<Option<String>>;

    /// Replaces the stored document for `key`.
    async fn save(&self, key: &str, value: &str) -> PortResult<()>;
}

/// Produces unique opaque identifiers for new entries and output records.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Source of creation and export timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

//=========================================================================================
// In-Memory Store
//=========================================================================================

/// A `KeyValueStore` kept entirely in process memory. Used in tests and for embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with a raw document, bypassing serialization.
    #[cfg(test)]
    pub(crate) async fn put_raw(&self, key: &str, value: &str) {
        self.values.write().await.insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> PortResult<()> {
        self.values.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
