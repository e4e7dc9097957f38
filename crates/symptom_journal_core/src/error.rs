//! crates/symptom_journal_core/src/error.rs
//!
//! Errors returned by journal operations.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Input rejected before any store was touched.
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Port(#[from] PortError),
}

/// A convenience type alias for `Result<T, JournalError>`.
pub type JournalResult<T> = Result<T, JournalError>;
