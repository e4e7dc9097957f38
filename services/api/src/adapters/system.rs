//! services/api/src/adapters/system.rs
//!
//! Production implementations of the `IdGenerator` and `Clock` ports.

use chrono::{DateTime, Utc};
use symptom_journal_core::ports::{Clock, IdGenerator};
use uuid::Uuid;

/// Random v4 UUIDs rendered as hyphenated strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// The system wall clock in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
