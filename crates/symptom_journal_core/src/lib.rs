pub mod domain;
pub mod error;
pub mod export;
pub mod linker;
pub mod parser;
pub mod ports;
pub mod prompt;
pub mod range;
pub mod review;
pub mod service;
pub mod store;

pub use domain::{DateRange, EntryDraft, LlmOutputRecord, LogEntry, OrderedSet, ReplySubmission};
pub use error::{JournalError, JournalResult};
pub use export::{ExportSnapshot, EXPORT_FILE_NAME};
pub use parser::{parse_reply, ParsedReply};
pub use ports::{Clock, IdGenerator, KeyValueStore, MemoryStore, PortError, PortResult};
pub use range::DateBounds;
pub use service::{JournalService, PromptBundle, SavedReply};
