pub mod file_store;
pub mod pg_store;
pub mod system;

pub use file_store::FileStore;
pub use pg_store::PgStore;
pub use system::{SystemClock, UuidIdGenerator};
