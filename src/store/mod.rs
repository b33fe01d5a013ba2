pub mod memory;
pub mod postgres;

pub use memory::{MemoryIdentity, MemoryStore, RecordingInvalidator};
pub use postgres::{PgIdentity, PgStore};
