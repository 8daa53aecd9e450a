//! Append-only command journal.
//!
//! Every accepted write-intent is appended here as an immutable
//! [`CommandRecord`] before anything else happens to it. Promotion of a
//! journaled command into a real mutation is a separate workflow outside
//! this crate; from the journal's point of view a record is permanently
//! "journaled".

pub mod memory;
pub mod record;
pub mod store;

pub use memory::InMemoryJournal;
pub use record::{CommandDraft, CommandRecord};
pub use store::JournalStore;
