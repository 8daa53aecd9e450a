// ============================================================================
// cmdjournal - maker-checker command journal with change preview
// ============================================================================
//
// A write operation is first journaled as an immutable, permission-checked
// "proposed command" instead of being applied directly. A later caller can
// ask what an entity would look like if a journaled command were integrated,
// without mutating the system of record.

pub mod auth;
pub mod core;
pub mod decode;
pub mod entity;
pub mod facade;
pub mod journal;
pub mod merge;

// Re-export main types for convenience
pub use auth::{PermissionGate, Principal};
pub use core::{ActionType, CommandId, EntityId, JournalError, ResourceKind, Result};
pub use decode::{CommandDecoder, PermissionSelections, RoleChanges, SparseCommand, SparseField};
pub use entity::{InMemoryDirectory, PermissionUsage, RolePermissionSet, RoleSnapshot, SnapshotSource};
pub use facade::CommandDispatch;
pub use journal::{CommandDraft, CommandRecord, InMemoryJournal, JournalStore};
pub use merge::ChangeIntegrationEngine;
