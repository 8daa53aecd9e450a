use crate::core::{CommandId, Result};
use crate::journal::record::{CommandDraft, CommandRecord};
use async_trait::async_trait;

/// Journal storage trait - allows pluggable journal backends.
///
/// Append is the only mutating operation. Implementations must publish
/// atomically: a record is either fully visible to `retrieve` or not at all,
/// and two concurrent `append` calls never receive the same identifier.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Assign a fresh identifier, store the record, return the identifier.
    async fn append(&self, draft: CommandDraft) -> Result<CommandId>;

    /// Return the record previously appended under `id`.
    ///
    /// Fails with `JournalError::CommandNotFound` for unknown identifiers.
    async fn retrieve(&self, id: CommandId) -> Result<CommandRecord>;

    /// Number of journaled commands.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
