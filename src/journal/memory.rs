use crate::core::{CommandId, JournalError, Result};
use crate::journal::record::{CommandDraft, CommandRecord};
use crate::journal::store::JournalStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// In-memory journal backend.
///
/// Identifiers come from an atomic counter, so they stay unique under
/// contention without holding the map lock. The record is fully built before
/// insertion; readers behind the `RwLock` never see a partial write.
pub struct InMemoryJournal {
    next_id: AtomicU64,
    records: RwLock<HashMap<CommandId, CommandRecord>>,
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryJournal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JournalStore for InMemoryJournal {
    async fn append(&self, draft: CommandDraft) -> Result<CommandId> {
        let id = CommandId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = CommandRecord::seal(id, draft, Utc::now());

        tracing::debug!(
            command = %id,
            action = %record.action,
            resource = %record.resource_kind,
            actor = %record.actor,
            "command journaled"
        );

        let mut records = self.records.write().await;
        records.insert(id, record);
        Ok(id)
    }

    async fn retrieve(&self, id: CommandId) -> Result<CommandRecord> {
        let records = self.records.read().await;
        records
            .get(&id)
            .cloned()
            .ok_or(JournalError::CommandNotFound(id))
    }

    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}
