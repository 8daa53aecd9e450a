use crate::core::{ActionType, CommandId, EntityId, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A submitted write-intent, before the journal has assigned it an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDraft {
    pub action: ActionType,
    pub resource_kind: ResourceKind,
    /// Target of the command; absent for creation commands.
    pub target_id: Option<EntityId>,
    /// The submitted change request, stored verbatim.
    pub payload: JsonValue,
    pub actor: String,
}

impl CommandDraft {
    pub fn new(
        action: ActionType,
        resource_kind: ResourceKind,
        target_id: Option<EntityId>,
        payload: JsonValue,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            action,
            resource_kind,
            target_id,
            payload,
            actor: actor.into(),
        }
    }
}

/// A journaled command. Immutable once appended: the journal never edits or
/// deletes records, and `payload` is exactly what the submitter sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub id: CommandId,
    pub action: ActionType,
    pub resource_kind: ResourceKind,
    pub target_id: Option<EntityId>,
    pub payload: JsonValue,
    pub actor: String,
    pub submitted_at: DateTime<Utc>,
}

impl CommandRecord {
    /// Seals a draft with its journal-assigned identity.
    pub fn seal(id: CommandId, draft: CommandDraft, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            action: draft.action,
            resource_kind: draft.resource_kind,
            target_id: draft.target_id,
            payload: draft.payload,
            actor: draft.actor,
            submitted_at,
        }
    }
}
