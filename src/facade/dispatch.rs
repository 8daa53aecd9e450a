use crate::auth::{PermissionGate, Principal};
use crate::core::{ActionType, CommandId, EntityId, ResourceKind, Result};
use crate::decode::{CommandDecoder, PermissionSelections, RoleChanges};
use crate::entity::{RolePermissionSet, RoleSnapshot, SnapshotSource};
use crate::journal::{CommandDraft, CommandRecord, InMemoryJournal, JournalStore};
use crate::merge::ChangeIntegrationEngine;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Orchestrates the maker-checker flow. The only surface the request
/// boundary talks to.
///
/// Submission runs gate-then-journal: an accepted command is appended as an
/// immutable record and its identifier returned; a denied one never touches
/// the journal. Preview runs journal-then-decode-then-merge against the
/// current snapshot and leaves persisted state alone.
pub struct CommandDispatch {
    journal: Arc<dyn JournalStore>,
}

impl CommandDispatch {
    pub fn new(journal: Arc<dyn JournalStore>) -> Self {
        Self { journal }
    }

    /// Dispatch backed by the in-memory journal.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryJournal::new()))
    }

    pub fn journal(&self) -> &Arc<dyn JournalStore> {
        &self.journal
    }

    /// Records a write-intent in the journal after the permission gate
    /// passes. Returns the journal-assigned command identifier.
    ///
    /// Denial fails with [`JournalError::Forbidden`](crate::core::JournalError::Forbidden)
    /// and performs no journal write.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdjournal::{ActionType, CommandDispatch, JournalStore, Principal, ResourceKind};
    /// use serde_json::json;
    ///
    /// # tokio_test::block_on(async {
    /// let dispatch = CommandDispatch::in_memory();
    /// let maker = Principal::new("maria").with_authority("CREATE_ROLE");
    ///
    /// let id = dispatch
    ///     .submit(
    ///         &maker,
    ///         ActionType::Create,
    ///         ResourceKind::Roles,
    ///         None,
    ///         json!({"name": "auditor", "description": "oversight"}),
    ///     )
    ///     .await
    ///     .unwrap();
    ///
    /// let record = dispatch.journal().retrieve(id).await.unwrap();
    /// assert_eq!(record.actor, "maria");
    /// # });
    /// ```
    pub async fn submit(
        &self,
        principal: &Principal,
        action: ActionType,
        kind: ResourceKind,
        target_id: Option<EntityId>,
        payload: JsonValue,
    ) -> Result<CommandId> {
        PermissionGate::authorize_command(principal, action, kind)?;

        let draft = CommandDraft::new(action, kind, target_id, payload, principal.name());
        let id = self.journal.append(draft).await?;
        tracing::info!(command = %id, action = %action, resource = %kind, "command submitted");
        Ok(id)
    }

    /// Current role snapshot, with the proposed changes of `command_id`
    /// overlaid when one is supplied.
    ///
    /// `command_id == None` means no preview was requested: the provider's
    /// snapshot comes back unmodified. An unknown command id fails with
    /// [`JournalError::CommandNotFound`](crate::core::JournalError::CommandNotFound)
    /// before the provider is consulted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdjournal::{CommandDispatch, EntityId, InMemoryDirectory, RoleSnapshot};
    ///
    /// # tokio_test::block_on(async {
    /// let dispatch = CommandDispatch::in_memory();
    /// let directory = InMemoryDirectory::new();
    /// directory
    ///     .upsert_role(RoleSnapshot::new(EntityId(1), "teller", "branch teller"))
    ///     .await;
    ///
    /// // no command named: the current snapshot comes back as-is
    /// let current = dispatch.preview_role(EntityId(1), None, &directory).await.unwrap();
    /// assert_eq!(current.name, "teller");
    /// # });
    /// ```
    pub async fn preview_role(
        &self,
        role_id: EntityId,
        command_id: Option<CommandId>,
        source: &dyn SnapshotSource,
    ) -> Result<RoleSnapshot> {
        let Some(command_id) = command_id else {
            return source.role(role_id).await;
        };

        let record = self.journal.retrieve(command_id).await?;
        let changes = Self::role_changes(&record)?;
        let current = source.role(role_id).await?;
        Ok(ChangeIntegrationEngine::merge_role(&current, &changes))
    }

    /// Current permission set of the role, with the selections of
    /// `command_id` overlaid when one is supplied. Same shortcut and
    /// ordering rules as [`Self::preview_role`].
    pub async fn preview_role_permissions(
        &self,
        role_id: EntityId,
        command_id: Option<CommandId>,
        source: &dyn SnapshotSource,
    ) -> Result<RolePermissionSet> {
        let Some(command_id) = command_id else {
            return source.role_permissions(role_id).await;
        };

        let record = self.journal.retrieve(command_id).await?;
        let selections = Self::permission_selections(&record)?;
        let current = source.role_permissions(role_id).await?;
        Ok(ChangeIntegrationEngine::merge_permissions(
            &current,
            &selections,
        ))
    }

    /// Read-side entry point for the full role list: gate the read, then
    /// fetch every current snapshot.
    pub async fn roles(
        &self,
        principal: &Principal,
        source: &dyn SnapshotSource,
    ) -> Result<Vec<RoleSnapshot>> {
        PermissionGate::authorize_read(principal, ResourceKind::Roles)?;
        source.roles().await
    }

    /// Read-side entry point for a single role: gate the read, then fetch
    /// and optionally preview.
    pub async fn role(
        &self,
        principal: &Principal,
        role_id: EntityId,
        command_id: Option<CommandId>,
        source: &dyn SnapshotSource,
    ) -> Result<RoleSnapshot> {
        PermissionGate::authorize_read(principal, ResourceKind::Roles)?;
        self.preview_role(role_id, command_id, source).await
    }

    /// Read-side entry point for a role's permission set.
    pub async fn role_permissions(
        &self,
        principal: &Principal,
        role_id: EntityId,
        command_id: Option<CommandId>,
        source: &dyn SnapshotSource,
    ) -> Result<RolePermissionSet> {
        PermissionGate::authorize_read(principal, ResourceKind::Roles)?;
        self.preview_role_permissions(role_id, command_id, source)
            .await
    }

    // Preview always decodes changes-only: a journaled payload overlays the
    // snapshot, it never replaces it. A record whose action calls for the
    // other shape surfaces as a malformed payload for this preview.
    fn role_changes(record: &CommandRecord) -> Result<RoleChanges> {
        CommandDecoder::decode(record.action, &record.payload, false)?.into_role()
    }

    fn permission_selections(record: &CommandRecord) -> Result<PermissionSelections> {
        CommandDecoder::decode(record.action, &record.payload, false)?.into_role_permissions()
    }
}
