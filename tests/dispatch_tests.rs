/// Command dispatch facade tests
///
/// Submission gating, journaling, and the preview orchestration
/// Run with: cargo test --test dispatch_tests

use async_trait::async_trait;
use cmdjournal::auth::USER_ADMINISTRATION_SUPER_USER;
use cmdjournal::{
    ActionType, CommandDispatch, CommandId, EntityId, InMemoryDirectory, JournalError,
    Principal, ResourceKind, RolePermissionSet, RoleSnapshot, SnapshotSource,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot source that counts how often the external store is consulted.
struct CountingSource {
    inner: InMemoryDirectory,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new(inner: InMemoryDirectory) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource for CountingSource {
    async fn role(&self, id: EntityId) -> cmdjournal::Result<RoleSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.role(id).await
    }

    async fn roles(&self) -> cmdjournal::Result<Vec<RoleSnapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.roles().await
    }

    async fn role_permissions(&self, id: EntityId) -> cmdjournal::Result<RolePermissionSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.role_permissions(id).await
    }
}

fn super_user() -> Principal {
    Principal::new("maria").with_authority(USER_ADMINISTRATION_SUPER_USER)
}

async fn directory_with_teller() -> InMemoryDirectory {
    let directory = InMemoryDirectory::new();
    directory
        .upsert_role(RoleSnapshot::new(EntityId(1), "teller", "branch teller"))
        .await;
    directory
        .set_permission(EntityId(1), "READ_ROLE", true)
        .await;
    directory
        .set_permission(EntityId(1), "CREATE_ROLE", false)
        .await;
    directory
}

#[tokio::test]
async fn submit_returns_the_journal_identifier() {
    let dispatch = CommandDispatch::in_memory();

    let id = dispatch
        .submit(
            &super_user(),
            ActionType::Create,
            ResourceKind::Roles,
            None,
            json!({"name": "auditor", "description": "oversight"}),
        )
        .await
        .unwrap();

    let record = dispatch.journal().retrieve(id).await.unwrap();
    assert_eq!(record.actor, "maria");
    assert_eq!(record.target_id, None);
}

#[tokio::test]
async fn denial_blocks_journaling() {
    let dispatch = CommandDispatch::in_memory();
    let outsider = Principal::new("outsider").with_authority("READ_ROLE");

    let err = dispatch
        .submit(
            &outsider,
            ActionType::Update,
            ResourceKind::Roles,
            Some(EntityId(1)),
            json!({"name": "hijacked"}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, JournalError::Forbidden(_)));
    assert_eq!(dispatch.journal().len().await, 0);
}

#[tokio::test]
async fn no_command_id_returns_current_snapshot_unmodified() {
    let dispatch = CommandDispatch::in_memory();
    let source = CountingSource::new(directory_with_teller().await);

    let snapshot = dispatch
        .preview_role(EntityId(1), None, &source)
        .await
        .unwrap();

    assert_eq!(snapshot, RoleSnapshot::new(EntityId(1), "teller", "branch teller"));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn unknown_command_id_fails_before_the_provider_is_called() {
    let dispatch = CommandDispatch::in_memory();
    let source = CountingSource::new(directory_with_teller().await);

    let err = dispatch
        .preview_role(EntityId(1), Some(CommandId(777)), &source)
        .await
        .unwrap_err();

    assert!(matches!(err, JournalError::CommandNotFound(CommandId(777))));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn preview_overlays_only_submitted_fields() {
    let dispatch = CommandDispatch::in_memory();
    let directory = directory_with_teller().await;

    let command_id = dispatch
        .submit(
            &super_user(),
            ActionType::Update,
            ResourceKind::Roles,
            Some(EntityId(1)),
            json!({"name": "senior teller"}),
        )
        .await
        .unwrap();

    let preview = dispatch
        .preview_role(EntityId(1), Some(command_id), &directory)
        .await
        .unwrap();

    assert_eq!(preview.name, "senior teller");
    assert_eq!(preview.description, "branch teller");

    // persisted state is untouched
    let current = directory.role(EntityId(1)).await.unwrap();
    assert_eq!(current.name, "teller");
}

#[tokio::test]
async fn permission_preview_overlays_touched_codes() {
    let dispatch = CommandDispatch::in_memory();
    let directory = directory_with_teller().await;

    let command_id = dispatch
        .submit(
            &super_user(),
            ActionType::UpdatePermissions,
            ResourceKind::Roles,
            Some(EntityId(1)),
            json!({"permissions": {"CREATE_ROLE": true, "APPROVE_LOAN": true}}),
        )
        .await
        .unwrap();

    let preview = dispatch
        .preview_role_permissions(EntityId(1), Some(command_id), &directory)
        .await
        .unwrap();

    assert_eq!(preview.selected("READ_ROLE"), Some(true));
    assert_eq!(preview.selected("CREATE_ROLE"), Some(true));
    // a grant the role has never held still shows up
    assert_eq!(preview.selected("APPROVE_LOAN"), Some(true));

    let current = directory.role_permissions(EntityId(1)).await.unwrap();
    assert_eq!(current.selected("CREATE_ROLE"), Some(false));
    assert_eq!(current.selected("APPROVE_LOAN"), None);
}

#[tokio::test]
async fn missing_target_surfaces_only_at_preview_time() {
    let dispatch = CommandDispatch::in_memory();
    let directory = directory_with_teller().await;

    // journaling a command against a target that never existed is fine
    let command_id = dispatch
        .submit(
            &super_user(),
            ActionType::Update,
            ResourceKind::Roles,
            Some(EntityId(999)),
            json!({"name": "ghost"}),
        )
        .await
        .unwrap();

    let err = dispatch
        .preview_role(EntityId(999), Some(command_id), &directory)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        JournalError::EntityNotFound { id: EntityId(999), .. }
    ));
}

#[tokio::test]
async fn malformed_payload_fails_preview_but_stays_journaled() {
    let dispatch = CommandDispatch::in_memory();
    let directory = directory_with_teller().await;

    let command_id = dispatch
        .submit(
            &super_user(),
            ActionType::Update,
            ResourceKind::Roles,
            Some(EntityId(1)),
            json!({"name": 42}),
        )
        .await
        .unwrap();

    let err = dispatch
        .preview_role(EntityId(1), Some(command_id), &directory)
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::MalformedPayload(_)));

    // decode failure never touches the record
    let record = dispatch.journal().retrieve(command_id).await.unwrap();
    assert_eq!(record.payload, json!({"name": 42}));
}

#[tokio::test]
async fn wrong_kind_of_command_is_rejected_at_preview() {
    let dispatch = CommandDispatch::in_memory();
    let directory = directory_with_teller().await;

    let permissions_command = dispatch
        .submit(
            &super_user(),
            ActionType::UpdatePermissions,
            ResourceKind::Roles,
            Some(EntityId(1)),
            json!({"permissions": {"CREATE_ROLE": true}}),
        )
        .await
        .unwrap();

    let err = dispatch
        .preview_role(EntityId(1), Some(permissions_command), &directory)
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::MalformedPayload(_)));

    let role_command = dispatch
        .submit(
            &super_user(),
            ActionType::Update,
            ResourceKind::Roles,
            Some(EntityId(1)),
            json!({"name": "x"}),
        )
        .await
        .unwrap();

    let err = dispatch
        .preview_role_permissions(EntityId(1), Some(role_command), &directory)
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::MalformedPayload(_)));
}

#[tokio::test]
async fn read_entry_points_gate_on_read_permission() {
    let dispatch = CommandDispatch::in_memory();
    let directory = directory_with_teller().await;

    let reader = Principal::new("reader").with_authority("READ_ROLE");
    let role = dispatch
        .role(&reader, EntityId(1), None, &directory)
        .await
        .unwrap();
    assert_eq!(role.name, "teller");

    let writer_only = Principal::new("writer").with_authority("UPDATE_ROLE");
    let err = dispatch
        .role(&writer_only, EntityId(1), None, &directory)
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::Forbidden(_)));

    let err = dispatch
        .role_permissions(&writer_only, EntityId(1), None, &directory)
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::Forbidden(_)));
}

#[tokio::test]
async fn listing_roles_is_read_gated_and_ordered() {
    let dispatch = CommandDispatch::in_memory();
    let directory = directory_with_teller().await;
    directory
        .upsert_role(RoleSnapshot::new(EntityId(2), "auditor", "oversight"))
        .await;

    let reader = Principal::new("reader").with_authority("READ_ROLE");
    let roles = dispatch.roles(&reader, &directory).await.unwrap();
    let names: Vec<_> = roles.iter().map(|role| role.name.as_str()).collect();
    assert_eq!(names, ["teller", "auditor"]);

    let writer_only = Principal::new("writer").with_authority("UPDATE_ROLE");
    let err = dispatch.roles(&writer_only, &directory).await.unwrap_err();
    assert!(matches!(err, JournalError::Forbidden(_)));
}

#[tokio::test]
async fn read_entry_point_previews_when_a_command_is_named() {
    let dispatch = CommandDispatch::in_memory();
    let directory = directory_with_teller().await;

    let command_id = dispatch
        .submit(
            &super_user(),
            ActionType::Update,
            ResourceKind::Roles,
            Some(EntityId(1)),
            json!({"description": "front desk"}),
        )
        .await
        .unwrap();

    let reader = Principal::new("reader").with_authority("READ_ROLE");
    let preview = dispatch
        .role(&reader, EntityId(1), Some(command_id), &directory)
        .await
        .unwrap();

    assert_eq!(preview.description, "front desk");
    assert_eq!(preview.name, "teller");
}
