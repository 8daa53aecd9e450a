use crate::core::{EntityId, JournalError, ResourceKind, Result};
use crate::entity::role::{RolePermissionSet, RoleSnapshot};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// Read-only access to the authoritative entity store.
///
/// The store itself lives outside this crate (a database, a service); this
/// trait is the seam the preview path fetches current state through. No
/// mutating access exists here, and provider failures propagate to the
/// caller untouched.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Current snapshot of the role, or `EntityNotFound`.
    async fn role(&self, id: EntityId) -> Result<RoleSnapshot>;

    /// Current snapshots of all roles.
    async fn roles(&self) -> Result<Vec<RoleSnapshot>>;

    /// Current permission grants of the role, or `EntityNotFound`.
    async fn role_permissions(&self, id: EntityId) -> Result<RolePermissionSet>;
}

/// In-memory snapshot source, for embedding and tests.
pub struct InMemoryDirectory {
    roles: RwLock<HashMap<EntityId, RoleSnapshot>>,
    permissions: RwLock<HashMap<EntityId, BTreeMap<String, bool>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
            permissions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn upsert_role(&self, snapshot: RoleSnapshot) {
        let mut roles = self.roles.write().await;
        roles.insert(snapshot.id, snapshot);
    }

    pub async fn set_permission(&self, role_id: EntityId, code: impl Into<String>, selected: bool) {
        let mut permissions = self.permissions.write().await;
        permissions.entry(role_id).or_default().insert(code.into(), selected);
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotSource for InMemoryDirectory {
    async fn role(&self, id: EntityId) -> Result<RoleSnapshot> {
        let roles = self.roles.read().await;
        roles.get(&id).cloned().ok_or(JournalError::EntityNotFound {
            kind: ResourceKind::Roles,
            id,
        })
    }

    async fn roles(&self) -> Result<Vec<RoleSnapshot>> {
        let roles = self.roles.read().await;
        let mut all: Vec<RoleSnapshot> = roles.values().cloned().collect();
        all.sort_by_key(|role| role.id);
        Ok(all)
    }

    async fn role_permissions(&self, id: EntityId) -> Result<RolePermissionSet> {
        {
            let roles = self.roles.read().await;
            if !roles.contains_key(&id) {
                return Err(JournalError::EntityNotFound {
                    kind: ResourceKind::Roles,
                    id,
                });
            }
        }
        let permissions = self.permissions.read().await;
        Ok(RolePermissionSet {
            role_id: id,
            permissions: permissions.get(&id).cloned().unwrap_or_default(),
        })
    }
}
