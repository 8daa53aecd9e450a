use crate::core::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current authoritative state of a role, as read from the entity store.
///
/// This crate only ever reads snapshots; previews are fresh values derived
/// from them, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSnapshot {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

impl RoleSnapshot {
    pub fn new(id: EntityId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One permission code and whether the role currently holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionUsage {
    pub code: String,
    pub selected: bool,
}

impl PermissionUsage {
    pub fn from(code: impl Into<String>, selected: bool) -> Self {
        Self {
            code: code.into(),
            selected,
        }
    }
}

/// A role's permission grants, keyed by permission code.
///
/// Kept as an ordered map so previews and serialized responses list codes
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionSet {
    pub role_id: EntityId,
    pub permissions: BTreeMap<String, bool>,
}

impl RolePermissionSet {
    pub fn new(role_id: EntityId) -> Self {
        Self {
            role_id,
            permissions: BTreeMap::new(),
        }
    }

    pub fn with_permission(mut self, code: impl Into<String>, selected: bool) -> Self {
        self.permissions.insert(code.into(), selected);
        self
    }

    /// Current selection state for `code`, if the code is associated at all.
    pub fn selected(&self, code: &str) -> Option<bool> {
        self.permissions.get(code).copied()
    }

    /// Flattens the set into usage entries for the response boundary.
    pub fn usages(&self) -> Vec<PermissionUsage> {
        self.permissions
            .iter()
            .map(|(code, selected)| PermissionUsage::from(code.clone(), *selected))
            .collect()
    }
}
