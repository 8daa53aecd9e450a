use crate::core::{JournalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the journal when a command is appended.
///
/// Monotonically increasing, never reused. Callers treat it as opaque;
/// the numeric form only matters for wire round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(pub u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an entity in the authoritative store (e.g. a role id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Action a command proposes against its target resource.
///
/// Closed vocabulary; the wire names match the journal entries the
/// request boundary records (`CREATE`, `UPDATE`, `UPDATEPERMISSIONS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Create,
    Update,
    UpdatePermissions,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Create => "CREATE",
            ActionType::Update => "UPDATE",
            ActionType::UpdatePermissions => "UPDATEPERMISSIONS",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CREATE" => Ok(ActionType::Create),
            "UPDATE" => Ok(ActionType::Update),
            "UPDATEPERMISSIONS" => Ok(ActionType::UpdatePermissions),
            other => Err(JournalError::MalformedPayload(format!(
                "Unknown action type '{other}'"
            ))),
        }
    }
}

/// Kind of entity a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Roles,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Roles => "roles",
        }
    }

    /// Permission resource name used by read-permission checks
    /// (`READ_ROLE` is derived from this).
    pub fn permission_resource(&self) -> &'static str {
        match self {
            ResourceKind::Roles => "ROLE",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "roles" => Ok(ResourceKind::Roles),
            other => Err(JournalError::MalformedPayload(format!(
                "Unknown resource kind '{other}'"
            ))),
        }
    }
}
