use crate::auth::Principal;
use crate::core::{ActionType, JournalError, ResourceKind, Result};

/// Grants every function in the system.
pub const ALL_FUNCTIONS: &str = "ALL_FUNCTIONS";
/// Grants read access to every resource.
pub const ALL_FUNCTIONS_READ: &str = "ALL_FUNCTIONS_READ";
/// Super-user for the user-administration area, which roles belong to.
pub const USER_ADMINISTRATION_SUPER_USER: &str = "USER_ADMINISTRATION_SUPER_USER";

/// Allow-list authorization check keyed by command type.
///
/// Each command type carries a fixed allow-list; a principal may issue the
/// command if its authority set intersects the list. A denied check has no
/// side effects, so callers are free to gate before touching the journal.
pub struct PermissionGate;

impl PermissionGate {
    /// Permission code required to issue `action` against `kind`.
    pub fn command_permission(action: ActionType, kind: ResourceKind) -> &'static str {
        match (kind, action) {
            (ResourceKind::Roles, ActionType::Create) => "CREATE_ROLE",
            (ResourceKind::Roles, ActionType::Update) => "UPDATE_ROLE",
            (ResourceKind::Roles, ActionType::UpdatePermissions) => "PERMISSIONS_ROLE",
        }
    }

    /// Authority names allowed to issue `action` against `kind`.
    pub fn allowed_for(action: ActionType, kind: ResourceKind) -> [&'static str; 3] {
        [
            ALL_FUNCTIONS,
            USER_ADMINISTRATION_SUPER_USER,
            Self::command_permission(action, kind),
        ]
    }

    /// Checks `principal` against an explicit allow-list for `command_permission`.
    pub fn authorize(
        principal: &Principal,
        command_permission: &str,
        allowed: &[&str],
    ) -> Result<()> {
        if principal.has_any_authority(allowed.iter().copied()) {
            Ok(())
        } else {
            tracing::debug!(
                principal = principal.name(),
                permission = command_permission,
                "command authorization denied"
            );
            Err(JournalError::Forbidden(command_permission.to_string()))
        }
    }

    /// Checks that `principal` may submit `action` against `kind`.
    pub fn authorize_command(
        principal: &Principal,
        action: ActionType,
        kind: ResourceKind,
    ) -> Result<()> {
        let allowed = Self::allowed_for(action, kind);
        Self::authorize(principal, Self::command_permission(action, kind), &allowed)
    }

    /// Checks that `principal` may read `kind` entities.
    pub fn authorize_read(principal: &Principal, kind: ResourceKind) -> Result<()> {
        let resource = kind.permission_resource();
        let read_permission = format!("READ_{resource}");
        if principal.has_authority(ALL_FUNCTIONS)
            || principal.has_authority(ALL_FUNCTIONS_READ)
            || principal.has_authority(&read_permission)
        {
            Ok(())
        } else {
            tracing::debug!(
                principal = principal.name(),
                permission = %read_permission,
                "read authorization denied"
            );
            Err(JournalError::Forbidden(read_permission))
        }
    }
}
