use crate::decode::{PermissionSelections, RoleChanges};
use crate::entity::{RolePermissionSet, RoleSnapshot};

/// Integrates a sparse command onto a current snapshot, producing the
/// preview the caller asked for.
///
/// Pure functions: the current snapshot is never mutated, the result is a
/// fresh value, and the same inputs always produce the same preview.
pub struct ChangeIntegrationEngine;

impl ChangeIntegrationEngine {
    /// Scalar overlay: present fields win, absent fields pass through.
    pub fn merge_role(current: &RoleSnapshot, changes: &RoleChanges) -> RoleSnapshot {
        RoleSnapshot {
            id: current.id,
            name: changes.name.or_current(&current.name),
            description: changes.description.or_current(&current.description),
        }
    }

    /// Permission-set overlay.
    ///
    /// A touched code takes its proposed state, an untouched code keeps its
    /// current state, and a touched code the role has never held still shows
    /// up in the preview - previewing the grant of a new permission is the
    /// point of the exercise.
    pub fn merge_permissions(
        current: &RolePermissionSet,
        selections: &PermissionSelections,
    ) -> RolePermissionSet {
        let mut preview = current.clone();
        for (code, selected) in selections.iter() {
            preview.permissions.insert(code.to_string(), selected);
        }
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;
    use crate::decode::SparseField;

    #[test]
    fn absent_fields_do_not_clobber() {
        let current = RoleSnapshot::new(EntityId(1), "A", "d");
        let changes = RoleChanges {
            name: SparseField::Present("B".to_string()),
            description: SparseField::Absent,
        };
        let preview = ChangeIntegrationEngine::merge_role(&current, &changes);
        assert_eq!(preview.name, "B");
        assert_eq!(preview.description, "d");
        // current untouched
        assert_eq!(current.name, "A");
    }

    #[test]
    fn empty_changes_are_identity() {
        let current = RoleSnapshot::new(EntityId(1), "A", "d");
        let preview = ChangeIntegrationEngine::merge_role(&current, &RoleChanges::default());
        assert_eq!(preview, current);
    }

    #[test]
    fn untouched_codes_keep_current_state() {
        let current = RolePermissionSet::new(EntityId(1))
            .with_permission("READ_ROLE", true)
            .with_permission("CREATE_ROLE", false);
        let selections: PermissionSelections =
            [("CREATE_ROLE".to_string(), true)].into_iter().collect();

        let preview = ChangeIntegrationEngine::merge_permissions(&current, &selections);
        assert_eq!(preview.selected("READ_ROLE"), Some(true));
        assert_eq!(preview.selected("CREATE_ROLE"), Some(true));
        assert_eq!(current.selected("CREATE_ROLE"), Some(false));
    }

    #[test]
    fn new_codes_appear_in_preview() {
        let current = RolePermissionSet::new(EntityId(1)).with_permission("READ_ROLE", true);
        let selections: PermissionSelections =
            [("DISBURSE_LOAN".to_string(), true)].into_iter().collect();

        let preview = ChangeIntegrationEngine::merge_permissions(&current, &selections);
        assert_eq!(preview.selected("DISBURSE_LOAN"), Some(true));
        assert_eq!(current.selected("DISBURSE_LOAN"), None);
    }
}
