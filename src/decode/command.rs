use crate::core::{JournalError, Result};
use crate::decode::sparse::SparseField;
use std::collections::BTreeMap;

/// Decoded change request against a role's scalar fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleChanges {
    pub name: SparseField<String>,
    pub description: SparseField<String>,
}

impl RoleChanges {
    /// True when the submitter touched nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.description.is_absent()
    }
}

/// Decoded change request against a role's permission set: only the codes
/// the submitter touched, each with its proposed selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionSelections {
    selections: BTreeMap<String, bool>,
}

impl PermissionSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, code: impl Into<String>, selected: bool) {
        self.selections.insert(code.into(), selected);
    }

    /// Proposed state for `code`, if the submitter touched it.
    pub fn touched(&self, code: &str) -> Option<bool> {
        self.selections.get(code).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.selections.iter().map(|(code, selected)| (code.as_str(), *selected))
    }
}

impl FromIterator<(String, bool)> for PermissionSelections {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            selections: iter.into_iter().collect(),
        }
    }
}

/// A command payload decoded into its typed, sparse form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SparseCommand {
    Role(RoleChanges),
    RolePermissions(PermissionSelections),
}

impl SparseCommand {
    pub fn into_role(self) -> Result<RoleChanges> {
        match self {
            SparseCommand::Role(changes) => Ok(changes),
            SparseCommand::RolePermissions(_) => Err(JournalError::MalformedPayload(
                "Expected a role change command, found a permission-set command".to_string(),
            )),
        }
    }

    pub fn into_role_permissions(self) -> Result<PermissionSelections> {
        match self {
            SparseCommand::RolePermissions(selections) => Ok(selections),
            SparseCommand::Role(_) => Err(JournalError::MalformedPayload(
                "Expected a permission-set command, found a role change command".to_string(),
            )),
        }
    }
}
