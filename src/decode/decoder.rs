use crate::core::{ActionType, JournalError, Result};
use crate::decode::command::{PermissionSelections, RoleChanges, SparseCommand};
use crate::decode::sparse::SparseField;
use serde_json::{Map, Value as JsonValue};

/// Decodes a journaled payload into a typed, sparse command.
///
/// The `full_replace` flag selects between the two readings of a payload:
/// - `false` (the preview path): changes only. A field absent from the
///   payload decodes to [`SparseField::Absent`] and must never be defaulted.
/// - `true`: the payload claims to be a complete representation, so a field
///   the entity defines but the payload omits is a malformed payload.
///
/// Permission codes are not validated against a master list here; that
/// validation belongs to submission-time collaborators, and previews must be
/// able to show grants of codes not yet associated with the role.
pub struct CommandDecoder;

impl CommandDecoder {
    /// Decodes a payload into the sparse command its action calls for.
    pub fn decode(
        action: ActionType,
        payload: &JsonValue,
        full_replace: bool,
    ) -> Result<SparseCommand> {
        match action {
            ActionType::Create | ActionType::Update => {
                Self::decode_role(payload, full_replace).map(SparseCommand::Role)
            }
            ActionType::UpdatePermissions => Self::decode_role_permissions(payload, full_replace)
                .map(SparseCommand::RolePermissions),
        }
    }

    /// Decodes a role change payload (`name`, `description`).
    pub fn decode_role(payload: &JsonValue, full_replace: bool) -> Result<RoleChanges> {
        let object = Self::as_object(payload)?;
        Ok(RoleChanges {
            name: Self::string_field(object, "name", full_replace)?,
            description: Self::string_field(object, "description", full_replace)?,
        })
    }

    /// Decodes a permission-set payload: a `permissions` member mapping
    /// permission code to proposed selection state.
    pub fn decode_role_permissions(
        payload: &JsonValue,
        full_replace: bool,
    ) -> Result<PermissionSelections> {
        let object = Self::as_object(payload)?;

        let member = match object.get("permissions") {
            Some(member) => member,
            None if full_replace => {
                return Err(JournalError::MalformedPayload(
                    "Full permission payload is missing the 'permissions' member".to_string(),
                ))
            }
            // Changes-only payload that touches no code decodes to an
            // empty selection, which merges as the identity.
            None => return Ok(PermissionSelections::new()),
        };

        let entries = member.as_object().ok_or_else(|| {
            JournalError::MalformedPayload(
                "The 'permissions' member must be an object of code to boolean".to_string(),
            )
        })?;

        let mut selections = PermissionSelections::new();
        for (code, value) in entries {
            let selected = value.as_bool().ok_or_else(|| {
                JournalError::MalformedPayload(format!(
                    "Permission '{code}' must map to a boolean, got {value}"
                ))
            })?;
            selections.select(code.clone(), selected);
        }
        Ok(selections)
    }

    fn as_object(payload: &JsonValue) -> Result<&Map<String, JsonValue>> {
        payload.as_object().ok_or_else(|| {
            JournalError::MalformedPayload(format!(
                "Command payload must be a JSON object, got {payload}"
            ))
        })
    }

    fn string_field(
        object: &Map<String, JsonValue>,
        field: &str,
        full_replace: bool,
    ) -> Result<SparseField<String>> {
        match object.get(field) {
            None if full_replace => Err(JournalError::MalformedPayload(format!(
                "Full payload is missing required field '{field}'"
            ))),
            None => Ok(SparseField::Absent),
            Some(JsonValue::String(value)) => Ok(SparseField::Present(value.clone())),
            Some(other) => Err(JournalError::MalformedPayload(format!(
                "Field '{field}' must be a string, got {other}"
            ))),
        }
    }
}
