use crate::core::types::{CommandId, EntityId, ResourceKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Not authorized to issue '{0}' commands")]
    Forbidden(String),

    #[error("Command {0} not found in journal")]
    CommandNotFound(CommandId),

    #[error("No current '{kind}' entity with id {id}")]
    EntityNotFound { kind: ResourceKind, id: EntityId },

    #[error("Malformed command payload: {0}")]
    MalformedPayload(String),

    #[error("Journal storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, JournalError>;

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
