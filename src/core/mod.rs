pub mod error;
pub mod types;

pub use error::{JournalError, Result};
pub use types::{ActionType, CommandId, EntityId, ResourceKind};
