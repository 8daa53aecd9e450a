//! Payload decoding into sparse commands.
//!
//! A journaled payload is decoded on demand, at preview time. Decoding never
//! blocks `append`: a malformed payload surfaces only when someone asks for
//! the preview, and the journaled record stays untouched.

pub mod command;
pub mod decoder;
pub mod sparse;

pub use command::{PermissionSelections, RoleChanges, SparseCommand};
pub use decoder::CommandDecoder;
pub use sparse::SparseField;
