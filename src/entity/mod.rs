//! Read-only view of the authoritative entity store.

pub mod provider;
pub mod role;

pub use provider::{InMemoryDirectory, SnapshotSource};
pub use role::{PermissionUsage, RolePermissionSet, RoleSnapshot};
