//! Principal model and permission gate.
//!
//! Authorization here is deliberately small: a principal arrives already
//! authenticated, carrying its granted authority names, and the gate checks
//! those names against the fixed allow-list of the command being issued.

pub mod gate;
pub mod principal;

pub use gate::{PermissionGate, ALL_FUNCTIONS, ALL_FUNCTIONS_READ, USER_ADMINISTRATION_SUPER_USER};
pub use principal::Principal;
