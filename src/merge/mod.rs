//! Change integration: sparse command x current snapshot -> preview.

pub mod engine;

pub use engine::ChangeIntegrationEngine;
