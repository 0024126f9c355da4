//! Domain models for the run engine

pub mod event;
pub mod upgrade;

// Re-exports
pub use event::{EventLog, RunEvent};
pub use upgrade::{Catalog, CatalogError, Upgrade};
