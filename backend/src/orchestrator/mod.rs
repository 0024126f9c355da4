//! Orchestrator - run loop and composition root
//!
//! Implements the tick loop that drives a run against an environment.
//!
//! See `engine.rs` for the scheduler, `controller.rs` for wiring.

pub mod controller;
pub mod engine;
pub mod report;

// Re-export main types for convenience
pub use controller::{RunController, RunOutcome};
pub use engine::{PolicyConfig, RunConfig, RunError, RunScheduler, RunState, TickResult};
pub use report::{compute_config_hash, PurchaseRecord, RunReport};
