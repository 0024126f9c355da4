//! Autoclicker Core - Rust Engine
//!
//! Drives a resource-accumulation environment: trigger the primary action
//! every tick, evaluate the upgrade store on a fixed interval, buy the most
//! expensive affordable upgrade, stop at a deadline.
//!
//! # Architecture
//!
//! - **core**: Clock abstraction and run window
//! - **models**: Domain types (Upgrade, Catalog, RunEvent)
//! - **environment**: Port to the external environment, parsing helpers,
//!   in-process simulator
//! - **policy**: Purchase selection policies
//! - **orchestrator**: Run scheduler, report, controller
//!
//! # Critical Invariants
//!
//! 1. The core only sees typed values; raw display text stays in adapters
//! 2. One thread, one loop: no timers, no background tasks
//! 3. Only the deadline ends a run; environment hiccups are absorbed

// Module declarations
pub mod core;
pub mod environment;
pub mod models;
pub mod orchestrator;
pub mod policy;

// Re-exports for convenience
pub use crate::core::time::{Clock, ManualClock, RunWindow, SystemClock};
pub use environment::{
    EnvironmentError, EnvironmentPort, SimulatedConfig, SimulatedEnvironment,
};
pub use models::{
    event::{EventLog, RunEvent},
    upgrade::{Catalog, CatalogError, Upgrade},
};
pub use orchestrator::{
    PolicyConfig, PurchaseRecord, RunConfig, RunController, RunError, RunOutcome, RunReport,
    RunScheduler, TickResult,
};
pub use policy::{select_upgrade, GreedyPolicy, SelectionPolicy};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn autoclicker_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::session::run_session, m)?)?;
    Ok(())
}
