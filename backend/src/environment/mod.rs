//! Environment Port
//!
//! The sole boundary between the run engine and the outside world. A
//! concrete adapter (browser automation, API client, the in-process
//! simulator) implements `EnvironmentPort`; the scheduler and policy only
//! ever see typed values through it.
//!
//! # Contract
//!
//! - All calls are synchronous and blocking from the scheduler's view.
//! - `upgrade_ids()` and `upgrade_prices()` describe the same snapshot when
//!   called back to back within one evaluation cycle. Entries with no
//!   parseable price are dropped from *both* sequences by the adapter.
//! - `resource_balance()` never fails: display text that cannot be parsed
//!   reads as zero (see [`parse::balance_or_zero`]).
//! - Adapters own no run state; the scheduler owns all timing.

use thiserror::Error;

pub mod parse;
pub mod simulated;

pub use parse::{balance_or_zero, catalog_from_labels, parse_count, parse_price_label, ParseError};
pub use simulated::{BuildingSpec, SimulatedConfig, SimulatedConfigError, SimulatedEnvironment};

/// Errors an adapter reports back to the scheduler
///
/// None of these end a run. The scheduler logs them and carries on with
/// the next tick or cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Environment unreachable: {0}")]
    Unreachable(String),

    #[error("Upgrade no longer purchasable: {id}")]
    PurchaseUnavailable { id: String },

    #[error("Environment error: {0}")]
    Other(String),
}

/// Gateway to the external resource-accumulation environment
///
/// # Example Implementation
///
/// ```
/// use autoclicker_core_rs::environment::{EnvironmentError, EnvironmentPort};
///
/// struct FixedStore {
///     balance: u64,
/// }
///
/// impl EnvironmentPort for FixedStore {
///     fn trigger_primary_action(&mut self) -> Result<(), EnvironmentError> {
///         self.balance += 1;
///         Ok(())
///     }
///
///     fn upgrade_ids(&mut self) -> Result<Vec<String>, EnvironmentError> {
///         Ok(vec!["buyCursor".to_string()])
///     }
///
///     fn upgrade_prices(&mut self) -> Result<Vec<u64>, EnvironmentError> {
///         Ok(vec![15])
///     }
///
///     fn resource_balance(&mut self) -> u64 {
///         self.balance
///     }
///
///     fn purchase(&mut self, id: &str) -> Result<(), EnvironmentError> {
///         Err(EnvironmentError::PurchaseUnavailable { id: id.to_string() })
///     }
///
///     fn final_metric(&mut self) -> Result<String, EnvironmentError> {
///         Ok(format!("balance: {}", self.balance))
///     }
/// }
/// ```
pub trait EnvironmentPort {
    /// Perform one unit of the primary earning action
    fn trigger_primary_action(&mut self) -> Result<(), EnvironmentError>;

    /// Identifiers of the current catalog, in display order
    fn upgrade_ids(&mut self) -> Result<Vec<String>, EnvironmentError>;

    /// Prices aligned positionally with `upgrade_ids()`
    fn upgrade_prices(&mut self) -> Result<Vec<u64>, EnvironmentError>;

    /// Current balance; zero when the environment's display can't be read
    fn resource_balance(&mut self) -> u64;

    /// Buy the upgrade with the given id
    ///
    /// Returns `EnvironmentError::PurchaseUnavailable` when the id is no
    /// longer purchasable.
    fn purchase(&mut self, id: &str) -> Result<(), EnvironmentError>;

    /// Opaque summary metric read once when the run ends
    fn final_metric(&mut self) -> Result<String, EnvironmentError>;
}

impl<E: EnvironmentPort + ?Sized> EnvironmentPort for &mut E {
    fn trigger_primary_action(&mut self) -> Result<(), EnvironmentError> {
        (**self).trigger_primary_action()
    }

    fn upgrade_ids(&mut self) -> Result<Vec<String>, EnvironmentError> {
        (**self).upgrade_ids()
    }

    fn upgrade_prices(&mut self) -> Result<Vec<u64>, EnvironmentError> {
        (**self).upgrade_prices()
    }

    fn resource_balance(&mut self) -> u64 {
        (**self).resource_balance()
    }

    fn purchase(&mut self, id: &str) -> Result<(), EnvironmentError> {
        (**self).purchase(id)
    }

    fn final_metric(&mut self) -> Result<String, EnvironmentError> {
        (**self).final_metric()
    }
}
