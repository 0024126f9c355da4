//! Run Scheduler Engine
//!
//! Main decision loop interleaving the primary action with periodic
//! evaluation-and-purchase cycles:
//!
//! ```text
//! For each tick t:
//! 1. Trigger the primary action (failure skips to step 3)
//! 2. If the next evaluation time has been reached:
//!    a. Read upgrade ids, prices and balance from the environment
//!    b. Ask the selection policy for at most one upgrade
//!    c. Purchase it (unavailable / failed purchases are logged, not fatal)
//!    d. Schedule the next evaluation one interval from now
//! 3. If the deadline has been reached, stop
//! 4. Optional cooperative pause
//! ```
//!
//! The loop is single-threaded. Every environment call blocks until it
//! returns, so the primary action of tick N always precedes the reads of
//! any cycle in tick N, and a purchase always follows the reads that
//! justified it.
//!
//! # Example
//!
//! ```rust
//! use autoclicker_core_rs::orchestrator::{RunConfig, RunScheduler};
//! use autoclicker_core_rs::policy::GreedyPolicy;
//! use autoclicker_core_rs::{ManualClock, SimulatedConfig, SimulatedEnvironment};
//!
//! let clock = ManualClock::new();
//! let mut env = SimulatedEnvironment::new(SimulatedConfig::default(), clock.clone()).unwrap();
//! let config = RunConfig {
//!     evaluation_interval_secs: 5.0,
//!     total_duration_secs: 10.0,
//!     tick_pause_millis: 100,
//!     ..RunConfig::default()
//! };
//!
//! let mut scheduler =
//!     RunScheduler::new(&mut env, &clock, Box::new(GreedyPolicy::new()), config).unwrap();
//! let report = scheduler.run().unwrap();
//!
//! // Evaluations at t=5s and t=10s, the second on the deadline tick
//! assert_eq!(report.ticks, 101);
//! assert_eq!(report.evaluations, 2);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::report::{compute_config_hash, PurchaseRecord, RunReport};
use crate::core::time::{Clock, RunWindow};
use crate::environment::{EnvironmentError, EnvironmentPort};
use crate::models::{Catalog, CatalogError, EventLog, RunEvent};
use crate::policy::{GreedyPolicy, SelectionPolicy};

// ============================================================================
// Configuration Types
// ============================================================================

/// Run parameters
///
/// # Fields
///
/// * `evaluation_interval_secs` - Throttle between purchase evaluations
/// * `total_duration_secs` - Wall-clock bound on the whole run
/// * `tick_pause_millis` - Cooperative pause after each tick (0 = tight loop)
/// * `policy` - Purchase selection policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub evaluation_interval_secs: f64,
    pub total_duration_secs: f64,
    pub tick_pause_millis: u64,
    pub policy: PolicyConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_secs: 5.0,
            total_duration_secs: 300.0,
            tick_pause_millis: 0,
            policy: PolicyConfig::default(),
        }
    }
}

impl RunConfig {
    /// Check that both durations are positive and representable
    pub fn validate(&self) -> Result<(), RunError> {
        self.evaluation_interval()?;
        self.total_duration()?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, RunError> {
        let config: RunConfig = serde_json::from_str(json)
            .map_err(|e| RunError::InvalidConfig(format!("Config parse failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RunError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RunError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    fn evaluation_interval(&self) -> Result<Duration, RunError> {
        positive_duration("evaluation_interval_secs", self.evaluation_interval_secs)
    }

    fn total_duration(&self) -> Result<Duration, RunError> {
        positive_duration("total_duration_secs", self.total_duration_secs)
    }

    fn tick_pause(&self) -> Duration {
        Duration::from_millis(self.tick_pause_millis)
    }
}

/// Seconds to `Duration`, rejecting zero, negatives, NaN and values too large
/// for `Duration`
fn positive_duration(field: &str, secs: f64) -> Result<Duration, RunError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(RunError::InvalidConfig(format!(
            "{} must be a positive number of seconds, got {}",
            field, secs
        ))),
    }
}

/// Policy selection for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PolicyConfig {
    /// Highest-priced upgrade strictly below the balance
    #[default]
    Greedy,
}

impl PolicyConfig {
    pub fn build(&self) -> Box<dyn SelectionPolicy> {
        match self {
            PolicyConfig::Greedy => Box::new(GreedyPolicy::new()),
        }
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// What an evaluation cycle got done
#[derive(Debug, Clone, PartialEq)]
enum CycleOutcome {
    /// Catalog could not be read; not counted as an evaluation
    Skipped,
    /// Full snapshot read, with the upgrade bought if any
    Evaluated(Option<String>),
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Tick number (0-indexed)
    pub tick: usize,

    /// Seconds since the run window opened, at the end of the tick
    pub elapsed_secs: f64,

    /// Whether the primary action succeeded
    pub clicked: bool,

    /// Whether an evaluation cycle ran
    pub evaluated: bool,

    /// Upgrade bought this tick, if any
    pub purchased: Option<String>,

    /// Whether the deadline was reached
    pub stopped: bool,
}

/// Run error types
///
/// Environment failures never show up here; they are absorbed by the loop.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RunError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Environment adapter broke the catalog contract: {0}")]
    CatalogMisaligned(#[from] CatalogError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Run already stopped")]
    AlreadyStopped,
}

// ============================================================================
// Scheduler
// ============================================================================

/// Drives one run against an injected environment
///
/// The scheduler exclusively owns the run window. The environment is
/// passed in by the caller (typically as `&mut E`) and the scheduler never
/// reaches for it any other way.
pub struct RunScheduler<E: EnvironmentPort, C: Clock> {
    env: E,
    clock: C,
    policy: Box<dyn SelectionPolicy>,
    config: RunConfig,
    window: RunWindow,
    state: RunState,
    event_log: EventLog,
    purchases: Vec<PurchaseRecord>,
    evaluations: usize,
    skipped_ticks: usize,
}

impl<E: EnvironmentPort, C: Clock> RunScheduler<E, C> {
    /// Validate `config` and open the run window at the clock's current time
    ///
    /// # Errors
    ///
    /// `RunError::InvalidConfig` when durations are not positive or too large
    /// to represent.
    pub fn new(
        env: E,
        clock: C,
        policy: Box<dyn SelectionPolicy>,
        config: RunConfig,
    ) -> Result<Self, RunError> {
        let window = RunWindow::open(
            clock.now(),
            config.evaluation_interval()?,
            config.total_duration()?,
        );

        let mut event_log = EventLog::new();
        event_log.log(RunEvent::RunStarted {
            tick: 0,
            evaluation_interval_secs: config.evaluation_interval_secs,
            total_duration_secs: config.total_duration_secs,
            policy: policy.name().to_string(),
        });
        info!(
            policy = policy.name(),
            evaluation_interval_secs = config.evaluation_interval_secs,
            total_duration_secs = config.total_duration_secs,
            "run started"
        );

        Ok(Self {
            env,
            clock,
            policy,
            config,
            window,
            state: RunState::Running,
            event_log,
            purchases: Vec::new(),
            evaluations: 0,
            skipped_ticks: 0,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn window(&self) -> &RunWindow {
        &self.window
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    fn log_event(&mut self, event: RunEvent) {
        self.event_log.log(event);
    }

    fn elapsed_secs(&self, now: Duration) -> f64 {
        self.window.elapsed(now).as_secs_f64()
    }

    /// Execute one tick
    ///
    /// # Errors
    ///
    /// * `RunError::AlreadyStopped` - the deadline was already reached
    /// * `RunError::CatalogMisaligned` - the adapter returned ids and prices
    ///   of different lengths
    pub fn tick(&mut self) -> Result<TickResult, RunError> {
        if self.state == RunState::Stopped {
            return Err(RunError::AlreadyStopped);
        }

        let tick = self.window.current_tick();

        // STEP 1: PRIMARY ACTION
        let clicked = match self.env.trigger_primary_action() {
            Ok(()) => true,
            Err(e) => {
                warn!(tick, error = %e, "primary action failed, skipping tick");
                self.skipped_ticks += 1;
                self.log_event(RunEvent::PrimaryActionFailed {
                    tick,
                    error: e.to_string(),
                });
                false
            }
        };

        // STEP 2: EVALUATION CYCLE
        let mut evaluated = false;
        let mut purchased = None;
        if clicked && self.window.evaluation_due(self.clock.now()) {
            if let CycleOutcome::Evaluated(bought) = self.evaluate(tick)? {
                evaluated = true;
                purchased = bought;
            }
            self.window.reschedule_from(self.clock.now());
        }

        // STEP 3: DEADLINE
        let now = self.clock.now();
        self.window.advance_tick();
        let stopped = self.window.deadline_reached(now);
        if stopped {
            self.stop(tick, now);
        } else {
            self.clock.pause(self.config.tick_pause());
        }

        Ok(TickResult {
            tick,
            elapsed_secs: self.elapsed_secs(now),
            clicked,
            evaluated,
            purchased,
            stopped,
        })
    }

    /// One evaluation-and-purchase cycle
    ///
    /// Ids, prices and balance are read back to back before any purchase.
    fn evaluate(&mut self, tick: usize) -> Result<CycleOutcome, RunError> {
        let snapshot = self
            .env
            .upgrade_ids()
            .and_then(|ids| self.env.upgrade_prices().map(|prices| (ids, prices)));

        let (ids, prices) = match snapshot {
            Ok(parts) => parts,
            Err(e) => {
                warn!(tick, error = %e, "catalog read failed, skipping cycle");
                self.log_event(RunEvent::CatalogReadFailed {
                    tick,
                    error: e.to_string(),
                });
                return Ok(CycleOutcome::Skipped);
            }
        };

        let catalog = Catalog::from_parts(ids, prices)?;
        let balance = self.env.resource_balance();
        self.evaluations += 1;

        let elapsed_secs = self.elapsed_secs(self.clock.now());
        debug!(tick, balance, catalog_size = catalog.len(), "evaluation cycle");
        self.log_event(RunEvent::EvaluationCycle {
            tick,
            elapsed_secs,
            balance,
            catalog_size: catalog.len(),
        });

        let Some(upgrade_id) = self.policy.select(balance, &catalog) else {
            self.log_event(RunEvent::NoAffordableUpgrade { tick, balance });
            return Ok(CycleOutcome::Evaluated(None));
        };
        let Some(price) = catalog.get(&upgrade_id).map(|u| u.price) else {
            warn!(
                tick,
                upgrade_id = %upgrade_id,
                policy = self.policy.name(),
                "selected id is not in the catalog, skipping purchase"
            );
            self.log_event(RunEvent::NoAffordableUpgrade { tick, balance });
            return Ok(CycleOutcome::Evaluated(None));
        };

        match self.env.purchase(&upgrade_id) {
            Ok(()) => {
                info!(tick, upgrade_id = %upgrade_id, price, balance, "upgrade purchased");
                self.log_event(RunEvent::UpgradePurchased {
                    tick,
                    upgrade_id: upgrade_id.clone(),
                    price,
                    balance,
                });
                self.purchases.push(PurchaseRecord {
                    tick,
                    elapsed_secs,
                    upgrade_id: upgrade_id.clone(),
                    price,
                    balance,
                });
                Ok(CycleOutcome::Evaluated(Some(upgrade_id)))
            }
            Err(EnvironmentError::PurchaseUnavailable { id }) => {
                debug!(tick, upgrade_id = %id, "upgrade no longer purchasable");
                self.log_event(RunEvent::PurchaseUnavailable {
                    tick,
                    upgrade_id: id,
                });
                Ok(CycleOutcome::Evaluated(None))
            }
            Err(e) => {
                warn!(tick, upgrade_id = %upgrade_id, error = %e, "purchase failed");
                self.log_event(RunEvent::PurchaseFailed {
                    tick,
                    upgrade_id,
                    error: e.to_string(),
                });
                Ok(CycleOutcome::Evaluated(None))
            }
        }
    }

    fn stop(&mut self, tick: usize, now: Duration) {
        self.state = RunState::Stopped;
        let elapsed_secs = self.elapsed_secs(now);
        info!(
            ticks = self.window.current_tick(),
            evaluations = self.evaluations,
            purchases = self.purchases.len(),
            elapsed_secs,
            "run stopped"
        );
        self.log_event(RunEvent::RunStopped {
            tick,
            elapsed_secs,
            evaluations: self.evaluations,
            purchases: self.purchases.len(),
        });
    }

    /// Tick until the deadline, then read the final metric
    ///
    /// # Errors
    ///
    /// Same as [`RunScheduler::tick`], plus `RunError::Serialization` if the
    /// config cannot be hashed for the report.
    pub fn run(&mut self) -> Result<RunReport, RunError> {
        if self.state == RunState::Stopped {
            return Err(RunError::AlreadyStopped);
        }

        while self.state == RunState::Running {
            self.tick()?;
        }

        self.report()
    }

    fn report(&mut self) -> Result<RunReport, RunError> {
        let final_metric = match self.env.final_metric() {
            Ok(metric) => Some(metric),
            Err(e) => {
                warn!(error = %e, "final metric unavailable");
                None
            }
        };

        Ok(RunReport {
            run_id: uuid::Uuid::new_v4(),
            config_hash: compute_config_hash(&self.config)?,
            policy: self.policy.name().to_string(),
            ticks: self.window.current_tick(),
            evaluations: self.evaluations,
            skipped_ticks: self.skipped_ticks,
            purchases: self.purchases.clone(),
            elapsed_secs: self.elapsed_secs(self.clock.now()),
            final_metric,
        })
    }
}
