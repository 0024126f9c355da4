//! Run Controller - composition root
//!
//! Wires one environment, one clock and the configured policy into a
//! scheduler, drives it to completion and hands back the report together
//! with the event log.

use super::engine::{RunConfig, RunError, RunScheduler};
use super::report::RunReport;
use crate::core::time::Clock;
use crate::environment::EnvironmentPort;
use crate::models::EventLog;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    pub events: EventLog,
}

/// Entry orchestration for a single run
///
/// # Example
///
/// ```rust
/// use autoclicker_core_rs::orchestrator::{RunConfig, RunController};
/// use autoclicker_core_rs::{ManualClock, SimulatedConfig, SimulatedEnvironment};
///
/// let clock = ManualClock::new();
/// let mut env = SimulatedEnvironment::new(SimulatedConfig::default(), clock.clone()).unwrap();
/// let controller = RunController::new(RunConfig {
///     evaluation_interval_secs: 1.0,
///     total_duration_secs: 3.0,
///     tick_pause_millis: 10,
///     ..RunConfig::default()
/// })
/// .unwrap();
///
/// let outcome = controller.run(&mut env, &clock).unwrap();
/// assert!(outcome.report.final_metric.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RunController {
    config: RunConfig,
}

impl RunController {
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run one session against `env` until the deadline
    pub fn run<E, C>(&self, env: &mut E, clock: &C) -> Result<RunOutcome, RunError>
    where
        E: EnvironmentPort + ?Sized,
        C: Clock + ?Sized,
    {
        let policy = self.config.policy.build();
        let mut scheduler = RunScheduler::new(env, clock, policy, self.config.clone())?;
        let report = scheduler.run()?;

        Ok(RunOutcome {
            report,
            events: scheduler.event_log().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_rejects_invalid_config() {
        let err = RunController::new(RunConfig {
            total_duration_secs: -1.0,
            ..RunConfig::default()
        })
        .unwrap_err();

        assert!(matches!(err, RunError::InvalidConfig(_)));
    }
}
