//! Event logging for run auditing.
//!
//! This module defines the RunEvent enum which captures every decision the
//! scheduler makes during a run. Events enable:
//! - Debugging (understand what was bought and when)
//! - Analysis (purchase cadence, skipped ticks)
//! - Export (one JSON object per line)
//!
//! # Event Types
//!
//! Events are categorized by loop phase:
//! - **Run**: start and stop of the run
//! - **Tick**: primary action failures
//! - **Evaluation**: catalog reads and selection outcomes
//! - **Purchase**: purchases made, unavailable or failed
//!
//! # Example
//!
//! ```rust
//! use autoclicker_core_rs::models::RunEvent;
//!
//! let event = RunEvent::UpgradePurchased {
//!     tick: 120,
//!     upgrade_id: "buyGrandma".to_string(),
//!     price: 100,
//!     balance: 142,
//! };
//!
//! assert_eq!(event.tick(), 120);
//! assert_eq!(event.event_type(), "UpgradePurchased");
//! ```

use serde::{Deserialize, Serialize};

/// Run event capturing one scheduler decision.
///
/// All events include the tick number for temporal ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum RunEvent {
    /// Run window opened
    RunStarted {
        tick: usize,
        evaluation_interval_secs: f64,
        total_duration_secs: f64,
        policy: String,
    },

    /// Primary action failed; the rest of the tick was skipped
    PrimaryActionFailed { tick: usize, error: String },

    /// Evaluation cycle read a catalog snapshot and a balance
    EvaluationCycle {
        tick: usize,
        elapsed_secs: f64,
        balance: u64,
        catalog_size: usize,
    },

    /// Reading ids or prices failed; cycle skipped
    CatalogReadFailed { tick: usize, error: String },

    /// Nothing in the snapshot was strictly cheaper than the balance
    NoAffordableUpgrade { tick: usize, balance: u64 },

    /// Purchase issued
    UpgradePurchased {
        tick: usize,
        upgrade_id: String,
        price: u64,
        balance: u64,
    },

    /// Selected upgrade could no longer be bought
    PurchaseUnavailable { tick: usize, upgrade_id: String },

    /// Purchase failed for another environment reason
    PurchaseFailed {
        tick: usize,
        upgrade_id: String,
        error: String,
    },

    /// Deadline reached
    RunStopped {
        tick: usize,
        elapsed_secs: f64,
        evaluations: usize,
        purchases: usize,
    },
}

impl RunEvent {
    /// Get the tick when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            RunEvent::RunStarted { tick, .. } => *tick,
            RunEvent::PrimaryActionFailed { tick, .. } => *tick,
            RunEvent::EvaluationCycle { tick, .. } => *tick,
            RunEvent::CatalogReadFailed { tick, .. } => *tick,
            RunEvent::NoAffordableUpgrade { tick, .. } => *tick,
            RunEvent::UpgradePurchased { tick, .. } => *tick,
            RunEvent::PurchaseUnavailable { tick, .. } => *tick,
            RunEvent::PurchaseFailed { tick, .. } => *tick,
            RunEvent::RunStopped { tick, .. } => *tick,
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            RunEvent::RunStarted { .. } => "RunStarted",
            RunEvent::PrimaryActionFailed { .. } => "PrimaryActionFailed",
            RunEvent::EvaluationCycle { .. } => "EvaluationCycle",
            RunEvent::CatalogReadFailed { .. } => "CatalogReadFailed",
            RunEvent::NoAffordableUpgrade { .. } => "NoAffordableUpgrade",
            RunEvent::UpgradePurchased { .. } => "UpgradePurchased",
            RunEvent::PurchaseUnavailable { .. } => "PurchaseUnavailable",
            RunEvent::PurchaseFailed { .. } => "PurchaseFailed",
            RunEvent::RunStopped { .. } => "RunStopped",
        }
    }

    /// Get upgrade ID if event relates to a specific upgrade
    pub fn upgrade_id(&self) -> Option<&str> {
        match self {
            RunEvent::UpgradePurchased { upgrade_id, .. } => Some(upgrade_id),
            RunEvent::PurchaseUnavailable { upgrade_id, .. } => Some(upgrade_id),
            RunEvent::PurchaseFailed { upgrade_id, .. } => Some(upgrade_id),
            _ => None,
        }
    }
}

/// Event log for storing and querying run events.
///
/// This is a simple wrapper around Vec<RunEvent> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RunEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: RunEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&RunEvent> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&RunEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific upgrade
    pub fn events_for_upgrade(&self, upgrade_id: &str) -> Vec<&RunEvent> {
        self.events
            .iter()
            .filter(|e| e.upgrade_id() == Some(upgrade_id))
            .collect()
    }

    /// Serialize as JSON lines, one event per line
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_upgrade_id() {
        let event = RunEvent::PurchaseUnavailable {
            tick: 5,
            upgrade_id: "buyMine".to_string(),
        };

        assert_eq!(event.upgrade_id(), Some("buyMine"));
        assert_eq!(
            RunEvent::NoAffordableUpgrade { tick: 5, balance: 0 }.upgrade_id(),
            None
        );
    }

    #[test]
    fn test_event_log_query_by_type() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.log(RunEvent::PrimaryActionFailed {
            tick: 1,
            error: "unreachable".to_string(),
        });
        log.log(RunEvent::NoAffordableUpgrade { tick: 2, balance: 3 });
        log.log(RunEvent::PrimaryActionFailed {
            tick: 3,
            error: "unreachable".to_string(),
        });

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_of_type("PrimaryActionFailed").len(), 2);
        assert_eq!(log.events_at_tick(2).len(), 1);
    }

    #[test]
    fn test_to_jsonl_tags_event_type() {
        let mut log = EventLog::new();
        log.log(RunEvent::UpgradePurchased {
            tick: 7,
            upgrade_id: "buyCursor".to_string(),
            price: 15,
            balance: 20,
        });
        log.log(RunEvent::NoAffordableUpgrade { tick: 9, balance: 1 });

        let jsonl = log.to_jsonl().unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event_type"], "UpgradePurchased");
        assert_eq!(first["upgrade_id"], "buyCursor");
    }
}
