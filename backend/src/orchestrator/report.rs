//! Run Report - end-of-run summary
//!
//! Captures what a finished run did: how long it ran, what it bought and
//! the environment's final metric. Reports serialize to JSON.
//!
//! # Critical Invariants
//!
//! - **Config Identity**: `config_hash` depends only on config values,
//!   never on the key order of the JSON they were loaded from
//! - **Purchase Order**: `purchases` are in the order they were made

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::engine::{RunConfig, RunError};

// ============================================================================
// Report Structures
// ============================================================================

/// One successful purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub tick: usize,
    pub elapsed_secs: f64,
    pub upgrade_id: String,
    /// Catalog price at the time of the decision
    pub price: u64,
    /// Balance read in the same cycle
    pub balance: u64,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,

    /// SHA256 hash of the run config
    pub config_hash: String,

    /// Name of the selection policy
    pub policy: String,

    /// Ticks executed, including skipped ones
    pub ticks: usize,

    /// Evaluation cycles that read a full snapshot
    pub evaluations: usize,

    /// Ticks whose primary action failed
    pub skipped_ticks: usize,

    pub purchases: Vec<PurchaseRecord>,

    pub elapsed_secs: f64,

    /// Environment's own summary, `None` if it could not be read
    pub final_metric: Option<String>,
}

impl RunReport {
    /// Total spent according to catalog prices at decision time
    pub fn total_spent(&self) -> u64 {
        self.purchases.iter().map(|p| p.price).sum()
    }

    /// Ids purchased, in order
    pub fn purchased_ids(&self) -> Vec<&str> {
        self.purchases.iter().map(|p| p.upgrade_id.as_str()).collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, RunError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RunError::Serialization(format!("Report serialization failed: {}", e)))
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Hex SHA-256 of the config's JSON form
///
/// `RunConfig` holds no maps, so serde writes its fields in declaration
/// order and equal configs always hash alike, whatever key order the source
/// JSON used.
pub fn compute_config_hash(config: &RunConfig) -> Result<String, RunError> {
    let bytes = serde_json::to_vec(config)
        .map_err(|e| RunError::Serialization(format!("Config serialization failed: {}", e)))?;

    Ok(Sha256::digest(&bytes)
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect())
}
