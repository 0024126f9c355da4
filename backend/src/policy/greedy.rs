//! Greedy (highest affordable price) Policy
//!
//! Baseline purchase policy: buy the most expensive upgrade the balance can
//! strictly cover.
//!
//! # Behavior
//!
//! - Price is the only value signal the environment exposes
//! - Same-price upgrades collapse, later catalog entry wins
//! - No look-ahead, no saving up for a better upgrade

use super::{select_upgrade, SelectionPolicy};
use crate::models::Catalog;

/// Greedy policy: spend on the highest-priced affordable upgrade
///
/// # Example
///
/// ```
/// use autoclicker_core_rs::policy::{GreedyPolicy, SelectionPolicy};
/// use autoclicker_core_rs::Catalog;
///
/// let policy = GreedyPolicy::new();
/// let catalog = Catalog::from_parts(
///     vec!["buyCursor".to_string(), "buyGrandma".to_string()],
///     vec![15, 100],
/// ).unwrap();
///
/// assert_eq!(policy.select(101, &catalog).as_deref(), Some("buyGrandma"));
/// assert_eq!(policy.select(100, &catalog).as_deref(), Some("buyCursor"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    /// Create new greedy policy
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPolicy for GreedyPolicy {
    fn select(&self, balance: u64, catalog: &Catalog) -> Option<String> {
        select_upgrade(balance, catalog).map(str::to_string)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
