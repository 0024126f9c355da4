//! Selection Policy Module
//!
//! This module defines the policy interface for purchase decisions.
//!
//! # Overview
//!
//! At each evaluation cycle the scheduler hands the policy the current
//! balance and a fresh catalog snapshot. The policy answers with at most one
//! upgrade to buy. Policies are pure: no I/O, no state carried between
//! cycles, same answer for the same inputs.
//!
//! # Affordability
//!
//! The affordable set maps price → id and is rebuilt every cycle:
//!
//! 1. Scan the catalog in display order, keying by price. Two upgrades with
//!    the same price collapse to one entry and the later one wins.
//! 2. Keep only prices **strictly less than** the balance. An upgrade that
//!    costs exactly the balance is never selected.
//!
//! # Policy Interface
//!
//! ```rust
//! use autoclicker_core_rs::policy::SelectionPolicy;
//! use autoclicker_core_rs::Catalog;
//!
//! struct CheapestFirst;
//!
//! impl SelectionPolicy for CheapestFirst {
//!     fn select(&self, balance: u64, catalog: &Catalog) -> Option<String> {
//!         catalog
//!             .iter()
//!             .filter(|u| u.price < balance)
//!             .min_by_key(|u| u.price)
//!             .map(|u| u.id.clone())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "cheapest_first"
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use crate::models::Catalog;

pub mod greedy;

pub use greedy::GreedyPolicy;

/// Affordable upgrades keyed by price
///
/// Same-price entries collapse by insertion order (the later catalog entry
/// overwrites the earlier one), then entries with `price >= balance` are
/// dropped.
///
/// # Example
/// ```
/// use autoclicker_core_rs::Catalog;
/// use autoclicker_core_rs::policy::affordable_upgrades;
///
/// let catalog = Catalog::from_parts(
///     vec!["a".to_string(), "b".to_string(), "c".to_string()],
///     vec![10, 10, 50],
/// ).unwrap();
///
/// let affordable = affordable_upgrades(11, &catalog);
/// assert_eq!(affordable.len(), 1);
/// assert_eq!(affordable.get(&10), Some(&"b"));
/// ```
pub fn affordable_upgrades(balance: u64, catalog: &Catalog) -> BTreeMap<u64, &str> {
    let mut by_price: BTreeMap<u64, &str> = BTreeMap::new();
    for upgrade in catalog {
        by_price.insert(upgrade.price, upgrade.id.as_str());
    }

    by_price.retain(|price, _| *price < balance);
    by_price
}

/// Greedy selection: the id paired with the highest affordable price
///
/// Returns `None` when nothing in the catalog is strictly cheaper than
/// `balance`.
///
/// # Example
/// ```
/// use autoclicker_core_rs::Catalog;
/// use autoclicker_core_rs::policy::select_upgrade;
///
/// let catalog = Catalog::from_parts(
///     vec!["x".to_string(), "y".to_string()],
///     vec![3, 8],
/// ).unwrap();
///
/// assert_eq!(select_upgrade(5, &catalog), Some("x"));
/// assert_eq!(select_upgrade(9, &catalog), Some("y"));
/// assert_eq!(select_upgrade(3, &catalog), None);
/// ```
pub fn select_upgrade(balance: u64, catalog: &Catalog) -> Option<&str> {
    affordable_upgrades(balance, catalog)
        .into_iter()
        .next_back()
        .map(|(_, id)| id)
}

/// Purchase selection policy trait
///
/// Implement this trait to plug a different purchase strategy into the
/// scheduler. `select` is called once per evaluation cycle.
pub trait SelectionPolicy {
    /// Pick at most one upgrade to buy from `catalog` given `balance`
    fn select(&self, balance: u64, catalog: &Catalog) -> Option<String>;

    /// Short name used in logs and events
    fn name(&self) -> &'static str;
}
