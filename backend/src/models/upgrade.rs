//! Upgrade catalog model
//!
//! An upgrade is an opaque identifier plus a price. The catalog is a
//! snapshot of the environment's store at one evaluation cycle; it is never
//! a live view, so ids and prices may differ between cycles.
//!
//! CRITICAL: Catalogs are always built from two positionally aligned
//! sequences. A length mismatch is an adapter bug and is reported, never
//! silently truncated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling a catalog snapshot
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog misaligned: {ids} ids but {prices} prices")]
    Misaligned { ids: usize, prices: usize },
}

/// A single purchasable offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Identifier the environment uses to purchase this upgrade
    pub id: String,
    /// Cost in resource units
    pub price: u64,
}

impl Upgrade {
    pub fn new(id: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            price,
        }
    }
}

/// Ordered snapshot of the upgrade store
///
/// # Example
/// ```
/// use autoclicker_core_rs::Catalog;
///
/// let ids = vec!["buyCursor".to_string(), "buyGrandma".to_string()];
/// let catalog = Catalog::from_parts(ids, vec![15, 100]).unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get("buyGrandma").map(|u| u.price), Some(100));
///
/// assert!(Catalog::from_parts(vec!["a".to_string()], vec![]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    upgrades: Vec<Upgrade>,
}

impl Catalog {
    /// Pair ids and prices by index
    ///
    /// # Errors
    ///
    /// `CatalogError::Misaligned` when the two sequences differ in length.
    pub fn from_parts(ids: Vec<String>, prices: Vec<u64>) -> Result<Self, CatalogError> {
        if ids.len() != prices.len() {
            return Err(CatalogError::Misaligned {
                ids: ids.len(),
                prices: prices.len(),
            });
        }

        let upgrades = ids
            .into_iter()
            .zip(prices)
            .map(|(id, price)| Upgrade { id, price })
            .collect();

        Ok(Self { upgrades })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Upgrade> {
        self.upgrades.iter()
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }

    /// Last upgrade in display order with the given id
    pub fn get(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().rev().find(|u| u.id == id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Upgrade;
    type IntoIter = std::slice::Iter<'a, Upgrade>;

    fn into_iter(self) -> Self::IntoIter {
        self.upgrades.iter()
    }
}

impl FromIterator<Upgrade> for Catalog {
    fn from_iter<I: IntoIterator<Item = Upgrade>>(iter: I) -> Self {
        Self {
            upgrades: iter.into_iter().collect(),
        }
    }
}
