//! In-process simulated environment
//!
//! A small clicker game that satisfies `EnvironmentPort` without a browser.
//! It is what the CLI runs against and what the integration tests use for
//! end-to-end runs.
//!
//! # Mechanics
//!
//! - Each primary action adds `click_yield` to the balance.
//! - Every owned building produces `rate` per second of clock time.
//! - A building's price is `floor(base_price × price_growth^owned)`.
//! - Buying requires `price <= balance`; otherwise the purchase is
//!   reported unavailable.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{EnvironmentError, EnvironmentPort};
use crate::core::time::Clock;

/// Invalid simulated environment configuration
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulatedConfigError {
    #[error("price_growth must be finite and >= 1.0, got {0}")]
    InvalidPriceGrowth(f64),

    #[error("building {id}: {reason}")]
    InvalidBuilding { id: String, reason: String },

    #[error("duplicate building id: {0}")]
    DuplicateBuilding(String),
}

/// Static description of one store entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub id: String,
    pub base_price: u64,
    /// Passive production per second per owned unit
    pub rate: f64,
}

impl BuildingSpec {
    pub fn new(id: impl Into<String>, base_price: u64, rate: f64) -> Self {
        Self {
            id: id.into(),
            base_price,
            rate,
        }
    }
}

/// Simulated game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedConfig {
    /// Resources earned per primary action
    pub click_yield: u64,
    /// Multiplicative price increase per owned unit
    pub price_growth: f64,
    pub starting_balance: u64,
    pub buildings: Vec<BuildingSpec>,
    /// Fail every n-th primary action with `Unreachable` (0 = never)
    pub fail_every_nth_click: u64,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            click_yield: 1,
            price_growth: 1.15,
            starting_balance: 0,
            buildings: vec![
                BuildingSpec::new("buyCursor", 15, 0.2),
                BuildingSpec::new("buyGrandma", 100, 0.8),
                BuildingSpec::new("buyFactory", 500, 4.0),
                BuildingSpec::new("buyMine", 2_000, 10.0),
                BuildingSpec::new("buyShipment", 7_000, 20.0),
                BuildingSpec::new("buyAlchemy lab", 50_000, 100.0),
                BuildingSpec::new("buyPortal", 1_000_000, 1_666.6),
                BuildingSpec::new("buyTime machine", 123_456_789, 123_456.0),
            ],
            fail_every_nth_click: 0,
        }
    }
}

impl SimulatedConfig {
    pub fn validate(&self) -> Result<(), SimulatedConfigError> {
        if !self.price_growth.is_finite() || self.price_growth < 1.0 {
            return Err(SimulatedConfigError::InvalidPriceGrowth(self.price_growth));
        }

        let mut seen = std::collections::HashSet::new();
        for building in &self.buildings {
            if !seen.insert(building.id.as_str()) {
                return Err(SimulatedConfigError::DuplicateBuilding(building.id.clone()));
            }
            if !building.rate.is_finite() || building.rate < 0.0 {
                return Err(SimulatedConfigError::InvalidBuilding {
                    id: building.id.clone(),
                    reason: format!("rate must be finite and non-negative, got {}", building.rate),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Building {
    spec: BuildingSpec,
    owned: u32,
}

impl Building {
    fn price(&self, growth: f64) -> u64 {
        (self.spec.base_price as f64 * growth.powi(self.owned as i32)).floor() as u64
    }
}

/// Clicker game driven by a shared clock
///
/// # Example
/// ```
/// use autoclicker_core_rs::{EnvironmentPort, ManualClock, SimulatedConfig, SimulatedEnvironment};
///
/// let clock = ManualClock::new();
/// let mut env = SimulatedEnvironment::new(SimulatedConfig::default(), clock).unwrap();
///
/// for _ in 0..20 {
///     env.trigger_primary_action().unwrap();
/// }
/// assert_eq!(env.resource_balance(), 20);
/// env.purchase("buyCursor").unwrap();
/// assert_eq!(env.resource_balance(), 5);
/// ```
#[derive(Debug)]
pub struct SimulatedEnvironment<C: Clock> {
    clock: C,
    click_yield: u64,
    price_growth: f64,
    fail_every_nth_click: u64,
    balance: f64,
    buildings: Vec<Building>,
    clicks: u64,
    last_update: Duration,
}

impl<C: Clock> SimulatedEnvironment<C> {
    pub fn new(config: SimulatedConfig, clock: C) -> Result<Self, SimulatedConfigError> {
        config.validate()?;

        let last_update = clock.now();
        Ok(Self {
            clock,
            click_yield: config.click_yield,
            price_growth: config.price_growth,
            fail_every_nth_click: config.fail_every_nth_click,
            balance: config.starting_balance as f64,
            buildings: config
                .buildings
                .into_iter()
                .map(|spec| Building { spec, owned: 0 })
                .collect(),
            clicks: 0,
            last_update,
        })
    }

    /// Total passive production per second
    pub fn production_rate(&self) -> f64 {
        self.buildings
            .iter()
            .map(|b| b.spec.rate * b.owned as f64)
            .sum()
    }

    /// Units owned of a building (0 for unknown ids)
    pub fn owned(&self, id: &str) -> u32 {
        self.buildings
            .iter()
            .find(|b| b.spec.id == id)
            .map_or(0, |b| b.owned)
    }

    /// Current price of a building
    pub fn price_of(&self, id: &str) -> Option<u64> {
        self.buildings
            .iter()
            .find(|b| b.spec.id == id)
            .map(|b| b.price(self.price_growth))
    }

    /// Primary actions received so far, including failed ones
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// Accrue passive production up to the clock's current time
    fn accrue(&mut self) {
        let now = self.clock.now();
        let delta = now.saturating_sub(self.last_update);
        self.balance += self.production_rate() * delta.as_secs_f64();
        self.last_update = now;
    }
}

impl<C: Clock> EnvironmentPort for SimulatedEnvironment<C> {
    fn trigger_primary_action(&mut self) -> Result<(), EnvironmentError> {
        self.clicks += 1;
        if self.fail_every_nth_click > 0 && self.clicks % self.fail_every_nth_click == 0 {
            return Err(EnvironmentError::Unreachable(format!(
                "click {} dropped",
                self.clicks
            )));
        }

        self.accrue();
        self.balance += self.click_yield as f64;
        Ok(())
    }

    fn upgrade_ids(&mut self) -> Result<Vec<String>, EnvironmentError> {
        Ok(self.buildings.iter().map(|b| b.spec.id.clone()).collect())
    }

    fn upgrade_prices(&mut self) -> Result<Vec<u64>, EnvironmentError> {
        let growth = self.price_growth;
        Ok(self.buildings.iter().map(|b| b.price(growth)).collect())
    }

    fn resource_balance(&mut self) -> u64 {
        self.accrue();
        self.balance.floor() as u64
    }

    fn purchase(&mut self, id: &str) -> Result<(), EnvironmentError> {
        self.accrue();

        let growth = self.price_growth;
        let balance = self.balance;
        let building = self
            .buildings
            .iter_mut()
            .find(|b| b.spec.id == id)
            .ok_or_else(|| EnvironmentError::PurchaseUnavailable { id: id.to_string() })?;

        let price = building.price(growth);
        if price as f64 > balance {
            return Err(EnvironmentError::PurchaseUnavailable { id: id.to_string() });
        }

        building.owned += 1;
        self.balance -= price as f64;
        Ok(())
    }

    fn final_metric(&mut self) -> Result<String, EnvironmentError> {
        Ok(format!("cookies/second : {:.1}", self.production_rate()))
    }
}
