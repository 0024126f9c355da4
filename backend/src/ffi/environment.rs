//! Python-hosted environment adapter
//!
//! Wraps any Python object exposing:
//!
//! - `click()` - perform the primary action
//! - `store_entries()` - list of `(id, label)` tuples, labels like
//!   `"Grandma - 100"`; header rows may have empty labels
//! - `balance_text()` - the displayed balance
//! - `purchase(id)` - raise `LookupError` when the id is gone
//! - `final_metric()` - summary text

use pyo3::exceptions::PyLookupError;
use pyo3::prelude::*;

use crate::environment::{balance_or_zero, catalog_from_labels, EnvironmentError, EnvironmentPort};
use crate::models::Catalog;

/// Adapter from a Python object to `EnvironmentPort`
///
/// `upgrade_ids()` reads the store once and caches the filtered snapshot;
/// the following `upgrade_prices()` answers from that same snapshot so the
/// two sequences can't disagree.
pub struct PyEnvironment {
    inner: Py<PyAny>,
    snapshot: Option<Catalog>,
}

impl PyEnvironment {
    pub fn new(inner: Py<PyAny>) -> Self {
        Self {
            inner,
            snapshot: None,
        }
    }

    fn read_store(&self) -> Result<Catalog, EnvironmentError> {
        Python::with_gil(|py| {
            let entries: Vec<(String, String)> = self
                .inner
                .bind(py)
                .call_method0("store_entries")?
                .extract()?;
            Ok::<_, PyErr>(catalog_from_labels(entries))
        })
        .map_err(|e| EnvironmentError::Unreachable(e.to_string()))
    }
}

impl EnvironmentPort for PyEnvironment {
    fn trigger_primary_action(&mut self) -> Result<(), EnvironmentError> {
        Python::with_gil(|py| self.inner.bind(py).call_method0("click").map(|_| ()))
            .map_err(|e| EnvironmentError::Unreachable(e.to_string()))
    }

    fn upgrade_ids(&mut self) -> Result<Vec<String>, EnvironmentError> {
        let catalog = self.read_store()?;
        let ids = catalog.iter().map(|u| u.id.clone()).collect();
        self.snapshot = Some(catalog);
        Ok(ids)
    }

    fn upgrade_prices(&mut self) -> Result<Vec<u64>, EnvironmentError> {
        let catalog = match self.snapshot.take() {
            Some(catalog) => catalog,
            None => self.read_store()?,
        };
        Ok(catalog.iter().map(|u| u.price).collect())
    }

    fn resource_balance(&mut self) -> u64 {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method0("balance_text")
                .and_then(|text| text.extract::<String>())
                .map(|text| balance_or_zero(&text))
                .unwrap_or(0)
        })
    }

    fn purchase(&mut self, id: &str) -> Result<(), EnvironmentError> {
        Python::with_gil(|py| match self.inner.bind(py).call_method1("purchase", (id,)) {
            Ok(_) => Ok(()),
            Err(e) if e.is_instance_of::<PyLookupError>(py) => {
                Err(EnvironmentError::PurchaseUnavailable { id: id.to_string() })
            }
            Err(e) => Err(EnvironmentError::Other(e.to_string())),
        })
    }

    fn final_metric(&mut self) -> Result<String, EnvironmentError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method0("final_metric")
                .and_then(|metric| metric.extract::<String>())
        })
        .map_err(|e| EnvironmentError::Other(e.to_string()))
    }
}
