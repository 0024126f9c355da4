//! `run_session` entry point for Python
//!
//! # Example (from Python)
//!
//! ```python
//! from autoclicker_core_rs import run_session
//!
//! report = run_session(page, {"evaluation_interval_secs": 5, "total_duration_secs": 300})
//! print(report["final_metric"])
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::environment::PyEnvironment;
use crate::core::time::SystemClock;
use crate::orchestrator::{RunConfig, RunController, RunError, RunReport};

/// Build a RunConfig from an optional dict, defaults for missing keys
fn parse_run_config(config: Option<&Bound<'_, PyDict>>) -> PyResult<RunConfig> {
    let mut run_config = RunConfig::default();
    let Some(config) = config else {
        return Ok(run_config);
    };

    if let Some(value) = config.get_item("evaluation_interval_secs")? {
        run_config.evaluation_interval_secs = value.extract()?;
    }
    if let Some(value) = config.get_item("total_duration_secs")? {
        run_config.total_duration_secs = value.extract()?;
    }
    if let Some(value) = config.get_item("tick_pause_millis")? {
        run_config.tick_pause_millis = value.extract()?;
    }

    run_config
        .validate()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(run_config)
}

fn report_to_py(py: Python<'_>, report: &RunReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("run_id", report.run_id.to_string())?;
    dict.set_item("config_hash", &report.config_hash)?;
    dict.set_item("policy", &report.policy)?;
    dict.set_item("ticks", report.ticks)?;
    dict.set_item("evaluations", report.evaluations)?;
    dict.set_item("skipped_ticks", report.skipped_ticks)?;
    dict.set_item("elapsed_secs", report.elapsed_secs)?;
    dict.set_item("final_metric", report.final_metric.as_deref())?;

    let purchases = PyList::empty_bound(py);
    for purchase in &report.purchases {
        let item = PyDict::new_bound(py);
        item.set_item("tick", purchase.tick)?;
        item.set_item("elapsed_secs", purchase.elapsed_secs)?;
        item.set_item("upgrade_id", &purchase.upgrade_id)?;
        item.set_item("price", purchase.price)?;
        item.set_item("balance", purchase.balance)?;
        purchases.append(item)?;
    }
    dict.set_item("purchases", purchases)?;

    Ok(dict.unbind())
}

/// Run a full session against a Python environment object
///
/// # Errors
///
/// Raises ValueError for an invalid config and RuntimeError when the
/// environment breaks the catalog contract.
#[pyfunction]
#[pyo3(signature = (env, config = None))]
pub fn run_session(
    py: Python<'_>,
    env: Py<PyAny>,
    config: Option<&Bound<'_, PyDict>>,
) -> PyResult<Py<PyDict>> {
    let run_config = parse_run_config(config)?;
    let controller =
        RunController::new(run_config).map_err(|e| PyValueError::new_err(e.to_string()))?;

    let mut environment = PyEnvironment::new(env);
    let clock = SystemClock::new();

    let outcome = py
        .allow_threads(|| controller.run(&mut environment, &clock))
        .map_err(|e: RunError| PyRuntimeError::new_err(format!("Run failed: {}", e)))?;

    report_to_py(py, &outcome.report)
}
