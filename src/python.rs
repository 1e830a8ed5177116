//! Python bindings
//!
//! `FeedSession` keeps a feed controller in Rust memory so Python only pulls
//! the derived lists it renders. Fixture data is parsed once and cached.

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;

use crate::auth::LoginForm;
use crate::client::{SimulatedBackend, VaultBackend};
use crate::config::VaultConfig;
use crate::error::VaultError;
use crate::feed::{CardStats, FeedController};
use crate::model::FixtureSet;
use crate::telemetry;

// ============================================================================
// Cached Fixtures
// ============================================================================

static CACHED_FIXTURES: OnceCell<Arc<RwLock<FixtureSet>>> = OnceCell::new();

fn cached_fixtures() -> PyResult<Arc<RwLock<FixtureSet>>> {
    let cached = CACHED_FIXTURES.get_or_try_init(|| {
        FixtureSet::builtin().map(|fixtures| Arc::new(RwLock::new(fixtures)))
    })?;
    Ok(Arc::clone(cached))
}

fn stats_dict<'py>(py: Python<'py>, stats: CardStats) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("likes", stats.likes)?;
    dict.set_item("saves", stats.saves)?;
    dict.set_item("liked", stats.liked)?;
    dict.set_item("saved", stats.saved)?;
    Ok(dict)
}

/// Replace the cached fixture set, e.g. with a data file of your own
///
/// Passing `None` reloads the bundled sample data.
#[pyfunction]
#[pyo3(signature = (fixtures_json=None))]
fn load_fixtures(fixtures_json: Option<&str>) -> PyResult<()> {
    let fixtures = match fixtures_json {
        Some(raw) => FixtureSet::from_json_str(raw)?,
        None => FixtureSet::builtin()?,
    };
    replace_cached(&CACHED_FIXTURES, fixtures);
    Ok(())
}

/// Install `value` whether or not the cell was already set, even when
/// another thread initialises it concurrently
fn replace_cached<T>(cell: &OnceCell<Arc<RwLock<T>>>, value: T) {
    if let Err((existing, rejected)) = cell.try_insert(Arc::new(RwLock::new(value))) {
        std::mem::swap(&mut *existing.write(), &mut *rejected.write());
    }
}

// ============================================================================
// FeedSession
// ============================================================================

#[pyclass]
pub struct FeedSession {
    controller: FeedController,
}

#[pymethods]
impl FeedSession {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(raw) => VaultConfig::from_json_str(raw)?,
            None => VaultConfig::default(),
        };
        let fixtures = cached_fixtures()?.read().clone();
        Ok(Self {
            controller: FeedController::new(fixtures, config.feed),
        })
    }

    #[getter]
    fn active_tab(&self) -> String {
        self.controller.selection().active_tab.to_string()
    }

    #[getter]
    fn sort(&self) -> String {
        self.controller.selection().sort.to_string()
    }

    #[getter]
    fn active_filter_count(&self) -> usize {
        self.controller.selection().active_filter_count()
    }

    fn set_tab(&mut self, tab: &str) -> PyResult<()> {
        self.controller.set_tab(tab.parse()?);
        Ok(())
    }

    fn set_sort(&mut self, sort: &str) -> PyResult<()> {
        self.controller.set_sort(sort.parse()?);
        Ok(())
    }

    /// Returns whether the category is now selected
    fn toggle_category(&mut self, category: &str) -> PyResult<bool> {
        Ok(self.controller.toggle_category(category.parse()?))
    }

    fn toggle_difficulty(&mut self, difficulty: &str) -> PyResult<bool> {
        Ok(self.controller.toggle_difficulty(difficulty.parse()?))
    }

    fn reset_filters(&mut self) {
        self.controller.reset_filters();
    }

    /// Ids of the items on the active tab, in display order
    fn visible_ids(&self) -> Vec<String> {
        self.controller
            .view()
            .items
            .ids()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Full view snapshot as JSON
    fn view_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.controller.view())
            .map_err(|e| VaultError::from(e).into())
    }

    fn card_stats<'py>(&self, py: Python<'py>, visualization_id: &str) -> PyResult<Bound<'py, PyDict>> {
        stats_dict(py, self.controller.card_stats(visualization_id)?)
    }

    fn toggle_like<'py>(&mut self, py: Python<'py>, visualization_id: &str) -> PyResult<Bound<'py, PyDict>> {
        stats_dict(py, self.controller.toggle_like(visualization_id)?)
    }

    fn toggle_save<'py>(&mut self, py: Python<'py>, visualization_id: &str) -> PyResult<Bound<'py, PyDict>> {
        stats_dict(py, self.controller.toggle_save(visualization_id)?)
    }
}

// ============================================================================
// Auth
// ============================================================================

/// Run the simulated login and resolve to the session token
///
/// The simulated service refuses every login, so the awaitable raises
/// `RuntimeError` after the configured latency. Empty fields raise
/// `ValueError` immediately.
#[pyfunction]
#[pyo3(signature = (email, password, config_json=None))]
fn login_async<'py>(
    py: Python<'py>,
    email: String,
    password: String,
    config_json: Option<&str>,
) -> PyResult<Bound<'py, PyAny>> {
    let config = match config_json {
        Some(raw) => VaultConfig::from_json_str(raw)?,
        None => VaultConfig::default(),
    };
    let request = LoginForm::new(email, password)
        .validate()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let backend = SimulatedBackend::from_config(&config.auth);

    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let session = backend.login(request).await.map_err(VaultError::from)?;
        Ok(session.token)
    })
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn vector_vault_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    telemetry::init_tracing();
    m.add_function(wrap_pyfunction!(load_fixtures, m)?)?;
    m.add_function(wrap_pyfunction!(login_async, m)?)?;
    m.add_class::<FeedSession>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_cached_sets_empty_cell() {
        let cell: OnceCell<Arc<RwLock<u32>>> = OnceCell::new();
        replace_cached(&cell, 7);
        assert_eq!(*cell.get().unwrap().read(), 7);
    }

    #[test]
    fn test_replace_cached_overwrites_existing() {
        let cell: OnceCell<Arc<RwLock<u32>>> = OnceCell::new();
        let _ = cell.set(Arc::new(RwLock::new(1)));
        let shared = Arc::clone(cell.get().unwrap());

        replace_cached(&cell, 2);
        assert_eq!(*shared.read(), 2);
    }

    #[test]
    fn test_concurrent_replace_keeps_a_caller_value() {
        static CELL: OnceCell<Arc<RwLock<u32>>> = OnceCell::new();
        let handles: Vec<_> = (1..=8)
            .map(|n| std::thread::spawn(move || replace_cached(&CELL, n)))
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let value = *CELL.get().unwrap().read();
        assert!((1..=8).contains(&value));

        replace_cached(&CELL, 42);
        assert_eq!(*CELL.get().unwrap().read(), 42);
    }
}
