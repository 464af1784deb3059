//! manager/core — the StateManager struct, cell lifecycle and subscriptions.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};

use crate::config::{ManagerBuilder, StateConfig};
use crate::error::{StateError, StateResult};
use crate::metrics;
use crate::subs::{ChangeCallback, SubRegistry, SubscriptionId};
use crate::view::StateView;

/// One named state: its live data root and its subscriber table. Shared via
/// `Arc` between the registry and every view handed out for it.
pub(crate) struct StateCell {
    pub(crate) name: String,
    pub(crate) data: Mutex<Value>,
    pub(crate) subs: SubRegistry,
}

impl StateCell {
    fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            data: Mutex::new(Value::Object(Map::new())),
            subs: SubRegistry::new(),
        })
    }
}

/// Directory of named states.
///
/// States are created implicitly on first access (read, write or
/// subscribe), replaceable wholesale at any time, and destroyed by
/// [`delete_state`](StateManager::delete_state) together with their
/// subscriptions. Iteration order everywhere is insertion order of first
/// creation.
pub struct StateManager {
    states: Mutex<IndexMap<String, Arc<StateCell>>>,
    cfg: StateConfig,
}

impl StateManager {
    /// Manager with environment-derived configuration (see
    /// [`StateConfig::from_env`]).
    pub fn new() -> Self {
        Self::with_config(StateConfig::from_env())
    }

    /// Manager with an explicit configuration.
    pub fn with_config(cfg: StateConfig) -> Self {
        Self {
            states: Mutex::new(IndexMap::new()),
            cfg,
        }
    }

    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::new()
    }

    pub fn config(&self) -> &StateConfig {
        &self.cfg
    }

    /// Live, navigable view over the named state's data root. Omit `writer`
    /// for read-only access; every mutating call through such a view fails
    /// with [`StateError::WriteNotPermitted`].
    pub fn get_state(&self, name: &str, writer: Option<&str>) -> StateResult<StateView> {
        let cell = self.get_or_create(name)?;
        Ok(StateView::root(cell, writer, self.cfg.gate_deletes))
    }

    /// Register `cb` on the named state (creating the state if absent);
    /// returns the subscription id.
    pub fn subscribe(&self, name: &str, cb: ChangeCallback) -> StateResult<SubscriptionId> {
        let cell = self.get_or_create(name)?;
        Ok(cell.subs.subscribe(cb))
    }

    /// Remove one subscription. Unknown ids are a silent no-op, but the
    /// state itself must exist.
    pub fn unsubscribe(&self, name: &str, id: &str) -> StateResult<()> {
        match self.try_get(name)? {
            Some(cell) => {
                cell.subs.unsubscribe(id);
                Ok(())
            }
            None => Err(StateError::UnknownState {
                name: name.to_string(),
            }),
        }
    }

    /// All registered state names, in insertion order of first creation.
    pub fn state_names(&self) -> Vec<String> {
        self.states.lock().unwrap().keys().cloned().collect()
    }

    /// Drop the named state: data root and all subscriptions. A later
    /// `get_state` for the same name starts fresh with no memory of either.
    /// Returns whether the state existed.
    pub fn delete_state(&self, name: &str) -> StateResult<bool> {
        validate_name(name)?;
        // shift_remove keeps insertion order for the remaining names
        let removed = self.states.lock().unwrap().shift_remove(name);
        match removed {
            Some(cell) => {
                // Discard the subscriptions with the state: views that
                // outlive the cell keep its data alive but notify nobody.
                cell.subs.clear();
                metrics::record_state_deleted();
                debug!("state '{name}' deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ----- cell lookup -----

    pub(crate) fn get_or_create(&self, name: &str) -> StateResult<Arc<StateCell>> {
        validate_name(name)?;
        let mut g = self.states.lock().unwrap();
        if let Some(cell) = g.get(name) {
            return Ok(cell.clone());
        }
        let cell = StateCell::new(name);
        g.insert(name.to_string(), cell.clone());
        metrics::record_state_created();
        debug!("state '{name}' created");
        Ok(cell)
    }

    pub(crate) fn try_get(&self, name: &str) -> StateResult<Option<Arc<StateCell>>> {
        validate_name(name)?;
        Ok(self.states.lock().unwrap().get(name).cloned())
    }

    pub(crate) fn states_guard(
        &self,
    ) -> std::sync::MutexGuard<'_, IndexMap<String, Arc<StateCell>>> {
        self.states.lock().unwrap()
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> StateResult<()> {
    if name.trim().is_empty() {
        return Err(StateError::InvalidName);
    }
    Ok(())
}
