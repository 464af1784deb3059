//! manager/replace — bulk export and wholesale replacement.
//!
//! `export_states` and `replace_all` are designed as a pair: the export is a
//! mapping of every state name to a copy of its content, and feeding that
//! mapping (possibly edited) back into `replace_all` swaps the named roots
//! wholesale, notifying each state's subscribers once with the reserved
//! writer sentinel.
//!
//! Atomicity: with `atomic_replace` (default) every payload name is
//! validated against the registry under one lock before any state is
//! swapped, so one unknown name fails the whole call with every state
//! untouched. The non-atomic mode applies entries in payload order and
//! stops at the first unknown name, leaving earlier entries applied.

use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value};

use crate::error::{StateError, StateResult};
use crate::metrics;
use crate::snapshot::{deep_copy, Snapshot};

use super::core::{StateCell, StateManager};
use super::{WRITER_REPLACE_ALL, WRITER_REPLACE_ONE};

impl StateManager {
    /// Mapping of every registered state name to an independent copy of its
    /// current content, in registry order. Feed it (possibly edited) back
    /// into [`replace_all`](StateManager::replace_all).
    pub fn export_states(&self) -> Value {
        let g = self.states_guard();
        let mut out = Map::new();
        for (name, cell) in g.iter() {
            out.insert(name.clone(), deep_copy(&cell.data.lock().unwrap()));
        }
        Value::Object(out)
    }

    /// Replace the content of every state named in `states` wholesale.
    /// Names absent from the payload are left untouched; names absent from
    /// the registry fail with [`StateError::UnknownState`]. Subscribers of
    /// each replaced state are notified once, with writer
    /// [`WRITER_REPLACE_ALL`].
    pub fn replace_all(&self, states: Value) -> StateResult<()> {
        let entries = match states {
            Value::Object(map) => map,
            Value::Null => {
                return Err(StateError::InvalidArgument {
                    reason: "payload is null",
                })
            }
            _ => {
                return Err(StateError::InvalidArgument {
                    reason: "payload must map state names to new content",
                })
            }
        };

        if self.config().atomic_replace {
            // Validate the whole batch under the registry lock before any
            // swap; entries are applied only once every name resolved.
            let work: Vec<(Arc<StateCell>, Value)> = {
                let g = self.states_guard();
                let mut work = Vec::with_capacity(entries.len());
                for (name, value) in entries {
                    match g.get(&name) {
                        Some(cell) => work.push((cell.clone(), value)),
                        None => return Err(StateError::UnknownState { name }),
                    }
                }
                work
            };
            for (cell, value) in work {
                self.swap_and_notify(&cell, value, WRITER_REPLACE_ALL);
            }
        } else {
            for (name, value) in entries {
                let cell = match self.try_get(&name)? {
                    Some(cell) => cell,
                    None => return Err(StateError::UnknownState { name }),
                };
                self.swap_and_notify(&cell, value, WRITER_REPLACE_ALL);
            }
        }

        metrics::record_replace_all();
        Ok(())
    }

    /// Replace one state's content wholesale, creating the state if absent.
    /// Subscribers are notified once, with writer [`WRITER_REPLACE_ONE`].
    pub fn replace_one(&self, name: &str, value: Value) -> StateResult<()> {
        let cell = self.get_or_create(name)?;
        self.swap_and_notify(&cell, value, WRITER_REPLACE_ONE);
        metrics::record_replace_one();
        Ok(())
    }

    fn swap_and_notify(&self, cell: &StateCell, new_root: Value, writer: &str) {
        let (prev, next) = {
            let mut data = cell.data.lock().unwrap();
            let prev = Snapshot::capture(&data);
            *data = new_root;
            (prev, Snapshot::capture(&data))
        };
        debug!("state '{}' replaced by '{writer}'", cell.name);
        cell.subs.notify_all(&prev, &next, writer);
    }
}
