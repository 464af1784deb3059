//! view/write — the gated write path.
//!
//! Every semantic mutation follows one protocol: check the writer gate,
//! capture a previous snapshot of the ENTIRE state root, apply the change to
//! the live tree, capture a next snapshot, fan out `(prev, next, writer)` in
//! registration order. The capture-apply-capture sequence runs under the
//! state's data lock; fan-out runs after the lock is released so callbacks
//! may re-enter the state for reads.
//!
//! The exceptions:
//! - `set_len` is a structural bookkeeping write: no gate, no snapshots, no
//!   fan-out.
//! - removes of a missing member keep the full protocol but change nothing:
//!   subscribers see prev == next.

use log::trace;
use serde_json::Value;

use crate::error::{StateError, StateResult};
use crate::metrics;
use crate::snapshot::Snapshot;

use super::path::{resolve_mut, Segment};
use super::StateView;

impl StateView {
    /// Assign `value` to member `key` of the addressed mapping.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> StateResult<()> {
        let writer = self.require_writer()?.to_string();
        let value = value.into();
        let (prev, next) = {
            let mut data = self.cell().data.lock().unwrap();
            let prev = Snapshot::capture(&data);
            let map = match resolve_mut(&mut data, self.segments()) {
                Some(Value::Object(map)) => map,
                _ => return Err(self.no_member(Segment::Key(key.to_string()))),
            };
            map.insert(key.to_string(), value);
            (prev, Snapshot::capture(&data))
        };
        metrics::record_mutation();
        trace!("set {}.{key} by '{writer}'", self.path());
        self.cell().subs.notify_all(&prev, &next, &writer);
        Ok(())
    }

    /// Assign `value` to element `i` of the addressed sequence. Writing past
    /// the end pads the gap with nulls, like a sparse write.
    pub fn set_index(&self, i: usize, value: impl Into<Value>) -> StateResult<()> {
        let writer = self.require_writer()?.to_string();
        let value = value.into();
        let (prev, next) = {
            let mut data = self.cell().data.lock().unwrap();
            let prev = Snapshot::capture(&data);
            let arr = match resolve_mut(&mut data, self.segments()) {
                Some(Value::Array(arr)) => arr,
                _ => return Err(self.no_member(Segment::Index(i))),
            };
            if i >= arr.len() {
                arr.resize(i + 1, Value::Null);
            }
            arr[i] = value;
            (prev, Snapshot::capture(&data))
        };
        metrics::record_mutation();
        trace!("set {}[{i}] by '{writer}'", self.path());
        self.cell().subs.notify_all(&prev, &next, &writer);
        Ok(())
    }

    /// Append `value` to the addressed sequence. One fan-out; the length
    /// update is part of the same structural change.
    pub fn push(&self, value: impl Into<Value>) -> StateResult<()> {
        let writer = self.require_writer()?.to_string();
        let value = value.into();
        let (prev, next) = {
            let mut data = self.cell().data.lock().unwrap();
            let prev = Snapshot::capture(&data);
            let arr = match resolve_mut(&mut data, self.segments()) {
                Some(Value::Array(arr)) => arr,
                _ => {
                    return Err(StateError::PathNotFound { path: self.path() });
                }
            };
            arr.push(value);
            (prev, Snapshot::capture(&data))
        };
        metrics::record_mutation();
        trace!("push {} by '{writer}'", self.path());
        self.cell().subs.notify_all(&prev, &next, &writer);
        Ok(())
    }

    /// Resize the addressed sequence in place (truncate, or pad with nulls).
    ///
    /// Length control is a bookkeeping write, not a semantic mutation: it
    /// bypasses the writer gate and produces no snapshot/fan-out cycle.
    pub fn set_len(&self, n: usize) -> StateResult<()> {
        let mut data = self.cell().data.lock().unwrap();
        let arr = match resolve_mut(&mut data, self.segments()) {
            Some(Value::Array(arr)) => arr,
            _ => return Err(StateError::PathNotFound { path: self.path() }),
        };
        arr.resize(n, Value::Null);
        Ok(())
    }

    /// Remove member `key` from the addressed mapping. Removing a missing
    /// member changes nothing but still runs the snapshot/fan-out protocol
    /// (prev == next).
    pub fn remove(&self, key: &str) -> StateResult<()> {
        let writer = self.delete_writer()?;
        let (prev, next) = {
            let mut data = self.cell().data.lock().unwrap();
            let prev = Snapshot::capture(&data);
            let map = match resolve_mut(&mut data, self.segments()) {
                Some(Value::Object(map)) => map,
                _ => return Err(self.no_member(Segment::Key(key.to_string()))),
            };
            // shift_remove keeps the enumeration order of remaining keys
            map.shift_remove(key);
            (prev, Snapshot::capture(&data))
        };
        metrics::record_delete();
        trace!("remove {}.{key} by '{writer}'", self.path());
        self.cell().subs.notify_all(&prev, &next, &writer);
        Ok(())
    }

    /// Remove element `i` from the addressed sequence; out-of-range is the
    /// missing-member no-op (protocol still runs).
    pub fn remove_index(&self, i: usize) -> StateResult<()> {
        let writer = self.delete_writer()?;
        let (prev, next) = {
            let mut data = self.cell().data.lock().unwrap();
            let prev = Snapshot::capture(&data);
            let arr = match resolve_mut(&mut data, self.segments()) {
                Some(Value::Array(arr)) => arr,
                _ => return Err(self.no_member(Segment::Index(i))),
            };
            if i < arr.len() {
                arr.remove(i);
            }
            (prev, Snapshot::capture(&data))
        };
        metrics::record_delete();
        trace!("remove {}[{i}] by '{writer}'", self.path());
        self.cell().subs.notify_all(&prev, &next, &writer);
        Ok(())
    }

    // ----- gate helpers -----

    fn require_writer(&self) -> StateResult<&str> {
        match self.writer() {
            Some(w) => Ok(w),
            None => {
                metrics::record_write_denied();
                Err(StateError::WriteNotPermitted)
            }
        }
    }

    /// Deletes are gated like sets by default; with the gate off (legacy
    /// mode) a writer-less delete goes through and reports an empty writer.
    fn delete_writer(&self) -> StateResult<String> {
        match self.writer() {
            Some(w) => Ok(w.to_string()),
            None if self.gate_deletes() => {
                metrics::record_write_denied();
                Err(StateError::WriteNotPermitted)
            }
            None => Ok(String::new()),
        }
    }

    fn no_member(&self, seg: Segment) -> StateError {
        let mut path = self.path();
        path.push_str(&seg.to_string());
        StateError::PathNotFound { path }
    }
}
