//! view — the capability-checked handle over a named state's data.
//!
//! Split by submodule:
//! - path.rs  — segments and tree resolution (key/index walking)
//! - write.rs — the gated write path (set/push/remove/set_len)
//!
//! A [`StateView`] is an explicit wrapper holding a reference to the owning
//! state cell, a path into its tree and an optional writer identity. Every
//! accessor re-resolves the addressed value against the live tree and
//! decides container-vs-scalar explicitly; every mutation runs the full
//! capture-previous, apply, capture-next, notify protocol. No runtime trap
//! machinery, no global lookup.

pub mod path;
mod write;

use std::sync::Arc;

use serde_json::Value;

use crate::manager::StateCell;
use crate::snapshot::{deep_copy, Snapshot};
use path::{path_display, resolve, Segment};

pub use path::is_container;

/// Live, navigable handle to (a subtree of) one named state.
///
/// Cheap to create; navigation never touches the tree. A view built over a
/// path that does not exist yet is legal: reads yield `None` until a writer
/// fills the path in.
#[derive(Clone)]
pub struct StateView {
    cell: Arc<StateCell>,
    path: Vec<Segment>,
    writer: Option<String>,
    gate_deletes: bool,
}

impl StateView {
    pub(crate) fn root(cell: Arc<StateCell>, writer: Option<&str>, gate_deletes: bool) -> Self {
        Self {
            cell,
            path: Vec::new(),
            writer: writer.map(str::to_string),
            gate_deletes,
        }
    }

    /// Child view addressing `name` inside this mapping.
    pub fn key(&self, name: &str) -> StateView {
        let mut path = self.path.clone();
        path.push(Segment::Key(name.to_string()));
        StateView { path, ..self.clone() }
    }

    /// Child view addressing element `i` of this sequence.
    pub fn index(&self, i: usize) -> StateView {
        let mut path = self.path.clone();
        path.push(Segment::Index(i));
        StateView { path, ..self.clone() }
    }

    /// The addressed path, rendered for diagnostics.
    pub fn path(&self) -> String {
        path_display(&self.path)
    }

    /// Writer identity this view was opened with, if any.
    pub fn writer(&self) -> Option<&str> {
        self.writer.as_deref()
    }

    /// True when the view carries a writer identity.
    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    /// Independent copy of the addressed value; `None` when the path does
    /// not resolve. Scalar leaves come back as plain values, containers as
    /// full subtrees.
    pub fn get(&self) -> Option<Value> {
        let data = self.cell.data.lock().unwrap();
        resolve(&data, &self.path).map(deep_copy)
    }

    /// Whether the addressed path currently resolves.
    pub fn exists(&self) -> bool {
        let data = self.cell.data.lock().unwrap();
        resolve(&data, &self.path).is_some()
    }

    /// Whether the addressed value is a container (mapping or sequence)
    /// rather than a scalar leaf. `false` when the path does not resolve.
    pub fn is_container(&self) -> bool {
        let data = self.cell.data.lock().unwrap();
        resolve(&data, &self.path).map(is_container).unwrap_or(false)
    }

    /// Length of the addressed sequence as a plain number — a bookkeeping
    /// read, never a snapshot/notify cycle. `None` when the path does not
    /// resolve to a sequence.
    pub fn len(&self) -> Option<usize> {
        let data = self.cell.data.lock().unwrap();
        match resolve(&data, &self.path) {
            Some(Value::Array(arr)) => Some(arr.len()),
            _ => None,
        }
    }

    /// Frozen snapshot of the ENTIRE state root this view belongs to (the
    /// same shape subscribers receive).
    pub fn snapshot(&self) -> Snapshot {
        let data = self.cell.data.lock().unwrap();
        Snapshot::capture(&data)
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.path
    }

    pub(crate) fn cell(&self) -> &Arc<StateCell> {
        &self.cell
    }

    pub(crate) fn gate_deletes(&self) -> bool {
        self.gate_deletes
    }
}
