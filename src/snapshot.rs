//! Snapshot engine: frozen, fully independent copies of a state tree.
//!
//! Two properties back the subscriber contract:
//! - independence: `capture` copies the tree node by node, so no container in
//!   a snapshot is reachable from the live root (a later mutation can never
//!   bleed into an already-issued snapshot);
//! - immutability: [`Snapshot`] hands out shared references only. There is no
//!   `&mut` path into the tree, so "mutating a snapshot" does not compile.
//!
//! Callbacks run synchronously with direct references to these objects;
//! without both properties a subscriber could alias still-live state or
//! corrupt the before/after trail seen by later subscribers.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::metrics;

/// A frozen copy of one state root at one instant.
///
/// Cheap to clone (shared tree); compared and serialized by content.
#[derive(Clone, Debug)]
pub struct Snapshot {
    tree: Arc<Value>,
}

impl Snapshot {
    /// Capture the current content of `live` as a frozen snapshot.
    pub(crate) fn capture(live: &Value) -> Snapshot {
        metrics::record_snapshot_captured();
        Snapshot {
            tree: Arc::new(deep_copy(live)),
        }
    }

    /// The snapshot content. Read-only by construction.
    pub fn value(&self) -> &Value {
        &self.tree
    }

    /// An owned, independent copy of the content (for callers that want to
    /// feed a snapshot back into `replace_one`/`replace_all`).
    pub fn to_value(&self) -> Value {
        deep_copy(&self.tree)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl Eq for Snapshot {}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Value's Display is compact JSON.
        write!(f, "{}", self.tree)
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tree.serialize(serializer)
    }
}

/// Node-by-node copy of a value tree.
///
/// Invariant: no container in the result shares identity with a container in
/// the input. Scalars are copied by value; sequences element by element;
/// mappings entry by entry in their stored (insertion) order.
pub(crate) fn deep_copy(v: &Value) -> Value {
    match v {
        Value::Array(arr) => Value::Array(arr.iter().map(deep_copy).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, val)| (k.clone(), deep_copy(val)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}
