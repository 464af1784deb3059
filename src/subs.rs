//! In-process subscriptions (live change events) for a named state.
//!
//! Scope:
//! - Local (in-process) pub/sub: the writer fans out after every applied
//!   mutation, with the full previous and next snapshots plus the writer
//!   identity that made the change.
//! - Fan-out order is registration order; the same callback may be
//!   registered any number of times, each registration a distinct
//!   subscription.
//! - Unsubscribing an unknown id is a silent no-op.
//!
//! Notes:
//! - Callbacks are executed synchronously on the mutating caller's thread,
//!   right after the change is applied. Keep callbacks fast and
//!   non-blocking; if you need async work, spawn a thread/task.
//! - Callback panics are not caught here: they propagate to the caller of
//!   the mutation that triggered notification. Deliberate simplicity
//!   trade-off, not an isolation guarantee.
//! - The registry is owned by one named state and dies with it.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;

use crate::metrics;
use crate::snapshot::Snapshot;

/// Subscriber callback: `(previous, next, writer)`.
pub type ChangeCallback = Arc<dyn Fn(&Snapshot, &Snapshot, &str) + Send + Sync + 'static>;

/// Opaque subscription identifier, unique within its state.
pub type SubscriptionId = String;

#[derive(Default)]
struct SubInner {
    seq: u64,
    // id -> callback, iteration order == registration order
    subs: IndexMap<SubscriptionId, ChangeCallback>,
}

/// Subscription registry (one per named state).
pub struct SubRegistry {
    inner: Mutex<SubInner>,
}

impl SubRegistry {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(SubInner::default()),
        }
    }

    /// Register a callback; returns its id. No deduplication.
    pub fn subscribe(&self, cb: ChangeCallback) -> SubscriptionId {
        let mut g = self.inner.lock().unwrap();
        let id = next_sub_id(g.seq);
        g.seq = g.seq.wrapping_add(1);
        g.subs.insert(id.clone(), cb);
        metrics::record_subscribe();
        id
    }

    /// Remove a subscription by id. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: &str) {
        let mut g = self.inner.lock().unwrap();
        if g.subs.shift_remove(id).is_some() {
            metrics::record_unsubscribe();
        }
    }

    /// Invoke every registered callback, in registration order.
    pub fn notify_all(&self, prev: &Snapshot, next: &Snapshot, writer: &str) {
        let callbacks: Vec<ChangeCallback> = {
            let g = self.inner.lock().unwrap();
            g.subs.values().cloned().collect()
        };
        // Execute outside the lock: callbacks may re-enter the state.
        metrics::record_notifications(callbacks.len() as u64);
        for cb in callbacks {
            cb(prev, next, writer);
        }
    }

    /// Drop every subscription at once (state deletion).
    pub(crate) fn clear(&self) {
        let mut g = self.inner.lock().unwrap();
        let n = g.subs.len() as u64;
        g.subs.clear();
        metrics::record_unsubscribes(n);
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collision-resistant id: millisecond timestamp, per-registry sequence,
/// random suffix.
fn next_sub_id(seq: u64) -> SubscriptionId {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let suffix: u64 = rand::random();
    format!("{ts:x}-{seq:x}-{suffix:016x}")
}

/// Helper for building callbacks without spelling the `Arc` out.
pub fn callback<F>(f: F) -> ChangeCallback
where
    F: Fn(&Snapshot, &Snapshot, &str) + Send + Sync + 'static,
{
    Arc::new(f)
}
