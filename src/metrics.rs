//! Lightweight global metrics for statewire.
//!
//! Thread-safe atomic counters for the subsystems:
//! - state registry (create/delete/replace)
//! - write path (mutations, deletes, denied writes)
//! - snapshot engine
//! - subscriptions (registrations, removals, deliveries)

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// ----- State registry -----
static STATES_CREATED: AtomicU64 = AtomicU64::new(0);
static STATES_DELETED: AtomicU64 = AtomicU64::new(0);
static REPLACE_ONE_CALLS: AtomicU64 = AtomicU64::new(0);
static REPLACE_ALL_CALLS: AtomicU64 = AtomicU64::new(0);

// ----- Write path -----
static MUTATIONS_TOTAL: AtomicU64 = AtomicU64::new(0);
static DELETES_TOTAL: AtomicU64 = AtomicU64::new(0);
static WRITES_DENIED: AtomicU64 = AtomicU64::new(0);

// ----- Snapshot engine -----
static SNAPSHOTS_CAPTURED: AtomicU64 = AtomicU64::new(0);

// ----- Subscriptions -----
static SUBSCRIBES_TOTAL: AtomicU64 = AtomicU64::new(0);
static UNSUBSCRIBES_TOTAL: AtomicU64 = AtomicU64::new(0);
static NOTIFICATIONS_DELIVERED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    // State registry
    pub states_created: u64,
    pub states_deleted: u64,
    pub replace_one_calls: u64,
    pub replace_all_calls: u64,

    // Write path
    pub mutations_total: u64,
    pub deletes_total: u64,
    pub writes_denied: u64,

    // Snapshot engine
    pub snapshots_captured: u64,

    // Subscriptions
    pub subscribes_total: u64,
    pub unsubscribes_total: u64,
    pub notifications_delivered: u64,
}

impl MetricsSnapshot {
    /// Average fan-out per notifying operation (mutations, deletes and
    /// replaces each produce one fan-out).
    pub fn avg_fanout(&self) -> f64 {
        let ops = self.mutations_total
            + self.deletes_total
            + self.replace_one_calls
            + self.replace_all_calls;
        if ops == 0 {
            0.0
        } else {
            self.notifications_delivered as f64 / ops as f64
        }
    }

    /// Live subscriptions implied by the counters.
    pub fn subscriptions_active(&self) -> u64 {
        self.subscribes_total.saturating_sub(self.unsubscribes_total)
    }
}

// ----- Recorders (state registry) -----
pub fn record_state_created() {
    STATES_CREATED.fetch_add(1, Ordering::Relaxed);
}
pub fn record_state_deleted() {
    STATES_DELETED.fetch_add(1, Ordering::Relaxed);
}
pub fn record_replace_one() {
    REPLACE_ONE_CALLS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_replace_all() {
    REPLACE_ALL_CALLS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (write path) -----
pub fn record_mutation() {
    MUTATIONS_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_delete() {
    DELETES_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_write_denied() {
    WRITES_DENIED.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (snapshot engine) -----
pub fn record_snapshot_captured() {
    SNAPSHOTS_CAPTURED.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (subscriptions) -----
pub fn record_subscribe() {
    SUBSCRIBES_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_unsubscribe() {
    UNSUBSCRIBES_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_unsubscribes(n: u64) {
    UNSUBSCRIBES_TOTAL.fetch_add(n, Ordering::Relaxed);
}
pub fn record_notifications(delivered: u64) {
    NOTIFICATIONS_DELIVERED.fetch_add(delivered, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        states_created: STATES_CREATED.load(Ordering::Relaxed),
        states_deleted: STATES_DELETED.load(Ordering::Relaxed),
        replace_one_calls: REPLACE_ONE_CALLS.load(Ordering::Relaxed),
        replace_all_calls: REPLACE_ALL_CALLS.load(Ordering::Relaxed),

        mutations_total: MUTATIONS_TOTAL.load(Ordering::Relaxed),
        deletes_total: DELETES_TOTAL.load(Ordering::Relaxed),
        writes_denied: WRITES_DENIED.load(Ordering::Relaxed),

        snapshots_captured: SNAPSHOTS_CAPTURED.load(Ordering::Relaxed),

        subscribes_total: SUBSCRIBES_TOTAL.load(Ordering::Relaxed),
        unsubscribes_total: UNSUBSCRIBES_TOTAL.load(Ordering::Relaxed),
        notifications_delivered: NOTIFICATIONS_DELIVERED.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    STATES_CREATED.store(0, Ordering::Relaxed);
    STATES_DELETED.store(0, Ordering::Relaxed);
    REPLACE_ONE_CALLS.store(0, Ordering::Relaxed);
    REPLACE_ALL_CALLS.store(0, Ordering::Relaxed);

    MUTATIONS_TOTAL.store(0, Ordering::Relaxed);
    DELETES_TOTAL.store(0, Ordering::Relaxed);
    WRITES_DENIED.store(0, Ordering::Relaxed);

    SNAPSHOTS_CAPTURED.store(0, Ordering::Relaxed);

    SUBSCRIBES_TOTAL.store(0, Ordering::Relaxed);
    UNSUBSCRIBES_TOTAL.store(0, Ordering::Relaxed);
    NOTIFICATIONS_DELIVERED.store(0, Ordering::Relaxed);
}
