use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde_json::json;
use statewire::{callback, StateError, StateManager};

#[test]
fn delete_removes_data_and_subscriptions() -> Result<()> {
    let mgr = StateManager::new();
    let state = mgr.get_state("test", Some("testWriter"))?;

    let count = Arc::new(Mutex::new(0usize));
    let sink = count.clone();
    mgr.subscribe(
        "test",
        callback(move |_p, _n, _w| {
            *sink.lock().unwrap() += 1;
        }),
    )?;

    state.set("numberField", 10)?;
    assert_eq!(*count.lock().unwrap(), 1);

    assert!(mgr.delete_state("test")?);

    // Fresh state: empty content, no memory of prior subscribers.
    let state = mgr.get_state("test", Some("testWriter"))?;
    assert_eq!(state.key("numberField").get(), None);

    state.set("anotherNumberField", 20)?;
    assert_eq!(
        *count.lock().unwrap(),
        1,
        "subscriptions of the deleted state must not fire on the recreated one"
    );
    Ok(())
}

#[test]
fn delete_unknown_state_reports_false() -> Result<()> {
    let mgr = StateManager::new();
    assert!(!mgr.delete_state("never-created")?);
    Ok(())
}

#[test]
fn delete_rejects_invalid_name() {
    let mgr = StateManager::new();
    assert_eq!(mgr.delete_state("   "), Err(StateError::InvalidName));
}

#[test]
fn stale_views_keep_the_orphaned_data_but_notify_nobody() -> Result<()> {
    let mgr = StateManager::new();
    let stale = mgr.get_state("test", Some("w"))?;
    stale.set("old", 1)?;

    let count = Arc::new(Mutex::new(0usize));
    let sink = count.clone();
    mgr.subscribe(
        "test",
        callback(move |_p, _n, _w| {
            *sink.lock().unwrap() += 1;
        }),
    )?;

    mgr.delete_state("test")?;

    // The stale view still works against the orphaned tree, but its
    // subscriptions were discarded with the state.
    stale.set("more", 2)?;
    assert_eq!(stale.get(), Some(json!({"old": 1, "more": 2})));
    assert_eq!(*count.lock().unwrap(), 0);

    // A fresh lookup is a different, empty state.
    let fresh = mgr.get_state("test", None)?;
    assert_eq!(fresh.get(), Some(json!({})));
    Ok(())
}

#[test]
fn delete_keeps_remaining_names_in_order() -> Result<()> {
    let mgr = StateManager::new();
    mgr.get_state("c", None)?;
    mgr.get_state("a", None)?;
    mgr.get_state("b", None)?;

    mgr.delete_state("a")?;

    assert_eq!(mgr.state_names(), vec!["c".to_string(), "b".to_string()]);
    Ok(())
}
