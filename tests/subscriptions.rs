use std::sync::{Arc, Mutex};

use anyhow::Result;
use statewire::{callback, StateError, StateManager};

#[test]
fn five_subscriptions_fire_once_each_in_registration_order() -> Result<()> {
    let mgr = StateManager::new();
    let state = mgr.get_state("s", Some("w"))?;

    let order: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    for i in 0..5 {
        let sink = order.clone();
        mgr.subscribe(
            "s",
            callback(move |_prev, _next, _writer| {
                sink.lock().unwrap().push(i);
            }),
        )?;
    }

    state.set("numberField", 10)?;

    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn unsubscribe_is_effective_immediately() -> Result<()> {
    let mgr = StateManager::new();
    let state = mgr.get_state("test", Some("testWriter"))?;

    let count = Arc::new(Mutex::new(0usize));
    let sink = count.clone();
    let id = mgr.subscribe(
        "test",
        callback(move |_p, _n, _w| {
            *sink.lock().unwrap() += 1;
        }),
    )?;

    state.set("numberField", 10)?;
    assert_eq!(*count.lock().unwrap(), 1);

    mgr.unsubscribe("test", &id)?;

    state.set("numberField", 11)?;
    assert_eq!(*count.lock().unwrap(), 1, "removed subscription must not fire");
    Ok(())
}

#[test]
fn same_callback_registered_twice_fires_twice() -> Result<()> {
    let mgr = StateManager::new();
    let state = mgr.get_state("test", Some("w"))?;

    let count = Arc::new(Mutex::new(0usize));
    let sink = count.clone();
    let cb = callback(move |_p, _n, _w| {
        *sink.lock().unwrap() += 1;
    });

    let id1 = mgr.subscribe("test", cb.clone())?;
    let id2 = mgr.subscribe("test", cb)?;
    assert_ne!(id1, id2, "each registration is a distinct subscription");

    state.set("x", 1)?;
    assert_eq!(*count.lock().unwrap(), 2);
    Ok(())
}

#[test]
fn unsubscribe_unknown_id_is_silent_noop() -> Result<()> {
    let mgr = StateManager::new();
    mgr.get_state("test", Some("w"))?;
    mgr.unsubscribe("test", "not-a-real-id")?;
    Ok(())
}

#[test]
fn unsubscribe_on_missing_state_fails() {
    let mgr = StateManager::new();
    assert_eq!(
        mgr.unsubscribe("ghost", "some-id"),
        Err(StateError::UnknownState {
            name: "ghost".to_string()
        })
    );
}

#[test]
fn subscribe_creates_the_state() -> Result<()> {
    let mgr = StateManager::new();
    mgr.subscribe("fresh", callback(|_p, _n, _w| {}))?;
    assert_eq!(mgr.state_names(), vec!["fresh".to_string()]);
    Ok(())
}

#[test]
#[should_panic(expected = "subscriber exploded")]
fn subscriber_panic_propagates_to_the_mutator() {
    let mgr = StateManager::new();
    let state = mgr.get_state("test", Some("w")).unwrap();
    mgr.subscribe(
        "test",
        callback(|_p, _n, _w| panic!("subscriber exploded")),
    )
    .unwrap();

    // Not caught by the registry: the mutating call itself unwinds.
    let _ = state.set("x", 1);
}
