//! Walkthrough: a "loader" state with three subscribers, nested mutations,
//! unsubscribe, and a registry dump.
//!
//! Run with RUST_LOG=debug to see state lifecycle logging.

use anyhow::Result;
use serde_json::json;
use statewire::{callback, StateManager};

fn main() -> Result<()> {
    env_logger::init();

    let mgr = StateManager::new();

    let loader = mgr.get_state("loader", Some("demo"))?;

    let sub1 = mgr.subscribe(
        "loader",
        callback(|prev, next, writer| {
            println!("sub1: {prev} -> {next} (writer: {writer})");
        }),
    )?;
    let _sub2 = mgr.subscribe(
        "loader",
        callback(|_prev, _next, _writer| {
            println!("sub2");
        }),
    )?;
    let _sub3 = mgr.subscribe(
        "loader",
        callback(|_prev, _next, _writer| {
            println!("sub3");
        }),
    )?;

    loader.set("loaders", json!([]))?;
    loader.key("loaders").push(1)?;
    loader.set("b", json!({}))?;
    loader.key("b").set("c", json!({}))?;
    loader.key("b").key("c").set("r", 45)?;
    loader.key("b").key("c").set("arr", json!([34]))?;

    println!("unsubscribing sub1");
    mgr.unsubscribe("loader", &sub1)?;

    loader.key("b").key("c").key("arr").push(35)?;

    println!("available states: {:?}", mgr.state_names());
    println!("export: {}", mgr.export_states());
    println!("metrics: {:?}", statewire::metrics::snapshot());

    Ok(())
}
