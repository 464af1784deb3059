//! Env parsing mutates process-wide environment: keep it in one test.

use statewire::StateConfig;

#[test]
fn defaults_env_overrides_and_builders() {
    let cfg = StateConfig::default();
    assert!(cfg.gate_deletes);
    assert!(cfg.atomic_replace);

    std::env::set_var("SW_GATE_DELETES", "0");
    std::env::set_var("SW_ATOMIC_REPLACE", "off");
    let cfg = StateConfig::from_env();
    assert!(!cfg.gate_deletes);
    assert!(!cfg.atomic_replace);

    std::env::set_var("SW_GATE_DELETES", "yes");
    std::env::set_var("SW_ATOMIC_REPLACE", "1");
    let cfg = StateConfig::from_env();
    assert!(cfg.gate_deletes);
    assert!(cfg.atomic_replace);

    std::env::remove_var("SW_GATE_DELETES");
    std::env::remove_var("SW_ATOMIC_REPLACE");

    let cfg = StateConfig::default()
        .with_gate_deletes(false)
        .with_atomic_replace(false);
    assert!(!cfg.gate_deletes);
    assert!(!cfg.atomic_replace);

    let mgr = statewire::ManagerBuilder::from_default()
        .gate_deletes(false)
        .build();
    assert!(!mgr.config().gate_deletes);
    assert!(mgr.config().atomic_replace);

    let shown = StateConfig::default().to_string();
    assert!(shown.contains("gate_deletes: true"));
}
