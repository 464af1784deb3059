//! Centralized configuration and builder for statewire.
//!
//! Goals:
//! - Single place to collect behavior toggles instead of scattering env
//!   lookups.
//! - Both toggles default to the strict semantics; the legacy behavior
//!   survives behind an explicit opt-out.
//! - Provide a simple ManagerBuilder that produces a configured
//!   StateManager.

use std::fmt;

/// Behavior toggles for a [`StateManager`](crate::StateManager).
#[derive(Clone, Debug)]
pub struct StateConfig {
    /// Whether deletes require a writer identity, like sets do.
    /// `false` restores the legacy ungated delete (the delete then reports
    /// an empty writer to subscribers).
    /// Env: SW_GATE_DELETES (default true; "0|false|off|no" => false)
    pub gate_deletes: bool,

    /// Whether `replace_all` validates every target name before swapping any
    /// state (all-or-nothing). `false` applies entries one by one and stops
    /// at the first unknown name, leaving earlier entries applied.
    /// Env: SW_ATOMIC_REPLACE (default true; "0|false|off|no" => false)
    pub atomic_replace: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            gate_deletes: true,
            atomic_replace: true,
        }
    }
}

impl StateConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SW_GATE_DELETES") {
            let s = v.trim().to_ascii_lowercase();
            cfg.gate_deletes = !(s == "0" || s == "false" || s == "off" || s == "no");
        }

        if let Ok(v) = std::env::var("SW_ATOMIC_REPLACE") {
            let s = v.trim().to_ascii_lowercase();
            cfg.atomic_replace = !(s == "0" || s == "false" || s == "off" || s == "no");
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_gate_deletes(mut self, on: bool) -> Self {
        self.gate_deletes = on;
        self
    }

    pub fn with_atomic_replace(mut self, on: bool) -> Self {
        self.atomic_replace = on;
        self
    }
}

impl fmt::Display for StateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StateConfig {{ gate_deletes: {}, atomic_replace: {} }}",
            self.gate_deletes, self.atomic_replace,
        )
    }
}

/// Lightweight builder that produces a configured
/// [`StateManager`](crate::StateManager).
#[derive(Clone, Debug)]
pub struct ManagerBuilder {
    cfg: StateConfig,
}

impl Default for ManagerBuilder {
    fn default() -> Self {
        // Start from env to make deployment toggles effective, then allow
        // overrides.
        Self {
            cfg: StateConfig::from_env(),
        }
    }
}

impl ManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from clean defaults (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: StateConfig::default(),
        }
    }

    pub fn gate_deletes(mut self, on: bool) -> Self {
        self.cfg.gate_deletes = on;
        self
    }

    pub fn atomic_replace(mut self, on: bool) -> Self {
        self.cfg.atomic_replace = on;
        self
    }

    /// Finish the builder and obtain the manager.
    pub fn build(self) -> crate::StateManager {
        crate::StateManager::with_config(self.cfg)
    }
}
