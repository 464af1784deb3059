//! statewire — process-local, in-memory reactive state container.
//!
//! Callers obtain a named, deeply-mutable state tree through a
//! capability-checked [`StateView`], mutate it with ordinary set/remove
//! calls, and subscribers are notified synchronously with frozen previous
//! and next snapshots of the whole tree plus the identity of whoever made
//! the change.
//!
//! ```
//! use statewire::{callback, StateManager};
//!
//! let mgr = StateManager::new();
//! mgr.subscribe("session", callback(|prev, next, writer| {
//!     println!("{prev} -> {next} by {writer}");
//! })).unwrap();
//!
//! let session = mgr.get_state("session", Some("login-flow")).unwrap();
//! session.set("user", "alice").unwrap();
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod metrics;
pub mod snapshot;
pub mod subs;

// View layer (src/view/{mod,path,write}.rs)
pub mod view;

// Named-state registry (src/manager/{mod,core,replace}.rs)
pub mod manager;

// Convenience re-exports
pub use config::{ManagerBuilder, StateConfig};
pub use error::{StateError, StateResult};
pub use manager::{StateManager, WRITER_REPLACE_ALL, WRITER_REPLACE_ONE};
pub use snapshot::Snapshot;
pub use subs::{callback, ChangeCallback, SubscriptionId};
pub use view::StateView;
