//! Error types for state container operations.
//!
//! One matchable taxonomy, raised synchronously to the immediate caller.
//! There is no deferred error channel: a failed mutation leaves the live
//! data untouched, and the caller decides whether to recover.

use thiserror::Error;

/// All validation and permission errors for state operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// State name failed validation (empty or all-whitespace).
    #[error("invalid state name: must be a non-empty string")]
    InvalidName,

    /// Mutating call through a view opened without a writer identity.
    /// Open the state with `get_state(name, Some(writer))` to write.
    #[error("operation not allowed: open the state with a writer identity to mutate it")]
    WriteNotPermitted,

    /// Operation referenced a state name not present in the registry.
    #[error("state not found for name: {name}")]
    UnknownState { name: String },

    /// Malformed bulk-replace payload (null or not a mapping).
    #[error("invalid replace payload: {reason}")]
    InvalidArgument { reason: &'static str },

    /// A view path did not resolve to a container that can hold the
    /// addressed member.
    #[error("path does not resolve to a container: {path}")]
    PathNotFound { path: String },
}

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;
