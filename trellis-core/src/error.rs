//! Error Types
//!
//! The engine performs no local recovery: a failing create or destroy
//! effect is wrapped with the node's identity and the phase it failed in,
//! then surfaced unchanged to the caller of `ensure_exists`/`rebuild`.
//! A failure mid-rebuild leaves the graph partially rebuilt; re-invoking
//! `ensure_exists` is the documented repair path, since it only recreates
//! what liveness tracking says is missing.

use thiserror::Error;

/// The error type caller-supplied effects may return.
pub type EffectError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the lifecycle engine.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A create effect failed. Already-created dependencies stay alive;
    /// there is no automatic rollback.
    #[error("create effect failed for `{label}`")]
    CreateFailed {
        /// Label of the node whose create effect failed.
        label: String,
        /// The underlying effect failure.
        #[source]
        source: EffectError,
    },

    /// A destroy effect failed, aborting the teardown sequence.
    #[error("destroy effect failed for `{label}`")]
    DestroyFailed {
        /// Label of the node whose destroy effect failed.
        label: String,
        /// The underlying effect failure.
        #[source]
        source: EffectError,
    },

    /// The declared edges form a cycle. Detected once at build time;
    /// the named node sits on the cycle.
    #[error("dependency cycle detected through `{label}`")]
    CycleDetected {
        /// Label of a node on the cycle.
        label: String,
    },
}
