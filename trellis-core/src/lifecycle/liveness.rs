//! Liveness Policies
//!
//! Each node declares how the engine knows whether its resource currently
//! exists. Exactly one of three mutually exclusive policies applies:
//!
//! - **Tracked**: the engine owns a boolean flag. It starts not-alive, is
//!   flipped to alive immediately after a successful create, and back to
//!   not-alive after a destroy. The engine is the sole writer.
//! - **Queried**: liveness is computed by caller-supplied read-only logic.
//!   The engine calls it but never writes through it, and never assumes it
//!   agrees with what the engine itself has done.
//! - **Untracked**: no liveness at all. Every lifecycle call on the node
//!   performs its effect unconditionally.

/// Predicate used by the queried policy.
pub type ProbeFn = Box<dyn Fn() -> bool>;

/// Per-node liveness tracking policy.
pub enum Liveness {
    /// Engine-owned boolean flag.
    Tracked {
        /// Whether the resource is currently alive. Engine-written only.
        alive: bool,
    },

    /// Externally computed liveness; the engine only reads.
    Queried(ProbeFn),

    /// No tracking; every request performs its effect.
    Untracked,
}

impl Liveness {
    /// Report liveness, or `default_if_untracked` when the node has no
    /// tracking mechanism.
    pub(crate) fn exists(&self, default_if_untracked: bool) -> bool {
        match self {
            Liveness::Tracked { alive } => *alive,
            Liveness::Queried(probe) => probe(),
            Liveness::Untracked => default_if_untracked,
        }
    }

    /// Record a successful create. Only the tracked policy has state to
    /// update; the other variants are untouched.
    pub(crate) fn mark_alive(&mut self) {
        if let Liveness::Tracked { alive } = self {
            *alive = true;
        }
    }

    /// Record a destroy.
    pub(crate) fn mark_not_alive(&mut self) {
        if let Liveness::Tracked { alive } = self {
            *alive = false;
        }
    }
}

impl std::fmt::Debug for Liveness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Liveness::Tracked { alive } => {
                f.debug_struct("Tracked").field("alive", alive).finish()
            }
            Liveness::Queried(_) => f.write_str("Queried"),
            Liveness::Untracked => f.write_str("Untracked"),
        }
    }
}
