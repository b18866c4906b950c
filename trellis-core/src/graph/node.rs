//! Graph Nodes
//!
//! This module defines the node identity used throughout the dependency graph.
//!
//! A node is an opaque identifier for a managed resource. The identifier
//! carries no behavior of its own; the effects and liveness policy attached
//! to it live in the lifecycle layer. Nodes are declared once at graph
//! construction time and are immutable identities for the graph's lifetime.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a node in the dependency graph.
///
/// IDs are unique across the whole process, so a `NodeId` minted by one
/// builder is never confused with a node of another graph. Looking up an
/// ID the graph has never seen yields empty edge lists, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Generate a new unique node ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
