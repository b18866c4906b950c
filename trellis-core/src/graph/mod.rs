//! Dependency Graph
//!
//! This module implements the immutable dependency graph that the lifecycle
//! engine traverses.
//!
//! # Overview
//!
//! The graph is a directed acyclic graph (DAG) where:
//!
//! - Nodes are opaque identities for managed resources
//! - Edges are `(dependent, dependency)` pairs meaning "the dependent
//!   requires the dependency to exist first"
//!
//! Nodes and edges are declared once, when the engine is built, and never
//! change afterwards. Traversal queries enumerate direct and transitive
//! neighbors in a deterministic order derived from edge declaration order;
//! the lifecycle algorithms depend on that order being preserved exactly.
//!
//! What a node *does* — its create/destroy effects and liveness policy —
//! lives in the [`lifecycle`](crate::lifecycle) module. This module is pure
//! topology.

mod node;
mod topology;
mod traverse;

pub use node::NodeId;
pub use topology::GraphDefinition;
