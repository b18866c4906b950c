//! Graph Topology
//!
//! This module implements [`GraphDefinition`], the immutable description of
//! nodes and directed edges that the lifecycle engine traverses.
//!
//! # Overview
//!
//! The graph is a plain value: a registry of nodes plus an edge relation,
//! where the edge `(dependent, dependency)` means "the dependent requires
//! the dependency to exist first". The definition is pure data; it performs
//! no side effects and, once frozen inside an engine, is never mutated.
//!
//! # Design Decisions
//!
//! 1. Edge order is load-bearing, not cosmetic. Sibling edges are kept in
//!    declaration order, and that order is observable in every traversal
//!    result. The rebuild algorithm's correctness argument depends on it,
//!    so the adjacency lists live in insertion-ordered containers
//!    (`IndexMap` for the node registry, `SmallVec` per-node edge lists).
//!
//! 2. Both forward (dependencies) and reverse (dependents) adjacency are
//!    maintained so traversal is cheap in either direction.
//!
//! 3. An unknown node is not an error: it has no edges and behaves like a
//!    leaf. The engine tolerates identifiers it has never seen.
//!
//! 4. The edge relation must be acyclic. The definition itself does not
//!    enforce this; construction-time validation lives in the engine
//!    builder (see [`GraphDefinition::validate_acyclic`]).

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::node::NodeId;

/// Per-node adjacency lists, in edge declaration order.
#[derive(Debug, Default)]
struct Adjacency {
    /// Nodes this node depends on (must exist before it).
    dependencies: SmallVec<[NodeId; 4]>,

    /// Nodes that depend on this node.
    dependents: SmallVec<[NodeId; 4]>,
}

/// Immutable description of nodes and directed dependency edges.
///
/// Built once by the engine builder, then only queried. Safe to share
/// read-only between engine instances.
#[derive(Debug, Default)]
pub struct GraphDefinition {
    /// Adjacency indexed by node, in node declaration order.
    nodes: IndexMap<NodeId, Adjacency>,

    /// The full edge list `(dependent, dependency)`, in declaration order.
    edges: Vec<(NodeId, NodeId)>,
}

impl GraphDefinition {
    /// Create an empty graph definition.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a node with no edges yet.
    pub(crate) fn add_node(&mut self, node: NodeId) {
        self.nodes.entry(node).or_default();
    }

    /// Declare the edge "`dependent` requires `dependency`".
    ///
    /// Both endpoints are registered implicitly if they were not declared
    /// before; the node set of the graph is the set implied by the edges.
    pub(crate) fn add_edge(&mut self, dependent: NodeId, dependency: NodeId) {
        self.nodes
            .entry(dependent)
            .or_default()
            .dependencies
            .push(dependency);
        self.nodes
            .entry(dependency)
            .or_default()
            .dependents
            .push(dependent);
        self.edges.push((dependent, dependency));
    }

    /// Direct dependencies of `node`, in edge declaration order.
    ///
    /// An unknown node has no dependencies.
    pub fn dependencies_of(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|adj| adj.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Direct dependents of `node`, in edge declaration order.
    ///
    /// An unknown node has no dependents.
    pub fn dependents_of(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|adj| adj.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `node` was declared (directly or implied by an edge).
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// All declared nodes, in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// The full edge list `(dependent, dependency)`, in declaration order.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Get the total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_register_both_endpoints() {
        let mut graph = GraphDefinition::new();
        let a = NodeId::new();
        let b = NodeId::new();

        graph.add_edge(a, b);

        assert!(graph.contains(a));
        assert!(graph.contains(b));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.dependencies_of(a), &[b]);
        assert_eq!(graph.dependents_of(b), &[a]);
    }

    #[test]
    fn sibling_edges_keep_declaration_order() {
        let mut graph = GraphDefinition::new();
        let root = NodeId::new();
        let first = NodeId::new();
        let second = NodeId::new();
        let third = NodeId::new();

        graph.add_edge(root, first);
        graph.add_edge(root, second);
        graph.add_edge(root, third);

        assert_eq!(graph.dependencies_of(root), &[first, second, third]);
    }

    #[test]
    fn unknown_node_has_no_edges() {
        let graph = GraphDefinition::new();
        let stranger = NodeId::new();

        assert!(!graph.contains(stranger));
        assert!(graph.dependencies_of(stranger).is_empty());
        assert!(graph.dependents_of(stranger).is_empty());
    }

    #[test]
    fn edge_list_preserves_declaration_order() {
        let mut graph = GraphDefinition::new();
        let a = NodeId::new();
        let b = NodeId::new();
        let c = NodeId::new();

        graph.add_edge(b, a);
        graph.add_edge(c, b);

        assert_eq!(graph.edges(), &[(b, a), (c, b)]);
    }
}
