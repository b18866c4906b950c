//! Graph Traversal
//!
//! Transitive enumeration over the dependency graph, plus the
//! construction-time acyclicity check.
//!
//! # Ordering
//!
//! Both enumerations are depth-first and "nearest first": each direct
//! neighbor (in edge declaration order) is listed immediately, followed by
//! its own full transitive chain, before the next sibling is considered.
//!
//! - [`GraphDefinition::all_dependencies`] follows dependency edges
//!   outward. On the chain `view -> texture -> data -> path` it yields
//!   `[texture, data, path]` when asked about `view`.
//! - [`GraphDefinition::all_dependents`] is the mirror image over
//!   who-depends-on-me edges.
//!
//! A node reachable through several paths appears once per path. The
//! lifecycle engine relies on guarded effects plus pre-captured liveness
//! to make the duplicates harmless, and on reversing the dependents order
//! to obtain a farthest-first teardown sequence.
//!
//! These orderings are exposed for inspection as much as for the engine:
//! `ensure_exists` recomputes the same recursive descent directly, but the
//! two must agree on what "all transitive dependencies" means.

use super::node::NodeId;
use super::topology::GraphDefinition;

/// Which edge direction a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Follow dependency edges: what must exist before this node.
    Dependencies,

    /// Follow dependent edges: what requires this node.
    Dependents,
}

impl GraphDefinition {
    /// All transitive dependencies of `node`, nearest first.
    ///
    /// For each direct dependency edge in declaration order, the dependency
    /// itself is listed, then its own full dependency chain, then the next
    /// sibling edge. `node` itself is not included.
    pub fn all_dependencies(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(node, Direction::Dependencies, &mut out);
        out
    }

    /// All transitive dependents of `node`, nearest first.
    ///
    /// Symmetric to [`all_dependencies`](Self::all_dependencies): each
    /// direct dependent comes first, immediately followed by its own chain
    /// of dependents, before sibling edges are listed.
    pub fn all_dependents(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(node, Direction::Dependents, &mut out);
        out
    }

    /// Depth-first pre-order walk in the given direction.
    ///
    /// Unbounded recursion on a cyclic graph; callers are protected by the
    /// builder's acyclicity validation.
    fn collect(&self, node: NodeId, direction: Direction, out: &mut Vec<NodeId>) {
        let neighbors = match direction {
            Direction::Dependencies => self.dependencies_of(node),
            Direction::Dependents => self.dependents_of(node),
        };
        for &next in neighbors {
            out.push(next);
            self.collect(next, direction, out);
        }
    }

    /// Verify the edge relation is acyclic.
    ///
    /// Uses Kahn's algorithm: repeatedly peel off nodes whose dependencies
    /// have all been peeled. If any node survives, it sits on a cycle, and
    /// the first such node (in declaration order) is returned as the
    /// witness.
    ///
    /// This runs once at construction time and changes no runtime
    /// semantics; the traversals above still assume acyclicity.
    pub(crate) fn validate_acyclic(&self) -> Result<(), NodeId> {
        use std::collections::{HashMap, VecDeque};

        let mut in_degree: HashMap<NodeId, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        let mut peeled = 0usize;

        for node in self.nodes() {
            let degree = self.dependencies_of(node).len();
            in_degree.insert(node, degree);
            if degree == 0 {
                queue.push_back(node);
            }
        }

        while let Some(node) = queue.pop_front() {
            peeled += 1;

            for &dependent in self.dependents_of(node) {
                if let Some(degree) = in_degree.get_mut(&dependent) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if peeled == self.node_count() {
            Ok(())
        } else {
            // Some node was never peeled; report the first one declared.
            let witness = self
                .nodes()
                .find(|node| in_degree.get(node).copied().unwrap_or(0) > 0);
            Err(witness.unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build the chain `d -> c -> b -> a` ("d depends on c", etc.).
    fn chain() -> (GraphDefinition, [NodeId; 4]) {
        let mut graph = GraphDefinition::new();
        let a = NodeId::new();
        let b = NodeId::new();
        let c = NodeId::new();
        let d = NodeId::new();

        graph.add_edge(b, a);
        graph.add_edge(c, b);
        graph.add_edge(d, c);

        (graph, [a, b, c, d])
    }

    #[test]
    fn all_dependencies_lists_nearest_first() {
        let (graph, [a, b, c, d]) = chain();

        assert_eq!(graph.all_dependencies(d), vec![c, b, a]);
        assert_eq!(graph.all_dependencies(b), vec![a]);
        assert!(graph.all_dependencies(a).is_empty());
    }

    #[test]
    fn all_dependents_lists_nearest_first() {
        let (graph, [a, b, c, d]) = chain();

        assert_eq!(graph.all_dependents(a), vec![b, c, d]);
        assert_eq!(graph.all_dependents(c), vec![d]);
        assert!(graph.all_dependents(d).is_empty());
    }

    #[test]
    fn sibling_branches_follow_declaration_order() {
        let mut graph = GraphDefinition::new();
        let root = NodeId::new();
        let left = NodeId::new();
        let left_leaf = NodeId::new();
        let right = NodeId::new();

        graph.add_edge(root, left);
        graph.add_edge(root, right);
        graph.add_edge(left, left_leaf);

        // Left branch fully explored before the right sibling.
        assert_eq!(graph.all_dependencies(root), vec![left, left_leaf, right]);
    }

    #[test]
    fn diamond_lists_join_node_once_per_path() {
        // top depends on left and right, both depend on bottom.
        let mut graph = GraphDefinition::new();
        let bottom = NodeId::new();
        let left = NodeId::new();
        let right = NodeId::new();
        let top = NodeId::new();

        graph.add_edge(top, left);
        graph.add_edge(top, right);
        graph.add_edge(left, bottom);
        graph.add_edge(right, bottom);

        assert_eq!(
            graph.all_dependencies(top),
            vec![left, bottom, right, bottom]
        );
        assert_eq!(graph.all_dependents(bottom), vec![left, top, right, top]);
    }

    #[test]
    fn validate_accepts_acyclic_graph() {
        let (graph, _) = chain();
        assert!(graph.validate_acyclic().is_ok());
    }

    #[test]
    fn validate_rejects_cycle() {
        let mut graph = GraphDefinition::new();
        let a = NodeId::new();
        let b = NodeId::new();
        let c = NodeId::new();

        graph.add_edge(b, a);
        graph.add_edge(c, b);
        graph.add_edge(a, c);

        let witness = graph.validate_acyclic().unwrap_err();
        assert!(witness == a || witness == b || witness == c);
    }

    #[test]
    fn validate_rejects_self_loop() {
        let mut graph = GraphDefinition::new();
        let a = NodeId::new();

        graph.add_edge(a, a);

        assert_eq!(graph.validate_acyclic().unwrap_err(), a);
    }

    #[test]
    fn validate_accepts_empty_graph() {
        let graph = GraphDefinition::new();
        assert!(graph.validate_acyclic().is_ok());
    }
}
