//! Lifecycle Engine
//!
//! The engine owns the frozen graph topology plus one [`ResourceSpec`] per
//! node, and exposes the two lifecycle operations:
//!
//! - [`LifecycleEngine::ensure_exists`]: lazily materialize a node together
//!   with everything it depends on, dependencies first.
//! - [`LifecycleEngine::rebuild`]: tear down and recreate a node together
//!   with every transitive dependent that was alive beforehand.
//!
//! # How Rebuild Works
//!
//! 1. Reverse the nearest-first dependents enumeration, so the farthest
//!    transitive dependent comes first and immediate dependents sit at the
//!    end, right before the node itself.
//!
//! 2. Walk the list front to back. For each dependent, capture whether it
//!    was alive *before* touching it, then run its guarded destroy.
//!
//! 3. Destroy the node itself, then unconditionally recreate it — the
//!    subject of a rebuild always comes back, whatever its prior state.
//!
//! 4. Walk the list back to front, recreating exactly the dependents that
//!    were alive in step 2.
//!
//! Destruction therefore proceeds farthest-dependent-first and creation in
//! exactly the reverse sequence: nothing is destroyed while a live
//! dependent still needs it, and nothing is created before everything it
//! depends on exists. A dependent that was never created is destroyed
//! harmlessly (destroy is guarded) and never spuriously recreated.
//!
//! # Failure Semantics
//!
//! The engine never retries and never rolls back. A failing effect aborts
//! the current operation mid-sequence and propagates to the caller;
//! re-invoking `ensure_exists` afterwards recreates only what liveness
//! tracking says is missing.
//!
//! # Concurrency
//!
//! None. The engine is synchronous, single-threaded, and non-reentrant:
//! effects run on the caller's thread, at the call depth implied by the
//! graph's depth, and must not call back into the engine.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::LifecycleError;
use crate::graph::{GraphDefinition, NodeId};

use super::resource::ResourceSpec;

type Slots = IndexMap<NodeId, ResourceSpec>;

/// Builder for a [`LifecycleEngine`].
///
/// Nodes and edges are declared exactly once, here; the engine's topology
/// is immutable after [`build`](Self::build).
#[derive(Debug, Default)]
pub struct EngineBuilder {
    graph: GraphDefinition,
    slots: Slots,
}

impl EngineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node and return its identity.
    pub fn add(&mut self, spec: ResourceSpec) -> NodeId {
        let id = NodeId::new();
        self.graph.add_node(id);
        self.slots.insert(id, spec);
        id
    }

    /// Declare that `dependent` requires `dependency` to exist first.
    ///
    /// Declaration order among a node's edges is observable in traversal
    /// and lifecycle ordering. Endpoints that were never [`add`](Self::add)ed
    /// become bare marker nodes with no effects.
    pub fn depends_on(&mut self, dependent: NodeId, dependency: NodeId) -> &mut Self {
        self.graph.add_edge(dependent, dependency);
        self
    }

    /// Freeze the topology, validating that the edge relation is acyclic.
    ///
    /// Validation is a construction-time topological sort; it changes no
    /// runtime semantics. Callers who want the original unchecked contract
    /// (a cycle recursing without bound at run time) can use
    /// [`build_unvalidated`](Self::build_unvalidated).
    pub fn build(self) -> Result<LifecycleEngine, LifecycleError> {
        if let Err(witness) = self.graph.validate_acyclic() {
            return Err(LifecycleError::CycleDetected {
                label: label(&self.slots, witness),
            });
        }
        Ok(self.build_unvalidated())
    }

    /// Freeze the topology without the acyclicity check.
    pub fn build_unvalidated(self) -> LifecycleEngine {
        LifecycleEngine {
            graph: self.graph,
            slots: self.slots,
        }
    }
}

/// The dependency-graph lifecycle engine.
///
/// See the [module docs](self) for the algorithms and their guarantees.
#[derive(Debug)]
pub struct LifecycleEngine {
    graph: GraphDefinition,
    slots: Slots,
}

impl LifecycleEngine {
    /// Start declaring a new engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// The frozen graph topology, for traversal queries and inspection.
    pub fn graph(&self) -> &GraphDefinition {
        &self.graph
    }

    /// Report a node's liveness, if it has any notion of it.
    ///
    /// Returns `None` for untracked and unknown nodes.
    pub fn is_alive(&self, node: NodeId) -> Option<bool> {
        use super::liveness::Liveness;

        match self.slots.get(&node).map(|slot| &slot.liveness) {
            Some(Liveness::Tracked { alive }) => Some(*alive),
            Some(Liveness::Queried(probe)) => Some(probe()),
            Some(Liveness::Untracked) | None => None,
        }
    }

    /// Guarantee `node` and everything it transitively depends on is alive.
    ///
    /// Depth-first over dependency edges in declaration order: each
    /// dependency is ensured to completion before the next sibling, and the
    /// node's own guarded create runs last. Idempotent for tracked and
    /// queried nodes; untracked nodes re-run their create effect on every
    /// call, by design.
    ///
    /// A failing create effect propagates immediately; dependencies created
    /// earlier in the walk stay alive.
    pub fn ensure_exists(&mut self, node: NodeId) -> Result<(), LifecycleError> {
        let Self { graph, slots } = self;
        trace!(node = %label(slots, node), "ensure exists");
        ensure_rec(graph, slots, node)
    }

    /// Destroy and recreate `node`, plus every transitive dependent that
    /// was alive before the call. Dependents that were never created (or
    /// already torn down) are left untouched.
    pub fn rebuild(&mut self, node: NodeId) -> Result<(), LifecycleError> {
        let Self { graph, slots } = self;
        debug!(node = %label(slots, node), "rebuild");

        // Farthest transitive dependent first, immediate dependents last.
        let mut order = graph.all_dependents(node);
        order.reverse();

        // Pre-state is captured strictly before any destructive action on
        // the entry; a node reached through several paths reads as alive
        // only at its first (farthest) entry.
        let mut was_alive = Vec::with_capacity(order.len());
        for &dependent in &order {
            was_alive.push(resource_exists(slots, dependent, true));
            destroy_resource(slots, dependent)?;
        }

        destroy_resource(slots, node)?;
        // The subject of the rebuild is always recreated.
        invoke_create(slots, node)?;

        // Recreation runs in exactly the reverse of destruction order.
        for (&dependent, &hot) in order.iter().zip(was_alive.iter()).rev() {
            if hot {
                create_resource(slots, dependent)?;
            } else {
                trace!(
                    node = %label(slots, dependent),
                    "skip recreate, was not alive before rebuild"
                );
            }
        }

        Ok(())
    }
}

/// Dependencies to completion first, then the node's own guarded create.
fn ensure_rec(graph: &GraphDefinition, slots: &mut Slots, node: NodeId) -> Result<(), LifecycleError> {
    for &dependency in graph.dependencies_of(node) {
        ensure_rec(graph, slots, dependency)?;
    }
    create_resource(slots, node)
}

/// Human-readable identity for logs and errors.
fn label(slots: &Slots, node: NodeId) -> String {
    slots
        .get(&node)
        .map(|slot| slot.label.clone())
        .unwrap_or_else(|| node.to_string())
}

/// Tracked or queried liveness, or `default_if_untracked` when the node
/// has no tracking mechanism (including nodes never registered).
fn resource_exists(slots: &Slots, node: NodeId, default_if_untracked: bool) -> bool {
    match slots.get(&node) {
        Some(slot) => slot.liveness.exists(default_if_untracked),
        None => default_if_untracked,
    }
}

/// Guarded create: skipped when liveness already reports alive.
fn create_resource(slots: &mut Slots, node: NodeId) -> Result<(), LifecycleError> {
    if resource_exists(slots, node, false) {
        trace!(node = %label(slots, node), "create skipped, already alive");
        return Ok(());
    }
    invoke_create(slots, node)
}

/// Guarded destroy: skipped when liveness reports not alive.
fn destroy_resource(slots: &mut Slots, node: NodeId) -> Result<(), LifecycleError> {
    if !resource_exists(slots, node, true) {
        trace!(node = %label(slots, node), "destroy skipped, not alive");
        return Ok(());
    }
    invoke_destroy(slots, node)
}

/// Run the create effect and mark tracked liveness, unconditionally.
///
/// The tracked flag flips only after the effect succeeds; a failing create
/// leaves the node not-alive so a later `ensure_exists` can retry it.
fn invoke_create(slots: &mut Slots, node: NodeId) -> Result<(), LifecycleError> {
    let Some(slot) = slots.get_mut(&node) else {
        // Unregistered node: behaves as a no-op marker.
        return Ok(());
    };
    if let Some(effect) = slot.create.as_mut() {
        debug!(node = %slot.label, "create resource");
        effect().map_err(|source| LifecycleError::CreateFailed {
            label: slot.label.clone(),
            source,
        })?;
    }
    slot.liveness.mark_alive();
    Ok(())
}

/// Run the destroy effect and clear tracked liveness, unconditionally.
fn invoke_destroy(slots: &mut Slots, node: NodeId) -> Result<(), LifecycleError> {
    let Some(slot) = slots.get_mut(&node) else {
        return Ok(());
    };
    if let Some(effect) = slot.destroy.as_mut() {
        debug!(node = %slot.label, "destroy resource");
        effect().map_err(|source| LifecycleError::DestroyFailed {
            label: slot.label.clone(),
            source,
        })?;
    }
    slot.liveness.mark_not_alive();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::EffectError;

    type Trace = Rc<RefCell<Vec<String>>>;

    fn record(trace: &Trace, entry: &str) -> impl FnMut() -> Result<(), EffectError> {
        let trace = Rc::clone(trace);
        let entry = entry.to_string();
        move || {
            trace.borrow_mut().push(entry.clone());
            Ok(())
        }
    }

    fn spec(trace: &Trace, name: &str) -> ResourceSpec {
        ResourceSpec::new(name)
            .create(record(trace, &format!("create:{name}")))
            .destroy(record(trace, &format!("destroy:{name}")))
    }

    #[test]
    fn ensure_exists_is_idempotent_for_tracked_nodes() {
        let trace: Trace = Rc::default();
        let mut builder = LifecycleEngine::builder();
        let node = builder.add(spec(&trace, "a"));
        let mut engine = builder.build().unwrap();

        engine.ensure_exists(node).unwrap();
        engine.ensure_exists(node).unwrap();

        assert_eq!(*trace.borrow(), vec!["create:a"]);
        assert_eq!(engine.is_alive(node), Some(true));
    }

    #[test]
    fn untracked_node_runs_create_every_call() {
        let trace: Trace = Rc::default();
        let mut builder = LifecycleEngine::builder();
        let node = builder.add(spec(&trace, "a").untracked());
        let mut engine = builder.build().unwrap();

        engine.ensure_exists(node).unwrap();
        engine.ensure_exists(node).unwrap();

        assert_eq!(*trace.borrow(), vec!["create:a", "create:a"]);
        assert_eq!(engine.is_alive(node), None);
    }

    #[test]
    fn queried_node_guards_on_the_probe() {
        let trace: Trace = Rc::default();
        let window_open = Rc::new(RefCell::new(true));

        let mut builder = LifecycleEngine::builder();
        let probe = Rc::clone(&window_open);
        let node = builder.add(spec(&trace, "window").exists_with(move || *probe.borrow()));
        let mut engine = builder.build().unwrap();

        // Probe says alive: nothing to do.
        engine.ensure_exists(node).unwrap();
        assert!(trace.borrow().is_empty());

        // Probe says gone: create runs. The engine never writes the probe's
        // state, so a second call creates again.
        *window_open.borrow_mut() = false;
        engine.ensure_exists(node).unwrap();
        engine.ensure_exists(node).unwrap();
        assert_eq!(*trace.borrow(), vec!["create:window", "create:window"]);
    }

    #[test]
    fn rebuild_always_recreates_the_subject() {
        let trace: Trace = Rc::default();
        let mut builder = LifecycleEngine::builder();
        let node = builder.add(spec(&trace, "a"));
        let mut engine = builder.build().unwrap();

        // Never created: destroy is a guarded no-op, create still runs.
        engine.rebuild(node).unwrap();
        assert_eq!(*trace.borrow(), vec!["create:a"]);

        // Alive: destroy then create.
        engine.rebuild(node).unwrap();
        assert_eq!(
            *trace.borrow(),
            vec!["create:a", "destroy:a", "create:a"]
        );
    }

    #[test]
    fn create_failure_wraps_label_and_propagates() {
        let mut builder = LifecycleEngine::builder();
        let node = builder.add(
            ResourceSpec::new("texture").create(|| Err("gpu out of memory".into())),
        );
        let mut engine = builder.build().unwrap();

        let err = engine.ensure_exists(node).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::CreateFailed { ref label, .. } if label == "texture"
        ));
        // The effect failed, so the node must not read as alive.
        assert_eq!(engine.is_alive(node), Some(false));
    }

    #[test]
    fn unknown_node_is_a_silent_leaf() {
        let mut engine = LifecycleEngine::builder().build().unwrap();
        let stranger = NodeId::new();

        engine.ensure_exists(stranger).unwrap();
        engine.rebuild(stranger).unwrap();
        assert_eq!(engine.is_alive(stranger), None);
    }

    #[test]
    fn build_rejects_cyclic_edges() {
        let trace: Trace = Rc::default();
        let mut builder = LifecycleEngine::builder();
        let a = builder.add(spec(&trace, "a"));
        let b = builder.add(spec(&trace, "b"));
        builder.depends_on(a, b);
        builder.depends_on(b, a);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, LifecycleError::CycleDetected { .. }));
    }

    #[test]
    fn dependency_edge_to_unregistered_node_is_tolerated() {
        let trace: Trace = Rc::default();
        let marker = NodeId::new();

        let mut builder = LifecycleEngine::builder();
        let node = builder.add(spec(&trace, "a"));
        builder.depends_on(node, marker);
        let mut engine = builder.build().unwrap();

        engine.ensure_exists(node).unwrap();
        assert_eq!(*trace.borrow(), vec!["create:a"]);
    }
}
