//! Resource Lifecycle
//!
//! This module implements everything a node *does*: liveness policies,
//! per-node effect bundles, and the engine that orders create and destroy
//! calls along the dependency graph.
//!
//! # Concepts
//!
//! ## Resources
//!
//! A resource is anything with an explicit creation step and an explicit
//! teardown step: a GPU texture, an open file, a widget. The engine never
//! looks inside; it only invokes the effects at the right time, in the
//! right order.
//!
//! ## Liveness
//!
//! Whether a resource currently exists. Each node picks one of three
//! policies — tracked, queried, or untracked — and the engine guards every
//! effect invocation with it, so effects themselves need not be idempotent.
//!
//! ## The engine
//!
//! [`LifecycleEngine`] exposes two operations. `ensure_exists` materializes
//! a node and its dependency closure, bottom-up and idempotently. `rebuild`
//! tears a node down together with every dependent that was alive, then
//! recreates the node and exactly those dependents, in reverse teardown
//! order.

mod engine;
mod liveness;
mod resource;

pub use engine::{EngineBuilder, LifecycleEngine};
pub use liveness::{Liveness, ProbeFn};
pub use resource::{EffectFn, ResourceSpec};
