//! Trellis Core
//!
//! This crate provides the dependency-graph resource lifecycle engine for
//! the Trellis framework. It implements:
//!
//! - An immutable dependency graph over opaque resource identities
//! - Per-node liveness policies (tracked, queried, untracked)
//! - Ordered materialization and rebuild of interdependent resources
//!
//! The engine solves the classic application-lifecycle problem: init order
//! matters, teardown order is the reverse, and when one thing changes,
//! everything downstream must be redone. Callers declare nodes and edges
//! once; the engine derives every ordering from that declaration.
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `graph`: node identity, immutable topology, and traversal queries
//! - `lifecycle`: liveness policies, effect bundles, and the engine
//!
//! # Example
//!
//! ```rust
//! use trellis_core::lifecycle::{LifecycleEngine, ResourceSpec};
//!
//! let mut builder = LifecycleEngine::builder();
//!
//! // A marker node: its dependents rebuild when it changes.
//! let path = builder.add(ResourceSpec::new("path"));
//!
//! let data = builder.add(
//!     ResourceSpec::new("data")
//!         .create(|| {
//!             // read the image file...
//!             Ok(())
//!         })
//!         .destroy(|| {
//!             // drop the pixel buffer
//!             Ok(())
//!         }),
//! );
//!
//! builder.depends_on(data, path);
//! let mut engine = builder.build()?;
//!
//! // Materialize `data` and everything under it, dependencies first.
//! engine.ensure_exists(data)?;
//!
//! // The path changed: recreate it and every dependent that was alive.
//! engine.rebuild(path)?;
//! # Ok::<(), trellis_core::error::LifecycleError>(())
//! ```
//!
//! # Limits
//!
//! The engine is synchronous, single-threaded, and non-reentrant. The edge
//! relation must be acyclic; the builder validates this once at
//! construction time. Liveness state lives in memory only and does not
//! survive the process.

pub mod error;
pub mod graph;
pub mod lifecycle;
