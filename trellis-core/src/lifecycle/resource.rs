//! Resource Specifications
//!
//! A [`ResourceSpec`] bundles everything the engine needs to know about one
//! node: a human-readable label, optional create and destroy effects, and a
//! liveness policy. Heterogeneous resource kinds share one graph because a
//! node is just this closure bundle, not a type.
//!
//! Effects are plain closures that capture whatever application state they
//! need. They may fail; a failure propagates out of the engine untouched.
//! Effects must not re-enter the engine for the same node synchronously.
//!
//! The builder mirrors the shape of declaring a resource by hand:
//!
//! ```rust
//! use trellis_core::lifecycle::ResourceSpec;
//!
//! let spec = ResourceSpec::new("texture")
//!     .create(|| {
//!         // allocate the texture, upload data...
//!         Ok(())
//!     })
//!     .destroy(|| {
//!         // free the texture
//!         Ok(())
//!     });
//! ```

use crate::error::EffectError;

use super::liveness::Liveness;

/// A create or destroy effect. Effects run on the caller's thread; the
/// engine is single-threaded, so no `Send`/`Sync` bound is required.
pub type EffectFn = Box<dyn FnMut() -> Result<(), EffectError>>;

/// Everything the engine knows about one node's resource.
///
/// Missing effects default to no-ops, so a node may be a pure marker in
/// the graph (a file path, a configuration value) that exists only to give
/// its dependents something to be rebuilt from.
///
/// The default liveness policy is tracked: the engine owns the alive flag
/// and guards effects with it. Use [`exists_with`](Self::exists_with) to
/// delegate liveness to the application, or [`untracked`](Self::untracked)
/// to run effects unconditionally on every request.
pub struct ResourceSpec {
    pub(crate) label: String,
    pub(crate) create: Option<EffectFn>,
    pub(crate) destroy: Option<EffectFn>,
    pub(crate) liveness: Liveness,
}

impl ResourceSpec {
    /// Start a spec with the given label and no effects, tracked.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            create: None,
            destroy: None,
            liveness: Liveness::Tracked { alive: false },
        }
    }

    /// Set the create effect: brings the resource into existence.
    ///
    /// The effect is not assumed idempotent; the engine guards calls via
    /// the liveness policy instead.
    pub fn create<F>(mut self, effect: F) -> Self
    where
        F: FnMut() -> Result<(), EffectError> + 'static,
    {
        self.create = Some(Box::new(effect));
        self
    }

    /// Set the destroy effect: undoes the create effect.
    pub fn destroy<F>(mut self, effect: F) -> Self
    where
        F: FnMut() -> Result<(), EffectError> + 'static,
    {
        self.destroy = Some(Box::new(effect));
        self
    }

    /// Use the tracked policy (the default): the engine owns the alive
    /// flag, initialized to not-alive.
    pub fn tracked(mut self) -> Self {
        self.liveness = Liveness::Tracked { alive: false };
        self
    }

    /// Use the queried policy: liveness is whatever `probe` reports. The
    /// engine never writes through it.
    pub fn exists_with<F>(mut self, probe: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.liveness = Liveness::Queried(Box::new(probe));
        self
    }

    /// Use the untracked policy: no liveness, effects run unconditionally
    /// on every lifecycle call that touches this node.
    pub fn untracked(mut self) -> Self {
        self.liveness = Liveness::Untracked;
        self
    }

    /// The node's label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Debug for ResourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSpec")
            .field("label", &self.label)
            .field("has_create", &self.create.is_some())
            .field("has_destroy", &self.destroy.is_some())
            .field("liveness", &self.liveness)
            .finish()
    }
}
