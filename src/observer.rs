//! Edge-triggered viewport visibility for a single observed node.
//!
//! The host feeds raw intersection ratios in; the observer only reports the
//! crossings of its threshold, never repeated "still visible" samples. That
//! edge discipline is what keeps reveals and choreographed sequences from
//! re-triggering on every scroll tick.

use crate::{
    core::NodeId,
    error::{ScrollcueError, ScrollcueResult},
};

/// Default intersection fraction required to count a node as visible.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// A visibility crossing in either direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityEdge {
    Entered,
    Left,
}

/// Latest visibility of an observed node. Mutated only by
/// [`ViewportObserver::sample`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisibilityState {
    pub node: NodeId,
    pub is_visible: bool,
}

/// Wraps the host's intersection-detection facility for one node.
///
/// A dormant observer models registration failure (the host API being
/// unavailable): it permanently reports not-visible and never emits an edge,
/// so dependent reveals simply stay in their pre-reveal state.
#[derive(Clone, Debug)]
pub struct ViewportObserver {
    state: VisibilityState,
    threshold: f64,
    dormant: bool,
}

impl ViewportObserver {
    /// Observe `node`, counting it visible once `threshold` of it intersects
    /// the viewport. The threshold must be a fraction in `[0, 1]`.
    pub fn observe(node: NodeId, threshold: f64) -> ScrollcueResult<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ScrollcueError::observer(format!(
                "threshold must be in [0, 1], got {threshold}"
            )));
        }
        Ok(Self {
            state: VisibilityState {
                node,
                is_visible: false,
            },
            threshold,
            dormant: false,
        })
    }

    /// An observer that never emits. Used when registration with the host's
    /// intersection facility failed.
    pub fn dormant(node: NodeId) -> Self {
        Self {
            state: VisibilityState {
                node,
                is_visible: false,
            },
            threshold: DEFAULT_THRESHOLD,
            dormant: true,
        }
    }

    pub fn node(&self) -> &NodeId {
        &self.state.node
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible
    }

    /// Feed one intersection-ratio sample; returns an edge only when the
    /// threshold truth value changed.
    pub fn sample(&mut self, intersection_ratio: f64) -> Option<VisibilityEdge> {
        if self.dormant {
            return None;
        }
        let visible = intersection_ratio >= self.threshold;
        if visible == self.state.is_visible {
            return None;
        }
        self.state.is_visible = visible;
        let edge = if visible {
            VisibilityEdge::Entered
        } else {
            VisibilityEdge::Left
        };
        tracing::trace!(node = %self.state.node, ?edge, "visibility edge");
        Some(edge)
    }
}

/// Cancellable handle for a host-side registration (intersection observer,
/// scroll listener, pending timer).
///
/// Dispose is idempotent and also runs on drop, so teardown cannot leak the
/// underlying registration.
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + Send + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A subscription with nothing to release (e.g. a dormant observer).
    pub fn empty() -> Self {
        Self { dispose: None }
    }

    pub fn is_active(&self) -> bool {
        self.dispose.is_some()
    }

    pub fn dispose(&mut self) {
        if let Some(f) = self.dispose.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
