use crate::error::{ScrollcueError, ScrollcueResult};

pub use kurbo::Vec2;

/// Absolute milliseconds on the orchestration clock.
///
/// The host feeds frame timestamps in; tests inject a virtual clock by
/// passing arbitrary values.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Milliseconds elapsed since `earlier`, saturating at zero.
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn add(self, ms: u64) -> Millis {
        Millis(self.0.saturating_add(ms))
    }
}

/// Stable identifier of a target node in the host's render tree.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document-space bounds of a reference element: top edge offset from the
/// document origin and total height, both in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64, // must be > 0
}

impl ElementBounds {
    /// Create validated bounds with a strictly positive height.
    pub fn new(top: f64, height: f64) -> ScrollcueResult<Self> {
        if !top.is_finite() || !height.is_finite() {
            return Err(ScrollcueError::validation(
                "ElementBounds top/height must be finite",
            ));
        }
        if height <= 0.0 {
            return Err(ScrollcueError::validation(
                "ElementBounds height must be > 0",
            ));
        }
        Ok(Self { top, height })
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}
