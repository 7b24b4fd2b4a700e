//! Continuous parallax: a layer's offset bound to scroll progress through a
//! reference element's bounds. Unlike timeline steps this is recomputed on
//! every scroll sample, not scheduled on a timer.

use crate::{
    core::{ElementBounds, NodeId, Vec2},
    telemetry::ScrollSnapshot,
    timeline::{StyleDelta, StyleProperty},
};

/// Linear progress of the viewport top through `bounds`, clamped to [0, 1].
pub fn scroll_progress(viewport_top: f64, bounds: ElementBounds) -> f64 {
    ((viewport_top - bounds.top) / bounds.height).clamp(0.0, 1.0)
}

/// Binds a layer's translate (and optional rotation) to scroll progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxBinding {
    pub layer: NodeId,
    pub bounds: ElementBounds,
    /// Offset applied at progress 1, scrubbed linearly from zero.
    pub amplitude: Vec2,
    /// Rotation (degrees) applied at progress 1.
    pub rotation_deg: f64,
}

impl ParallaxBinding {
    /// Resolve this binding against the latest scroll snapshot.
    pub fn sample(&self, snapshot: ScrollSnapshot) -> Vec<StyleDelta> {
        let progress = scroll_progress(snapshot.viewport_top(), self.bounds);
        let offset = self.amplitude * progress;

        let mut deltas = vec![
            StyleDelta {
                target: self.layer.clone(),
                property: StyleProperty::TranslateX,
                value: offset.x,
            },
            StyleDelta {
                target: self.layer.clone(),
                property: StyleProperty::TranslateY,
                value: offset.y,
            },
        ];
        if self.rotation_deg != 0.0 {
            deltas.push(StyleDelta {
                target: self.layer.clone(),
                property: StyleProperty::Rotation,
                value: self.rotation_deg * progress,
            });
        }
        deltas
    }
}
