//! Scroll telemetry: one immutable snapshot per scroll/resize sample, plus
//! the two derived booleans the nav chrome keys off.

/// Scroll offset (in px) past which the header swaps to its solid background.
pub const SCROLL_THRESHOLD_PX: f64 = 40.0;

/// Immutable sample of the document scroll state.
///
/// Each sample wholly replaces the previous one; there is no identity to
/// update in place. The derivations are pure, so recomputing them for a
/// redelivered identical sample is harmless.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSnapshot {
    pub offset_y: f64,
    pub viewport_height: f64,
}

impl ScrollSnapshot {
    pub fn new(offset_y: f64, viewport_height: f64) -> Self {
        Self {
            offset_y,
            viewport_height,
        }
    }

    /// True once the page has scrolled past the header-swap threshold.
    pub fn past_threshold(self) -> bool {
        self.offset_y > SCROLL_THRESHOLD_PX
    }

    /// True once the page has scrolled past half a viewport height.
    ///
    /// Controls the nav hide and the floating booking button show.
    pub fn past_half_viewport(self) -> bool {
        self.offset_y > 0.5 * self.viewport_height
    }

    /// Document-space offset of the viewport's top edge.
    pub fn viewport_top(self) -> f64 {
        self.offset_y
    }
}

/// Holds the latest snapshot; no hidden state beyond it.
#[derive(Clone, Copy, Debug)]
pub struct ScrollTelemetry {
    last: ScrollSnapshot,
}

impl ScrollTelemetry {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            last: ScrollSnapshot::new(0.0, viewport_height),
        }
    }

    /// Record a scroll or resize sample, returning the new snapshot.
    pub fn sample(&mut self, offset_y: f64, viewport_height: f64) -> ScrollSnapshot {
        self.last = ScrollSnapshot::new(offset_y, viewport_height);
        self.last
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert!(!ScrollSnapshot::new(40.0, 800.0).past_threshold());
        assert!(ScrollSnapshot::new(40.1, 800.0).past_threshold());
        assert!(!ScrollSnapshot::new(0.0, 800.0).past_threshold());
    }

    #[test]
    fn half_viewport_is_strict() {
        assert!(!ScrollSnapshot::new(400.0, 800.0).past_half_viewport());
        assert!(ScrollSnapshot::new(400.1, 800.0).past_half_viewport());
    }

    #[test]
    fn resample_replaces_snapshot() {
        let mut t = ScrollTelemetry::new(800.0);
        t.sample(100.0, 800.0);
        let a = t.sample(250.0, 600.0);
        assert_eq!(t.snapshot(), a);
        assert_eq!(a.offset_y, 250.0);
        assert_eq!(a.viewport_height, 600.0);
    }

    #[test]
    fn redundant_resample_is_idempotent() {
        let mut t = ScrollTelemetry::new(800.0);
        let a = t.sample(123.0, 800.0);
        let b = t.sample(123.0, 800.0);
        assert_eq!(a, b);
    }
}
