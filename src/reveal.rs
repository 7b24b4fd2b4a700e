//! Per-section reveal: a pure mapping from visibility to entrance style.

use crate::error::{ScrollcueError, ScrollcueResult};

/// Vertical offset (px) content sits at before it rises into place.
pub const HIDDEN_OFFSET_PX: f64 = 48.0;

/// Static reveal configuration for one section's staggered children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    pub base_delay_ms: u64,
    pub stagger_step_ms: u64,
    pub item_count: usize,
}

impl RevealSpec {
    pub fn validate(&self) -> ScrollcueResult<()> {
        if self.item_count == 0 {
            return Err(ScrollcueError::validation(
                "RevealSpec item_count must be > 0",
            ));
        }
        Ok(())
    }
}

/// Animation targets for one revealed (or hidden) item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealStyle {
    pub opacity: f64,
    pub translate_y: f64,
    pub delay_ms: u64,
}

/// Map a visibility edge to the item's style targets.
///
/// Deterministic and idempotent: same inputs, same output, every time. An
/// out-of-range `index` just yields a larger delay.
pub fn reveal(visible: bool, index: usize, spec: &RevealSpec) -> RevealStyle {
    if !visible {
        return RevealStyle {
            opacity: 0.0,
            translate_y: HIDDEN_OFFSET_PX,
            delay_ms: 0,
        };
    }
    RevealStyle {
        opacity: 1.0,
        translate_y: 0.0,
        delay_ms: spec
            .base_delay_ms
            .saturating_add((index as u64).saturating_mul(spec.stagger_step_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: RevealSpec = RevealSpec {
        base_delay_ms: 100,
        stagger_step_ms: 120,
        item_count: 4,
    };

    #[test]
    fn hidden_is_index_independent() {
        for index in [0usize, 1, 3, 99] {
            let s = reveal(false, index, &SPEC);
            assert_eq!(s.opacity, 0.0);
            assert_eq!(s.translate_y, HIDDEN_OFFSET_PX);
            assert_eq!(s.delay_ms, 0);
        }
    }

    #[test]
    fn visible_staggers_exactly() {
        for index in 0..SPEC.item_count {
            let s = reveal(true, index, &SPEC);
            assert_eq!(s.opacity, 1.0);
            assert_eq!(s.translate_y, 0.0);
            assert_eq!(s.delay_ms, 100 + index as u64 * 120);
        }
    }

    #[test]
    fn out_of_range_index_is_not_clamped() {
        let s = reveal(true, 10, &SPEC);
        assert_eq!(s.delay_ms, 100 + 10 * 120);
    }

    #[test]
    fn mapping_is_idempotent() {
        assert_eq!(reveal(true, 2, &SPEC), reveal(true, 2, &SPEC));
        assert_eq!(reveal(false, 2, &SPEC), reveal(false, 2, &SPEC));
    }

    #[test]
    fn spec_rejects_zero_items() {
        let spec = RevealSpec {
            base_delay_ms: 0,
            stagger_step_ms: 0,
            item_count: 0,
        };
        assert!(spec.validate().is_err());
    }
}
