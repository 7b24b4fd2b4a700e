//! Declarative timelines: an immutable ordered list of animation steps plus
//! pure sampling. Only the play cursor (held by the owning sequence) is
//! mutable; the steps never change after construction.

use crate::{
    core::NodeId,
    ease::Ease,
    error::{ScrollcueError, ScrollcueResult},
};

/// Style channel a step animates. Each step drives exactly one channel.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum StyleProperty {
    Opacity,
    TranslateX,
    TranslateY,
    Rotation,
    Scale,
}

/// One timed animation step against a single target property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationStep {
    pub target: NodeId,
    pub property: StyleProperty,
    pub from: f64,
    pub to: f64,
    pub duration_ms: u64,
    pub ease: Ease,
    pub start_offset_ms: u64, // relative to sequence start
}

impl AnimationStep {
    pub fn validate(&self) -> ScrollcueResult<()> {
        if self.target.as_str().trim().is_empty() {
            return Err(ScrollcueError::timeline("step target must be non-empty"));
        }
        if self.duration_ms == 0 {
            return Err(ScrollcueError::timeline("step duration_ms must be > 0"));
        }
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(ScrollcueError::timeline(
                "step from/to values must be finite",
            ));
        }
        Ok(())
    }

    fn end_ms(&self) -> u64 {
        self.start_offset_ms.saturating_add(self.duration_ms)
    }

    /// Forward value at `elapsed` ms since sequence start.
    fn value_at(&self, elapsed_ms: u64) -> f64 {
        if elapsed_ms < self.start_offset_ms {
            return self.from;
        }
        if elapsed_ms >= self.end_ms() {
            return self.to;
        }
        let t = (elapsed_ms - self.start_offset_ms) as f64 / self.duration_ms as f64;
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// Reverse value at `elapsed` ms since reverse start: retracts from `to`
    /// back to `from` over a shortened window starting at offset zero.
    fn reverse_value_at(&self, elapsed_ms: u64, speedup: u64) -> f64 {
        let dur = reverse_step_duration(self.duration_ms, speedup);
        if elapsed_ms >= dur {
            return self.from;
        }
        let t = elapsed_ms as f64 / dur as f64;
        self.to + (self.from - self.to) * self.ease.apply(t)
    }
}

fn reverse_step_duration(duration_ms: u64, speedup: u64) -> u64 {
    (duration_ms / speedup.max(1)).max(1)
}

/// A resolved style write for one target property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleDelta {
    pub target: NodeId,
    pub property: StyleProperty,
    pub value: f64,
}

/// Ordered, immutable list of steps. Steps with overlapping windows run
/// concurrently; conflicting writes to the same `(target, property)` resolve
/// last-write-wins by step order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    steps: Vec<AnimationStep>,
}

impl Timeline {
    pub fn new(steps: Vec<AnimationStep>) -> Self {
        Self { steps }
    }

    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Word-by-word text reveal: word `k` starts at `k * stagger_step_ms`,
    /// animating opacity, vertical offset and rotation together.
    pub fn word_reveal(words: &[NodeId], stagger_step_ms: u64) -> Self {
        const WORD_DURATION_MS: u64 = 800;
        const WORD_OFFSET_PX: f64 = 50.0;
        const WORD_ROTATION_DEG: f64 = -90.0;

        let mut steps = Vec::with_capacity(words.len() * 3);
        for (k, word) in words.iter().enumerate() {
            let start_offset_ms = k as u64 * stagger_step_ms;
            for (property, from, to) in [
                (StyleProperty::Opacity, 0.0, 1.0),
                (StyleProperty::TranslateY, WORD_OFFSET_PX, 0.0),
                (StyleProperty::Rotation, WORD_ROTATION_DEG, 0.0),
            ] {
                steps.push(AnimationStep {
                    target: word.clone(),
                    property,
                    from,
                    to,
                    duration_ms: WORD_DURATION_MS,
                    ease: Ease::OutQuad,
                    start_offset_ms,
                });
            }
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn validate(&self) -> ScrollcueResult<()> {
        for step in &self.steps {
            step.validate()?;
        }
        Ok(())
    }

    /// Full forward play length.
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(AnimationStep::end_ms).max().unwrap_or(0)
    }

    /// Full reverse play length: every step retracts from offset zero with
    /// its duration shortened by `speedup`.
    pub fn reverse_duration_ms(&self, speedup: u64) -> u64 {
        self.steps
            .iter()
            .map(|s| reverse_step_duration(s.duration_ms, speedup))
            .max()
            .unwrap_or(0)
    }

    /// Sample every step at `elapsed` ms since sequence start.
    ///
    /// Later steps overwrite earlier writes to the same channel, so the
    /// later-starting step's final target wins regardless of wall-clock
    /// completion order.
    pub fn sample(&self, elapsed_ms: u64) -> Vec<StyleDelta> {
        let mut deltas: Vec<StyleDelta> = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            write_delta(&mut deltas, step, step.value_at(elapsed_ms));
        }
        deltas
    }

    /// Sample the reverse play at `elapsed` ms since reverse start. Steps
    /// retract together (zero stagger) and apply in reverse order, so the
    /// first-declared step's `from` value stands at rest.
    pub fn sample_reverse(&self, elapsed_ms: u64, speedup: u64) -> Vec<StyleDelta> {
        let mut deltas: Vec<StyleDelta> = Vec::with_capacity(self.steps.len());
        for step in self.steps.iter().rev() {
            write_delta(&mut deltas, step, step.reverse_value_at(elapsed_ms, speedup));
        }
        deltas
    }
}

fn write_delta(deltas: &mut Vec<StyleDelta>, step: &AnimationStep, value: f64) {
    if let Some(existing) = deltas
        .iter_mut()
        .find(|d| d.target == step.target && d.property == step.property)
    {
        existing.value = value;
        return;
    }
    deltas.push(StyleDelta {
        target: step.target.clone(),
        property: step.property,
        value,
    });
}
