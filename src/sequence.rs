//! The choreographed-sequence state machine: `Idle → Playing → Settled`, with
//! `Playing|Settled → Reversing → Idle` on trigger loss when reverse-on-exit
//! is enabled.
//!
//! A sequence owns one timeline and a play cursor. Triggers are edges, not
//! levels: re-firing while `Settled` is a no-op, re-firing while `Playing`
//! cancels and restarts (last-trigger-wins, never two concurrent timelines
//! against the same targets).

use crate::{
    core::Millis,
    timeline::{StyleDelta, Timeline},
};

pub const DEFAULT_REVERSE_SPEEDUP: u64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Idle,
    Playing,
    Settled,
    Reversing,
}

#[derive(Clone, Debug)]
pub struct ChoreographedSequence {
    timeline: Timeline,
    phase: Phase,
    started_at: Option<Millis>,
    reverse_on_exit: bool,
    reverse_speedup: u64,
}

impl ChoreographedSequence {
    pub fn new(timeline: Timeline, reverse_on_exit: bool) -> Self {
        Self {
            timeline,
            phase: Phase::Idle,
            started_at: None,
            reverse_on_exit,
            reverse_speedup: DEFAULT_REVERSE_SPEEDUP,
        }
    }

    pub fn with_reverse_speedup(mut self, speedup: u64) -> Self {
        self.reverse_speedup = speedup.max(1);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The trigger condition fired (section entered view).
    pub fn trigger_fired(&mut self, now: Millis) {
        match self.phase {
            // Terminal per trigger cycle: idempotent re-entry.
            Phase::Settled => {}
            Phase::Playing | Phase::Reversing => {
                tracing::debug!(from = ?self.phase, "trigger fired: cancel and restart");
                self.phase = Phase::Playing;
                self.started_at = Some(now);
            }
            Phase::Idle => {
                self.phase = Phase::Playing;
                self.started_at = Some(now);
            }
        }
    }

    /// The trigger condition was lost (scrolled back out of view).
    pub fn trigger_lost(&mut self, now: Millis) {
        if !self.reverse_on_exit {
            return;
        }
        if matches!(self.phase, Phase::Playing | Phase::Settled) {
            tracing::debug!(from = ?self.phase, "trigger lost: reversing");
            self.phase = Phase::Reversing;
            self.started_at = Some(now);
        }
    }

    /// Drop any in-flight play and return to `Idle`. Used on unmount.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.started_at = None;
    }

    /// Advance the cursor to `now` and return the style writes for this
    /// frame. Between state changes a settled or idle sequence emits nothing.
    pub fn sample(&mut self, now: Millis) -> Vec<StyleDelta> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        let elapsed = now.since(started_at);

        match self.phase {
            Phase::Idle | Phase::Settled => Vec::new(),
            Phase::Playing => {
                let total = self.timeline.total_duration_ms();
                if elapsed >= total {
                    self.phase = Phase::Settled;
                    self.timeline.sample(total)
                } else {
                    self.timeline.sample(elapsed)
                }
            }
            Phase::Reversing => {
                let total = self.timeline.reverse_duration_ms(self.reverse_speedup);
                if elapsed >= total {
                    self.phase = Phase::Idle;
                    self.started_at = None;
                    self.timeline.sample_reverse(total, self.reverse_speedup)
                } else {
                    self.timeline.sample_reverse(elapsed, self.reverse_speedup)
                }
            }
        }
    }
}
