//! The orchestration layer: passive sensors in, one coherent frame of
//! animation parameters out.
//!
//! Scroll and intersection callbacks only update sensor state or fire
//! triggers; all style resolution happens in [`Stage::frame`], once per
//! animation frame, against the latest snapshot. Everything is
//! single-threaded and safe to recompute redundantly.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    carousel::CarouselState,
    core::{Millis, NodeId},
    error::{ScrollcueError, ScrollcueResult},
    nav::{NavController, NavState},
    observer::{Subscription, ViewportObserver, VisibilityEdge},
    parallax::ParallaxBinding,
    reveal::{RevealSpec, RevealStyle, reveal},
    sequence::ChoreographedSequence,
    telemetry::{ScrollSnapshot, ScrollTelemetry},
    timeline::StyleDelta,
};

/// Static configuration for one mounted section.
#[derive(Clone, Debug, Default)]
pub struct SectionConfig {
    pub reveal: Option<RevealSpec>,
    pub sequence: Option<ChoreographedSequence>,
    pub parallax: Vec<ParallaxBinding>,
}

struct Section {
    observer: ViewportObserver,
    subscription: Subscription,
    reveal: Option<RevealSpec>,
    sequence: Option<ChoreographedSequence>,
    parallax: Vec<ParallaxBinding>,
}

/// Reveal styles for one section's staggered items.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionReveal {
    pub section: NodeId,
    pub items: Vec<RevealStyle>,
}

/// Everything the presentation layer consumes for one frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameOutput {
    pub at: Millis,
    pub nav: NavState,
    pub reveals: Vec<SectionReveal>,
    pub deltas: Vec<StyleDelta>,
}

pub struct Stage {
    telemetry: ScrollTelemetry,
    nav: NavController,
    carousel: Option<CarouselState>,
    targets: BTreeSet<NodeId>,
    sections: BTreeMap<NodeId, Section>,
}

impl Stage {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            telemetry: ScrollTelemetry::new(viewport_height),
            nav: NavController::new(),
            carousel: None,
            targets: BTreeSet::new(),
            sections: BTreeMap::new(),
        }
    }

    /// Register a target node that steps and bindings may write to. Steps
    /// against unmounted targets are skipped silently at frame time.
    pub fn mount_target(&mut self, id: NodeId) {
        self.targets.insert(id);
    }

    pub fn mount_section(
        &mut self,
        observer: ViewportObserver,
        subscription: Subscription,
        config: SectionConfig,
    ) -> ScrollcueResult<()> {
        let id = observer.node().clone();
        if self.sections.contains_key(&id) {
            return Err(ScrollcueError::validation(format!(
                "section '{id}' is already mounted"
            )));
        }
        if let Some(spec) = &config.reveal {
            spec.validate()?;
        }
        if let Some(seq) = &config.sequence {
            seq.timeline().validate()?;
        }
        self.targets.insert(id.clone());
        self.sections.insert(
            id,
            Section {
                observer,
                subscription,
                reveal: config.reveal,
                sequence: config.sequence,
                parallax: config.parallax,
            },
        );
        Ok(())
    }

    /// Cancel the section's running sequence, release its observer
    /// registration and forget its bindings. Pending steps never fire after
    /// this returns.
    pub fn unmount_section(&mut self, id: &NodeId) {
        let Some(mut section) = self.sections.remove(id) else {
            return;
        };
        if let Some(seq) = &mut section.sequence {
            seq.cancel();
        }
        section.subscription.dispose();
        self.targets.remove(id);
        tracing::debug!(section = %id, "section unmounted");
    }

    pub fn set_carousel(&mut self, carousel: CarouselState) {
        self.carousel = Some(carousel);
    }

    pub fn carousel_index(&self) -> Option<usize> {
        self.carousel.as_ref().map(CarouselState::index)
    }

    pub fn carousel_next(&mut self) -> Option<usize> {
        self.carousel.as_mut().map(CarouselState::next)
    }

    pub fn carousel_prev(&mut self) -> Option<usize> {
        self.carousel.as_mut().map(CarouselState::prev)
    }

    pub fn toggle_menu(&mut self) {
        self.nav.toggle_menu();
    }

    pub fn link_activated(&mut self) {
        self.nav.link_activated();
    }

    /// Record a scroll or resize sample. Coalesced redelivery of identical
    /// samples is harmless.
    pub fn on_scroll(&mut self, offset_y: f64, viewport_height: f64) -> ScrollSnapshot {
        self.telemetry.sample(offset_y, viewport_height)
    }

    /// Route an intersection-ratio sample to a section's observer. Visibility
    /// edges fire or release the section's sequence trigger; repeated
    /// same-side samples do nothing.
    pub fn on_intersection(
        &mut self,
        section_id: &NodeId,
        ratio: f64,
        now: Millis,
    ) -> Option<VisibilityEdge> {
        let Some(section) = self.sections.get_mut(section_id) else {
            tracing::debug!(section = %section_id, "intersection for unknown section ignored");
            return None;
        };
        let edge = section.observer.sample(ratio)?;
        if let Some(seq) = &mut section.sequence {
            match edge {
                VisibilityEdge::Entered => seq.trigger_fired(now),
                VisibilityEdge::Left => seq.trigger_lost(now),
            }
        }
        Some(edge)
    }

    /// Resolve one frame: nav state, per-section reveal styles and the style
    /// deltas from running sequences and parallax bindings.
    #[tracing::instrument(skip(self))]
    pub fn frame(&mut self, now: Millis) -> FrameOutput {
        let snapshot = self.telemetry.snapshot();
        let nav = self.nav.derive(snapshot);

        let mut reveals = Vec::new();
        let mut deltas = Vec::new();

        for (id, section) in &mut self.sections {
            if let Some(spec) = &section.reveal {
                let visible = section.observer.is_visible();
                reveals.push(SectionReveal {
                    section: id.clone(),
                    items: (0..spec.item_count)
                        .map(|i| reveal(visible, i, spec))
                        .collect(),
                });
            }

            if let Some(seq) = &mut section.sequence {
                for delta in seq.sample(now) {
                    push_if_mounted(&self.targets, &mut deltas, delta);
                }
            }

            for binding in &section.parallax {
                for delta in binding.sample(snapshot) {
                    push_if_mounted(&self.targets, &mut deltas, delta);
                }
            }
        }

        FrameOutput {
            at: now,
            nav,
            reveals,
            deltas,
        }
    }
}

fn push_if_mounted(targets: &BTreeSet<NodeId>, deltas: &mut Vec<StyleDelta>, delta: StyleDelta) {
    if !targets.contains(&delta.target) {
        // Missing target: skip the write, keep the rest of the sequence.
        tracing::debug!(target = %delta.target, "step target not mounted, skipping");
        return;
    }
    deltas.push(delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{ElementBounds, Vec2},
        ease::Ease,
        observer::DEFAULT_THRESHOLD,
        timeline::{AnimationStep, StyleProperty, Timeline},
    };

    fn fade_step(target: &str) -> AnimationStep {
        AnimationStep {
            target: NodeId::new(target),
            property: StyleProperty::Opacity,
            from: 0.0,
            to: 1.0,
            duration_ms: 1000,
            ease: Ease::Linear,
            start_offset_ms: 0,
        }
    }

    fn mount_fade_section(stage: &mut Stage, id: &str, step_target: &str) {
        let observer =
            ViewportObserver::observe(NodeId::new(id), DEFAULT_THRESHOLD).unwrap();
        stage
            .mount_section(
                observer,
                Subscription::empty(),
                SectionConfig {
                    reveal: None,
                    sequence: Some(ChoreographedSequence::new(
                        Timeline::new(vec![fade_step(step_target)]),
                        true,
                    )),
                    parallax: Vec::new(),
                },
            )
            .unwrap();
    }

    #[test]
    fn entry_edge_triggers_sequence_once() {
        let mut stage = Stage::new(800.0);
        mount_fade_section(&mut stage, "second-page", "bg");
        stage.mount_target(NodeId::new("bg"));

        assert_eq!(
            stage.on_intersection(&NodeId::new("second-page"), 0.5, Millis(0)),
            Some(VisibilityEdge::Entered)
        );
        // Still-visible samples do not re-trigger.
        assert_eq!(
            stage.on_intersection(&NodeId::new("second-page"), 0.6, Millis(16)),
            None
        );

        let out = stage.frame(Millis(500));
        assert_eq!(out.deltas.len(), 1);
        assert_eq!(out.deltas[0].value, 0.5);
    }

    #[test]
    fn unmounted_step_target_is_skipped_silently() {
        let mut stage = Stage::new(800.0);
        mount_fade_section(&mut stage, "second-page", "ghost");
        stage.on_intersection(&NodeId::new("second-page"), 0.5, Millis(0));

        let out = stage.frame(Millis(500));
        assert!(out.deltas.is_empty());
    }

    #[test]
    fn reveal_styles_follow_observer_visibility() {
        let mut stage = Stage::new(800.0);
        let observer =
            ViewportObserver::observe(NodeId::new("features"), DEFAULT_THRESHOLD).unwrap();
        stage
            .mount_section(
                observer,
                Subscription::empty(),
                SectionConfig {
                    reveal: Some(RevealSpec {
                        base_delay_ms: 100,
                        stagger_step_ms: 120,
                        item_count: 3,
                    }),
                    ..Default::default()
                },
            )
            .unwrap();

        let hidden = stage.frame(Millis(0));
        assert_eq!(hidden.reveals.len(), 1);
        assert!(hidden.reveals[0].items.iter().all(|s| s.opacity == 0.0));

        stage.on_intersection(&NodeId::new("features"), 0.3, Millis(100));
        let shown = stage.frame(Millis(116));
        assert!(shown.reveals[0].items.iter().all(|s| s.opacity == 1.0));
        assert_eq!(shown.reveals[0].items[2].delay_ms, 100 + 2 * 120);
    }

    #[test]
    fn nav_state_tracks_scroll() {
        let mut stage = Stage::new(800.0);
        assert!(stage.frame(Millis(0)).nav.nav_visible);

        stage.on_scroll(480.0, 800.0);
        let out = stage.frame(Millis(16));
        assert!(!out.nav.nav_visible);
        assert!(out.nav.booking_button_visible);
        assert!(out.nav.scrolled);
    }

    #[test]
    fn parallax_tracks_latest_snapshot() {
        let mut stage = Stage::new(800.0);
        let observer =
            ViewportObserver::observe(NodeId::new("second-page"), DEFAULT_THRESHOLD).unwrap();
        stage
            .mount_section(
                observer,
                Subscription::empty(),
                SectionConfig {
                    parallax: vec![ParallaxBinding {
                        layer: NodeId::new("bg-pattern-1"),
                        bounds: ElementBounds::new(800.0, 800.0).unwrap(),
                        amplitude: Vec2::new(0.0, -100.0),
                        rotation_deg: 0.0,
                    }],
                    ..Default::default()
                },
            )
            .unwrap();
        stage.mount_target(NodeId::new("bg-pattern-1"));

        stage.on_scroll(1200.0, 800.0);
        let out = stage.frame(Millis(0));
        let ty = out
            .deltas
            .iter()
            .find(|d| d.property == StyleProperty::TranslateY)
            .unwrap();
        assert_eq!(ty.value, -50.0);
    }

    #[test]
    fn unmount_cancels_sequence_and_releases_subscription() {
        use std::sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        };

        let disposed = Arc::new(AtomicUsize::new(0));
        let d = disposed.clone();

        let mut stage = Stage::new(800.0);
        let observer =
            ViewportObserver::observe(NodeId::new("second-page"), DEFAULT_THRESHOLD).unwrap();
        stage
            .mount_section(
                observer,
                Subscription::new(move || {
                    d.fetch_add(1, Ordering::SeqCst);
                }),
                SectionConfig {
                    sequence: Some(ChoreographedSequence::new(
                        Timeline::new(vec![fade_step("second-page")]),
                        false,
                    )),
                    ..Default::default()
                },
            )
            .unwrap();

        stage.on_intersection(&NodeId::new("second-page"), 0.5, Millis(0));
        stage.unmount_section(&NodeId::new("second-page"));

        assert_eq!(disposed.load(Ordering::SeqCst), 1);
        // No dangling steps fire after teardown.
        assert!(stage.frame(Millis(500)).deltas.is_empty());
        // Unmounting twice is harmless.
        stage.unmount_section(&NodeId::new("second-page"));
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_mount_is_rejected() {
        let mut stage = Stage::new(800.0);
        mount_fade_section(&mut stage, "s", "bg");
        let observer = ViewportObserver::observe(NodeId::new("s"), DEFAULT_THRESHOLD).unwrap();
        assert!(
            stage
                .mount_section(observer, Subscription::empty(), SectionConfig::default())
                .is_err()
        );
    }

    #[test]
    fn scroll_oscillation_storm_settles_cleanly() {
        let mut stage = Stage::new(800.0);
        mount_fade_section(&mut stage, "s", "bg");
        stage.mount_target(NodeId::new("bg"));

        for i in 0..50u64 {
            let now = Millis(i * 20);
            let ratio = if i % 2 == 0 { 0.9 } else { 0.0 };
            stage.on_intersection(&NodeId::new("s"), ratio, now);
            let out = stage.frame(now.add(10));
            // Never more than one write per channel per frame.
            assert!(out.deltas.len() <= 1);
        }
    }

    #[test]
    fn carousel_round_trip() {
        let mut stage = Stage::new(800.0);
        assert_eq!(stage.carousel_next(), None);
        stage.set_carousel(CarouselState::new(3).unwrap());
        assert_eq!(stage.carousel_next(), Some(1));
        assert_eq!(stage.carousel_prev(), Some(0));
        assert_eq!(stage.carousel_prev(), Some(2));
    }

    #[test]
    fn dormant_observer_keeps_section_hidden() {
        let mut stage = Stage::new(800.0);
        stage
            .mount_section(
                ViewportObserver::dormant(NodeId::new("stats")),
                Subscription::empty(),
                SectionConfig {
                    reveal: Some(RevealSpec {
                        base_delay_ms: 0,
                        stagger_step_ms: 100,
                        item_count: 2,
                    }),
                    ..Default::default()
                },
            )
            .unwrap();

        stage.on_intersection(&NodeId::new("stats"), 1.0, Millis(0));
        let out = stage.frame(Millis(16));
        assert!(out.reveals[0].items.iter().all(|s| s.opacity == 0.0));
    }

    #[test]
    fn sequence_phase_visible_through_full_cycle() {
        let mut stage = Stage::new(800.0);
        mount_fade_section(&mut stage, "s", "bg");
        stage.mount_target(NodeId::new("bg"));
        let id = NodeId::new("s");

        stage.on_intersection(&id, 0.5, Millis(0));
        stage.frame(Millis(1000));
        // Leaving view reverses; reverse completes at half duration.
        stage.on_intersection(&id, 0.0, Millis(1100));
        let mid = stage.frame(Millis(1350));
        assert_eq!(mid.deltas[0].value, 0.5);
        let done = stage.frame(Millis(1600));
        assert_eq!(done.deltas[0].value, 0.0);
        let idle = stage.frame(Millis(1700));
        assert!(idle.deltas.is_empty());
    }
}
