//! # Scrollcue guide (v0.1.0)
//!
//! This module is a standalone walkthrough of scrollcue's architecture and public API.
//! It exists so integrations share one mental model of what "a frame" means here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`ScrollSnapshot`](crate::ScrollSnapshot): an immutable sample of scroll offset +
//!   viewport height, replaced wholesale on every scroll/resize event
//! - [`ViewportObserver`](crate::ViewportObserver): edge-triggered visibility for one node
//! - [`Timeline`](crate::Timeline): an immutable ordered list of
//!   [`AnimationStep`](crate::AnimationStep)s; only the play cursor is mutable
//! - [`ChoreographedSequence`](crate::ChoreographedSequence): the
//!   `Idle → Playing → Settled` (and `→ Reversing → Idle`) state machine over a timeline
//! - [`ParallaxBinding`](crate::ParallaxBinding): a layer offset scrubbed by scroll
//!   progress instead of a timer
//! - [`Stage`](crate::Stage): the orchestrator; sensors feed it, it emits one
//!   [`FrameOutput`](crate::FrameOutput) per animation frame
//!
//! The per-frame pipeline is explicitly staged:
//!
//! 1. Sensor callbacks update state: [`Stage::on_scroll`](crate::Stage::on_scroll),
//!    [`Stage::on_intersection`](crate::Stage::on_intersection)
//! 2. Frame resolution derives everything: [`Stage::frame`](crate::Stage::frame)
//!
//! Step (1) never does style work and step (2) never mutates sensor state, so
//! coalesced or redundant event delivery is always safe.
//!
//! ---
//!
//! ## "No clock in the engine" (and why)
//!
//! Nothing in this crate reads wall time. Every sampling entry point takes a
//! [`Millis`](crate::Millis) timestamp supplied by the caller: the host passes its
//! frame-callback time, tests pass a virtual clock. That keeps sequence playback
//! deterministic and lets the whole state machine be tested without sleeping.
//!
//! ---
//!
//! ## Edges, not levels
//!
//! Observers report threshold *crossings*. A section that stays in view across a
//! thousand scroll ticks produces exactly one `Entered` edge, so a sequence fires
//! once, settles, and ignores re-fires until the trigger is lost. Trigger loss on a
//! reverse-enabled sequence plays the steps back inverted — shortened, with zero
//! stagger — and returns to `Idle`, ready for the next entry.
//!
//! ---
//!
//! ## Degraded-but-safe failure modes
//!
//! - A step whose target is not mounted is skipped; the rest of the sequence runs.
//! - A failed observer registration yields a [`ViewportObserver::dormant`](crate::ViewportObserver::dormant)
//!   observer: its section simply never reveals.
//! - Unmounting a section cancels its sequence and disposes its
//!   [`Subscription`](crate::Subscription), so no step fires after teardown.
//!
//! Nothing here is fatal: every failure degrades to "the animation does not play".
//!
//! ---
//!
//! ## Scenes
//!
//! A [`Scene`](crate::Scene) is the serde-friendly description of a page: sections with
//! bounds, thresholds, reveal specs, steps and parallax layers, plus the mounted
//! target list. [`Scene::build_stage`](crate::Scene::build_stage) validates and mounts
//! it. The `scrollcue` binary replays a scene against a synthetic scroll sweep and
//! dumps every frame as JSON, which is the quickest way to inspect choreography.
