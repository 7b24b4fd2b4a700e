#![forbid(unsafe_code)]

pub mod carousel;
pub mod core;
pub mod dsl;
pub mod ease;
pub mod error;
pub mod guide;
pub mod nav;
pub mod observer;
pub mod parallax;
pub mod reveal;
pub mod scene;
pub mod sequence;
pub mod stage;
pub mod telemetry;
pub mod timeline;

pub use carousel::CarouselState;
pub use self::core::{ElementBounds, Millis, NodeId, Vec2};
pub use dsl::{SceneBuilder, SectionBuilder, StepBuilder};
pub use ease::Ease;
pub use error::{ScrollcueError, ScrollcueResult};
pub use nav::{NavController, NavState, policy};
pub use observer::{
    DEFAULT_THRESHOLD, Subscription, ViewportObserver, VisibilityEdge, VisibilityState,
};
pub use parallax::{ParallaxBinding, scroll_progress};
pub use reveal::{HIDDEN_OFFSET_PX, RevealSpec, RevealStyle, reveal};
pub use scene::{CarouselSpec, Scene, SectionSpec};
pub use sequence::{ChoreographedSequence, DEFAULT_REVERSE_SPEEDUP, Phase};
pub use stage::{FrameOutput, SectionConfig, SectionReveal, Stage};
pub use telemetry::{SCROLL_THRESHOLD_PX, ScrollSnapshot, ScrollTelemetry};
pub use timeline::{AnimationStep, StyleDelta, StyleProperty, Timeline};
