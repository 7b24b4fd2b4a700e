use crate::{
    core::{ElementBounds, NodeId, Vec2},
    ease::Ease,
    error::{ScrollcueError, ScrollcueResult},
    observer::DEFAULT_THRESHOLD,
    parallax::ParallaxBinding,
    reveal::RevealSpec,
    scene::{CarouselSpec, Scene, SectionSpec},
    timeline::{AnimationStep, StyleProperty},
};

pub struct SceneBuilder {
    sections: Vec<SectionSpec>,
    targets: Vec<NodeId>,
    carousel: Option<CarouselSpec>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            targets: Vec::new(),
            carousel: None,
        }
    }

    pub fn section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }

    pub fn target(mut self, id: impl Into<String>) -> Self {
        self.targets.push(NodeId::new(id));
        self
    }

    pub fn carousel(mut self, item_count: usize) -> Self {
        self.carousel = Some(CarouselSpec { item_count });
        self
    }

    pub fn build(self) -> ScrollcueResult<Scene> {
        let scene = Scene {
            sections: self.sections,
            targets: self.targets,
            carousel: self.carousel,
        };
        scene.validate()?;
        Ok(scene)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SectionBuilder {
    id: String,
    bounds: ElementBounds,
    threshold: f64,
    reveal: Option<RevealSpec>,
    steps: Vec<AnimationStep>,
    reverse_on_exit: bool,
    parallax: Vec<ParallaxBinding>,
}

impl SectionBuilder {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            bounds: ElementBounds { top, height },
            threshold: DEFAULT_THRESHOLD,
            reveal: None,
            steps: Vec::new(),
            reverse_on_exit: false,
            parallax: Vec::new(),
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn reveal(mut self, spec: RevealSpec) -> Self {
        self.reveal = Some(spec);
        self
    }

    pub fn step(mut self, step: AnimationStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = AnimationStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn reverse_on_exit(mut self, reverse: bool) -> Self {
        self.reverse_on_exit = reverse;
        self
    }

    /// Scrub `layer` by this section's own bounds.
    pub fn parallax_layer(
        mut self,
        layer: impl Into<String>,
        amplitude: Vec2,
        rotation_deg: f64,
    ) -> Self {
        self.parallax.push(ParallaxBinding {
            layer: NodeId::new(layer),
            bounds: self.bounds,
            amplitude,
            rotation_deg,
        });
        self
    }

    pub fn build(self) -> ScrollcueResult<SectionSpec> {
        if self.id.trim().is_empty() {
            return Err(ScrollcueError::validation("section id must be non-empty"));
        }
        ElementBounds::new(self.bounds.top, self.bounds.height)?;
        Ok(SectionSpec {
            id: NodeId::new(self.id),
            bounds: self.bounds,
            threshold: self.threshold,
            reveal: self.reveal,
            steps: self.steps,
            reverse_on_exit: self.reverse_on_exit,
            parallax: self.parallax,
        })
    }
}

pub struct StepBuilder {
    target: String,
    property: StyleProperty,
    from: f64,
    to: f64,
    duration_ms: u64,
    ease: Ease,
    start_offset_ms: u64,
}

impl StepBuilder {
    pub fn new(target: impl Into<String>, property: StyleProperty) -> Self {
        Self {
            target: target.into(),
            property,
            from: 0.0,
            to: 1.0,
            duration_ms: 1000,
            ease: Ease::Linear,
            start_offset_ms: 0,
        }
    }

    pub fn from_to(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn start_offset_ms(mut self, ms: u64) -> Self {
        self.start_offset_ms = ms;
        self
    }

    pub fn build(self) -> ScrollcueResult<AnimationStep> {
        let step = AnimationStep {
            target: NodeId::new(self.target),
            property: self.property,
            from: self.from,
            to: self.to,
            duration_ms: self.duration_ms,
            ease: self.ease,
            start_offset_ms: self.start_offset_ms,
        };
        step.validate()?;
        Ok(step)
    }
}
