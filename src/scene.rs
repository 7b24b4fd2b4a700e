//! Serializable page description: sections, their choreography and the
//! mounted target set, validated before a stage is built from it.

use crate::{
    carousel::CarouselState,
    core::{ElementBounds, NodeId},
    error::{ScrollcueError, ScrollcueResult},
    observer::{Subscription, ViewportObserver},
    parallax::ParallaxBinding,
    reveal::RevealSpec,
    sequence::ChoreographedSequence,
    stage::{SectionConfig, Stage},
    timeline::{AnimationStep, Timeline},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub sections: Vec<SectionSpec>,
    /// Target nodes mounted in addition to the section roots.
    #[serde(default)]
    pub targets: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carousel: Option<CarouselSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    pub id: NodeId,
    /// Document-space bounds; drives parallax progress and the simulator's
    /// synthetic intersection ratios.
    pub bounds: ElementBounds,
    /// Intersection fraction required to count the section as visible.
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<RevealSpec>,
    #[serde(default)]
    pub steps: Vec<AnimationStep>,
    #[serde(default)]
    pub reverse_on_exit: bool,
    #[serde(default)]
    pub parallax: Vec<ParallaxBinding>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CarouselSpec {
    pub item_count: usize,
}

impl Scene {
    pub fn validate(&self) -> ScrollcueResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for section in &self.sections {
            if section.id.as_str().trim().is_empty() {
                return Err(ScrollcueError::validation("section id must be non-empty"));
            }
            if !seen.insert(&section.id) {
                return Err(ScrollcueError::validation(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            if !section.threshold.is_finite() || !(0.0..=1.0).contains(&section.threshold) {
                return Err(ScrollcueError::validation(format!(
                    "section '{}' threshold must be in [0, 1]",
                    section.id
                )));
            }
            // Bounds arrive raw from serde, so re-check the invariant here.
            ElementBounds::new(section.bounds.top, section.bounds.height)?;
            if let Some(spec) = &section.reveal {
                spec.validate()?;
            }
            for step in &section.steps {
                step.validate()?;
            }
            for binding in &section.parallax {
                ElementBounds::new(binding.bounds.top, binding.bounds.height)?;
            }
        }
        if let Some(carousel) = &self.carousel
            && carousel.item_count == 0
        {
            return Err(ScrollcueError::validation(
                "carousel item_count must be > 0",
            ));
        }
        Ok(())
    }

    /// Validate and mount everything into a fresh stage. Observer
    /// registrations carry no host-side resources here; a real host mounts
    /// sections itself with live subscriptions.
    pub fn build_stage(&self, viewport_height: f64) -> ScrollcueResult<Stage> {
        self.validate()?;

        let mut stage = Stage::new(viewport_height);
        for target in &self.targets {
            stage.mount_target(target.clone());
        }
        for section in &self.sections {
            let observer = ViewportObserver::observe(section.id.clone(), section.threshold)?;
            let sequence = if section.steps.is_empty() {
                None
            } else {
                Some(ChoreographedSequence::new(
                    Timeline::new(section.steps.clone()),
                    section.reverse_on_exit,
                ))
            };
            stage.mount_section(
                observer,
                Subscription::empty(),
                SectionConfig {
                    reveal: section.reveal,
                    sequence,
                    parallax: section.parallax.clone(),
                },
            )?;
        }
        if let Some(carousel) = &self.carousel {
            stage.set_carousel(CarouselState::new(carousel.item_count)?);
        }
        Ok(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Vec2, ease::Ease, timeline::StyleProperty};

    fn basic_scene() -> Scene {
        Scene {
            sections: vec![SectionSpec {
                id: NodeId::new("second-page"),
                bounds: ElementBounds {
                    top: 800.0,
                    height: 900.0,
                },
                threshold: 0.2,
                reveal: None,
                steps: vec![AnimationStep {
                    target: NodeId::new("bg"),
                    property: StyleProperty::Opacity,
                    from: 0.0,
                    to: 1.0,
                    duration_ms: 1500,
                    ease: Ease::OutQuad,
                    start_offset_ms: 0,
                }],
                reverse_on_exit: true,
                parallax: vec![ParallaxBinding {
                    layer: NodeId::new("bg-pattern-1"),
                    bounds: ElementBounds {
                        top: 800.0,
                        height: 900.0,
                    },
                    amplitude: Vec2::new(0.0, -100.0),
                    rotation_deg: 0.0,
                }],
            }],
            targets: vec![NodeId::new("bg"), NodeId::new("bg-pattern-1")],
            carousel: Some(CarouselSpec { item_count: 3 }),
        }
    }

    #[test]
    fn json_roundtrip() {
        let scene = basic_scene();
        let s = serde_json::to_string_pretty(&scene).unwrap();
        let de: Scene = serde_json::from_str(&s).unwrap();
        assert_eq!(de, scene);
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut scene = basic_scene();
        scene.sections.push(scene.sections[0].clone());
        assert!(scene.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_threshold() {
        let mut scene = basic_scene();
        scene.sections[0].threshold = 1.5;
        assert!(scene.validate().is_err());
    }

    #[test]
    fn validate_rejects_flat_bounds() {
        let mut scene = basic_scene();
        scene.sections[0].bounds.height = 0.0;
        assert!(scene.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_duration_step() {
        let mut scene = basic_scene();
        scene.sections[0].steps[0].duration_ms = 0;
        assert!(scene.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_carousel() {
        let mut scene = basic_scene();
        scene.carousel = Some(CarouselSpec { item_count: 0 });
        assert!(scene.validate().is_err());
    }

    #[test]
    fn build_stage_mounts_everything() {
        let scene = basic_scene();
        let mut stage = scene.build_stage(800.0).unwrap();
        assert_eq!(stage.carousel_index(), Some(0));

        stage.on_intersection(&NodeId::new("second-page"), 0.5, crate::core::Millis(0));
        let out = stage.frame(crate::core::Millis(750));
        assert!(
            out.deltas
                .iter()
                .any(|d| d.target.as_str() == "bg" && d.value > 0.0)
        );
    }
}
