//! Per-type transition plans.
//!
//! A plan lists the descriptors a transition plays and which of them carries
//! the completion. Building it is pure; [`CheckBox`](super::CheckBox) hands
//! the result to the renderer.

use crate::animation::{AnimationBuilder, AnimationDescriptor, FillMode, TimingFunction};
use crate::layer::LayerKind;
use crate::path::Path;
use crate::shapes::{CheckMarkKind, PathGenerator};

use super::config::{AnimationType, CheckBoxConfig};

/// Bounce amplitude of the fill animation, independent of the box type.
const FILL_BOUNCE_AMPLITUDE: f32 = 0.18;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlannedAnimation {
    pub layer: LayerKind,
    pub descriptor: AnimationDescriptor,
    /// Reports the end of the whole transition
    pub completes: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TransitionPlan {
    /// Path the checkmark layer is rebuilt with before playing
    pub check_mark_path: Option<Path>,
    pub animations: Vec<PlannedAnimation>,
}

impl TransitionPlan {
    fn play(mut self, layer: LayerKind, descriptor: AnimationDescriptor) -> Self {
        self.animations.push(PlannedAnimation {
            layer,
            descriptor,
            completes: false,
        });
        self
    }

    fn play_completing(mut self, layer: LayerKind, descriptor: AnimationDescriptor) -> Self {
        self.animations.push(PlannedAnimation {
            layer,
            descriptor,
            completes: true,
        });
        self
    }

    fn with_check_mark_path(mut self, path: Path) -> Self {
        self.check_mark_path = Some(path);
        self
    }

    /// Drop the on box animations, moving a completion they carried onto the
    /// checkmark animation that ends last.
    fn without_box(mut self) -> Self {
        let lost_completion = self
            .animations
            .iter()
            .any(|a| a.layer == LayerKind::OnBox && a.completes);
        self.animations.retain(|a| a.layer != LayerKind::OnBox);

        if lost_completion {
            let last = self
                .animations
                .iter_mut()
                .max_by_key(|a| a.descriptor.end_time());
            if let Some(last) = last {
                last.completes = true;
            }
        }
        self
    }

    pub fn completing(&self) -> Option<&PlannedAnimation> {
        self.animations.iter().find(|a| a.completes)
    }
}

/// Animations that bring the on box and checkmark in.
pub(crate) fn on_transition(config: &CheckBoxConfig, paths: &PathGenerator) -> TransitionPlan {
    let d = config.animation_duration;
    let anim = AnimationBuilder::new(d);
    let amplitude = paths.box_type.shape().bounce_amplitude;

    let plan = match config.animation_type {
        AnimationType::Stroke => TransitionPlan::default()
            .play(LayerKind::OnBox, anim.stroke(false))
            .play_completing(LayerKind::CheckMark, anim.stroke(false)),
        AnimationType::Fill => TransitionPlan::default()
            .play_completing(
                LayerKind::OnBox,
                anim.bounce(1, FILL_BOUNCE_AMPLITUDE, false),
            )
            .play(LayerKind::CheckMark, anim.opacity(false)),
        AnimationType::Bounce => TransitionPlan::default()
            .play_completing(LayerKind::CheckMark, anim.bounce(1, amplitude, false))
            .play(
                LayerKind::OnBox,
                anim.opacity(false).with_duration(d.div_f32(1.4)),
            ),
        AnimationType::Flat => {
            let flat = paths.check_mark_path(CheckMarkKind::Flat);
            let tick = paths.check_mark_path(CheckMarkKind::Short);
            let fade_in = anim.opacity(false).with_duration(d / 5);
            TransitionPlan::default()
                .play_completing(LayerKind::CheckMark, anim.morph(&flat, &tick))
                .play(LayerKind::OnBox, fade_in.clone())
                .play(LayerKind::CheckMark, fade_in)
        }
        AnimationType::OneStroke => {
            // Drawn from the tip of the long tick back into the box stroke.
            let long = paths.check_mark_path(CheckMarkKind::Long).reversed();
            let tick = paths.check_mark_path(CheckMarkKind::Short).reversed();
            let box_stroke = anim.stroke(false).with_duration(d / 2);
            let check_stroke = anim
                .stroke(false)
                .with_duration(d / 3)
                .with_delay(d / 2)
                .with_fill_mode(FillMode::Backwards);
            let settle = anim
                .morph(&long, &tick)
                .with_duration(d / 6)
                .with_delay(d * 5 / 6)
                .with_timing(TimingFunction::EaseOut)
                .with_fill_mode(FillMode::Forwards);
            TransitionPlan::default()
                .with_check_mark_path(long)
                .play(LayerKind::OnBox, box_stroke)
                .play(LayerKind::CheckMark, check_stroke)
                .play_completing(LayerKind::CheckMark, settle)
        }
        AnimationType::Fade => TransitionPlan::default()
            .play(LayerKind::OnBox, anim.opacity(false))
            .play_completing(LayerKind::CheckMark, anim.opacity(false)),
    };

    if config.hide_box {
        plan.without_box()
    } else {
        plan
    }
}

/// Animations that take the on box and checkmark out. The completion detaches
/// both layers when the checkbox is still off.
pub(crate) fn off_transition(config: &CheckBoxConfig, paths: &PathGenerator) -> TransitionPlan {
    let d = config.animation_duration;
    let anim = AnimationBuilder::new(d);
    let amplitude = paths.box_type.shape().bounce_amplitude;

    let plan = match config.animation_type {
        AnimationType::Stroke => TransitionPlan::default()
            .play(LayerKind::OnBox, anim.stroke(true))
            .play_completing(LayerKind::CheckMark, anim.stroke(true)),
        AnimationType::Fill => TransitionPlan::default()
            .play_completing(
                LayerKind::OnBox,
                anim.bounce(1, FILL_BOUNCE_AMPLITUDE, true),
            )
            .play(LayerKind::CheckMark, anim.opacity(true)),
        AnimationType::Bounce => TransitionPlan::default()
            .play(
                LayerKind::CheckMark,
                anim.bounce(1, amplitude, true).with_duration(d.div_f32(1.1)),
            )
            .play_completing(LayerKind::OnBox, anim.opacity(true)),
        AnimationType::Flat => {
            let flat = paths.check_mark_path(CheckMarkKind::Flat);
            let tick = paths.check_mark_path(CheckMarkKind::Short);
            TransitionPlan::default()
                .play_completing(LayerKind::CheckMark, anim.morph(&tick, &flat))
                .play(LayerKind::OnBox, anim.opacity(true))
                .play(LayerKind::CheckMark, anim.opacity(true))
        }
        AnimationType::OneStroke => {
            let long = paths.check_mark_path(CheckMarkKind::Long).reversed();
            let tick = paths.check_mark_path(CheckMarkKind::Short).reversed();
            let stretch = anim.morph(&tick, &long).with_duration(d / 6);
            let check_erase = anim
                .stroke(true)
                .with_duration(d / 3)
                .with_delay(d / 6);
            let box_erase = anim
                .stroke(true)
                .with_duration(d / 2)
                .with_delay(d / 2);
            TransitionPlan::default()
                .with_check_mark_path(long)
                .play(LayerKind::CheckMark, stretch)
                .play(LayerKind::CheckMark, check_erase)
                .play_completing(LayerKind::OnBox, box_erase)
        }
        AnimationType::Fade => TransitionPlan::default()
            .play(LayerKind::OnBox, anim.opacity(true))
            .play_completing(LayerKind::CheckMark, anim.opacity(true)),
    };

    if config.hide_box {
        plan.without_box()
    } else {
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimatedProperty, AnimationValue, NEAR_ZERO_SCALE};
    use crate::shapes::BoxType;
    use std::time::Duration;

    const ALL_TYPES: [AnimationType; 6] = [
        AnimationType::Stroke,
        AnimationType::Fill,
        AnimationType::Bounce,
        AnimationType::Flat,
        AnimationType::OneStroke,
        AnimationType::Fade,
    ];

    fn config(animation_type: AnimationType) -> CheckBoxConfig {
        CheckBoxConfig {
            animation_type,
            ..CheckBoxConfig::default()
        }
    }

    fn paths(box_type: BoxType) -> PathGenerator {
        PathGenerator::new(40.0, 2.0, box_type)
    }

    fn targets(plan: &TransitionPlan) -> Vec<(LayerKind, AnimatedProperty)> {
        plan.animations
            .iter()
            .map(|a| (a.layer, a.descriptor.property))
            .collect()
    }

    #[test]
    fn test_every_plan_has_exactly_one_completion() {
        for animation_type in ALL_TYPES {
            for hide_box in [false, true] {
                let config = CheckBoxConfig {
                    hide_box,
                    ..config(animation_type)
                };
                for plan in [
                    on_transition(&config, &paths(BoxType::Circle)),
                    off_transition(&config, &paths(BoxType::Circle)),
                ] {
                    let count = plan.animations.iter().filter(|a| a.completes).count();
                    assert_eq!(count, 1, "{:?} hide_box={}", animation_type, hide_box);
                }
            }
        }
    }

    #[test]
    fn test_stroke_draws_both_layers() {
        let plan = on_transition(&config(AnimationType::Stroke), &paths(BoxType::Circle));
        assert_eq!(
            targets(&plan),
            vec![
                (LayerKind::OnBox, AnimatedProperty::StrokeEnd),
                (LayerKind::CheckMark, AnimatedProperty::StrokeEnd),
            ]
        );
        assert_eq!(plan.completing().unwrap().layer, LayerKind::CheckMark);
        assert!(plan.check_mark_path.is_none());

        let off = off_transition(&config(AnimationType::Stroke), &paths(BoxType::Circle));
        let erase = &off.completing().unwrap().descriptor;
        assert_eq!(erase.final_value(), Some(&AnimationValue::Scalar(0.0)));
    }

    #[test]
    fn test_bounce_amplitude_follows_box_type() {
        let peak = |box_type| {
            let plan = on_transition(&config(AnimationType::Bounce), &paths(box_type));
            let bounce = &plan.completing().unwrap().descriptor;
            assert_eq!(bounce.property, AnimatedProperty::Transform);
            bounce.keyframe_list().unwrap()[1].value.as_scalar().unwrap()
        };
        assert!((peak(BoxType::Circle) - 1.35).abs() < 1e-6);
        assert!((peak(BoxType::Square) - 1.20).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_durations() {
        let cfg = config(AnimationType::Bounce);
        let on = on_transition(&cfg, &paths(BoxType::Circle));
        let fade = on
            .animations
            .iter()
            .find(|a| a.layer == LayerKind::OnBox)
            .unwrap();
        assert_eq!(fade.descriptor.duration, Duration::from_millis(500).div_f32(1.4));

        let off = off_transition(&cfg, &paths(BoxType::Circle));
        let shrink = off
            .animations
            .iter()
            .find(|a| a.layer == LayerKind::CheckMark)
            .unwrap();
        assert!(!shrink.completes);
        assert_eq!(shrink.descriptor.duration, Duration::from_millis(500).div_f32(1.1));
        assert_eq!(
            shrink.descriptor.final_value(),
            Some(&AnimationValue::Scale(NEAR_ZERO_SCALE))
        );
        assert_eq!(off.completing().unwrap().layer, LayerKind::OnBox);
    }

    #[test]
    fn test_fill_uses_fixed_amplitude_on_box() {
        let plan = on_transition(&config(AnimationType::Fill), &paths(BoxType::Square));
        let grow = plan.completing().unwrap();
        assert_eq!(grow.layer, LayerKind::OnBox);
        let frames = grow.descriptor.keyframe_list().unwrap();
        assert!((frames[1].value.as_scalar().unwrap() - 1.18).abs() < 1e-6);
    }

    #[test]
    fn test_flat_morphs_from_line() {
        let generator = paths(BoxType::Circle);
        let plan = on_transition(&config(AnimationType::Flat), &generator);
        let morph = &plan.completing().unwrap().descriptor;
        assert_eq!(morph.property, AnimatedProperty::Path);
        assert_eq!(
            morph.first_value().and_then(AnimationValue::as_path),
            Some(&generator.check_mark_path(CheckMarkKind::Flat))
        );
        assert_eq!(
            morph.final_value().and_then(AnimationValue::as_path),
            Some(&generator.check_mark_path(CheckMarkKind::Short))
        );
        let fades: Vec<_> = plan
            .animations
            .iter()
            .filter(|a| a.descriptor.property == AnimatedProperty::Opacity)
            .collect();
        assert_eq!(fades.len(), 2);
        assert!(fades
            .iter()
            .all(|a| a.descriptor.duration == Duration::from_millis(100)));
    }

    #[test]
    fn test_one_stroke_is_sequenced() {
        let generator = paths(BoxType::Square);
        let plan = on_transition(&config(AnimationType::OneStroke), &generator);
        let long = generator.check_mark_path(CheckMarkKind::Long).reversed();
        assert_eq!(plan.check_mark_path.as_ref(), Some(&long));

        let d = Duration::from_millis(500);
        let delays: Vec<_> = plan.animations.iter().map(|a| a.descriptor.delay).collect();
        assert_eq!(delays, vec![Duration::ZERO, d / 2, d * 5 / 6]);

        let settle = plan.completing().unwrap();
        assert_eq!(settle.descriptor.property, AnimatedProperty::Path);
        assert_eq!(settle.descriptor.timing, TimingFunction::EaseOut);
        assert!(settle.descriptor.fill_mode.holds_final_value());
        assert!((settle.descriptor.end_time().as_secs_f32() - d.as_secs_f32()).abs() < 1e-6);

        let off = off_transition(&config(AnimationType::OneStroke), &generator);
        let erase = off.completing().unwrap();
        assert_eq!(erase.layer, LayerKind::OnBox);
        assert_eq!(erase.descriptor.end_time(), d);
    }

    #[test]
    fn test_hidden_box_moves_completion_to_check_mark() {
        for animation_type in ALL_TYPES {
            let config = CheckBoxConfig {
                hide_box: true,
                ..config(animation_type)
            };
            for plan in [
                on_transition(&config, &paths(BoxType::Circle)),
                off_transition(&config, &paths(BoxType::Circle)),
            ] {
                assert!(plan.animations.iter().all(|a| a.layer == LayerKind::CheckMark));
                let completing = plan.completing().unwrap();
                let last_end = plan
                    .animations
                    .iter()
                    .map(|a| a.descriptor.end_time())
                    .max()
                    .unwrap();
                assert_eq!(completing.descriptor.end_time(), last_end);
            }
        }
    }
}
