mod animatable;
mod descriptor;
mod timing;

pub use animatable::Animatable;
pub use descriptor::{
    AnimatedProperty, AnimationDescriptor, AnimationValue, AnimationValues, FillMode, Keyframe,
};
pub use timing::TimingFunction;

use std::time::Duration;

use crate::path::Path;

/// Scale used instead of zero at the end of a reversed bounce, so the host
/// never receives a singular transform.
pub const NEAR_ZERO_SCALE: f32 = 0.0001;

/// Builds the descriptors for checkbox transitions.
///
/// Every descriptor starts with the builder's duration and an ease-in-out
/// curve; callers adjust individual ones with the `with_*` methods.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationBuilder {
    duration: Duration,
}

impl AnimationBuilder {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Draws (0 -> 1) or erases (1 -> 0) the stroke, holding the final value.
    pub fn stroke(&self, reverse: bool) -> AnimationDescriptor {
        self.unit_range(AnimatedProperty::StrokeEnd, reverse)
    }

    /// Fades in (0 -> 1) or out (1 -> 0), holding the final value.
    pub fn opacity(&self, reverse: bool) -> AnimationDescriptor {
        self.unit_range(AnimatedProperty::Opacity, reverse)
    }

    fn unit_range(&self, property: AnimatedProperty, reverse: bool) -> AnimationDescriptor {
        let (from, to) = if reverse { (1.0, 0.0) } else { (0.0, 1.0) };
        AnimationDescriptor::basic(
            property,
            AnimationValue::Scalar(from),
            AnimationValue::Scalar(to),
            self.duration,
        )
        .with_fill_mode(FillMode::Forwards)
    }

    /// Interpolates the layer path from `from` to `to`. Not held: the layer
    /// shows its own path once the morph ends.
    pub fn morph(&self, from: &Path, to: &Path) -> AnimationDescriptor {
        AnimationDescriptor::basic(
            AnimatedProperty::Path,
            AnimationValue::Path(from.clone()),
            AnimationValue::Path(to.clone()),
            self.duration,
        )
    }

    /// Damped bounce of the layer scale.
    ///
    /// Starts at 0 (or 1 when `reverse`), overshoots on odd bounces and
    /// undershoots on even ones with amplitude `amplitude / i`, then lands on
    /// 1 (or [`NEAR_ZERO_SCALE`] when `reverse`). Keyframes are evenly spaced
    /// over the normalized time range and the final value is held.
    pub fn bounce(&self, bounces: u32, amplitude: f32, reverse: bool) -> AnimationDescriptor {
        let slots = bounces as f32 + 1.0;
        let mut frames = Vec::with_capacity(bounces as usize + 2);

        let start = if reverse { 1.0 } else { 0.0 };
        frames.push(Keyframe::new(0.0, AnimationValue::Scale(start)));

        for i in 1..=bounces {
            let step = amplitude / i as f32;
            let scale = if i % 2 == 1 { 1.0 + step } else { 1.0 - step };
            frames.push(Keyframe::new(i as f32 / slots, AnimationValue::Scale(scale)));
        }

        let end = if reverse { NEAR_ZERO_SCALE } else { 1.0 };
        frames.push(Keyframe::new(1.0, AnimationValue::Scale(end)));

        AnimationDescriptor::keyframes(AnimatedProperty::Transform, frames, self.duration)
            .with_fill_mode(FillMode::Forwards)
    }
}
