use std::time::Duration;

use super::{Animatable, TimingFunction};
use crate::path::Path;

/// The layer property an animation drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimatedProperty {
    /// Fraction of the stroke that is drawn, 0.0 to 1.0.
    StrokeEnd,
    /// Layer opacity, 0.0 to 1.0.
    Opacity,
    /// The layer's path geometry.
    Path,
    /// Uniform scale around the layer centre.
    Transform,
}

impl AnimatedProperty {
    /// Key path a host renderer registers the animation under.
    pub fn key(&self) -> &'static str {
        match self {
            AnimatedProperty::StrokeEnd => "strokeEnd",
            AnimatedProperty::Opacity => "opacity",
            AnimatedProperty::Path => "path",
            AnimatedProperty::Transform => "transform",
        }
    }
}

/// A value of an animated property.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationValue {
    /// Plain number (stroke end, opacity)
    Scalar(f32),
    /// Uniform scale factor
    Scale(f32),
    /// Path geometry
    Path(Path),
}

impl AnimationValue {
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            AnimationValue::Scalar(v) | AnimationValue::Scale(v) => Some(*v),
            AnimationValue::Path(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            AnimationValue::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl Animatable for AnimationValue {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        match (from, to) {
            (AnimationValue::Scalar(a), AnimationValue::Scalar(b)) => {
                AnimationValue::Scalar(f32::lerp(a, b, t))
            }
            (AnimationValue::Scale(a), AnimationValue::Scale(b)) => {
                AnimationValue::Scale(f32::lerp(a, b, t))
            }
            (AnimationValue::Path(a), AnimationValue::Path(b)) => {
                AnimationValue::Path(Path::lerp(a, b, t))
            }
            _ if t < 0.5 => from.clone(),
            _ => to.clone(),
        }
    }
}

/// A value pinned to a point of the animation's normalized time.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Normalized time in [0, 1]
    pub time: f32,
    pub value: AnimationValue,
}

impl Keyframe {
    pub fn new(time: f32, value: AnimationValue) -> Self {
        Self { time, value }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnimationValues {
    /// Straight interpolation between two values
    Basic {
        from: AnimationValue,
        to: AnimationValue,
    },
    /// Keyframes ordered by time, first at 0.0 and last at 1.0
    Keyframes(Vec<Keyframe>),
}

/// What the layer shows outside the animation's active interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// The animation is removed when it ends; the layer shows its own value.
    #[default]
    Removed,
    /// The final value is held after the animation ends.
    Forwards,
    /// The first value is shown during the start delay.
    Backwards,
    Both,
}

impl FillMode {
    pub fn holds_final_value(&self) -> bool {
        matches!(self, FillMode::Forwards | FillMode::Both)
    }

    pub fn shows_first_value_early(&self) -> bool {
        matches!(self, FillMode::Backwards | FillMode::Both)
    }
}

/// Declarative description of one animation, handed to the host renderer.
///
/// Descriptors are plain values: the renderer schedules and plays them, this
/// crate only describes them. [`AnimationDescriptor::sample`] evaluates what
/// the host is expected to display at a given time.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDescriptor {
    pub property: AnimatedProperty,
    pub values: AnimationValues,
    /// Total duration, keyframe times are fractions of it
    pub duration: Duration,
    /// Delay between handing the animation over and its start
    pub delay: Duration,
    pub timing: TimingFunction,
    pub fill_mode: FillMode,
}

impl AnimationDescriptor {
    pub fn basic(
        property: AnimatedProperty,
        from: AnimationValue,
        to: AnimationValue,
        duration: Duration,
    ) -> Self {
        Self {
            property,
            values: AnimationValues::Basic { from, to },
            duration,
            delay: Duration::ZERO,
            timing: TimingFunction::EaseInOut,
            fill_mode: FillMode::Removed,
        }
    }

    pub fn keyframes(property: AnimatedProperty, frames: Vec<Keyframe>, duration: Duration) -> Self {
        Self {
            property,
            values: AnimationValues::Keyframes(frames),
            duration,
            delay: Duration::ZERO,
            timing: TimingFunction::EaseInOut,
            fill_mode: FillMode::Removed,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Time from hand-over until the animation ends.
    pub fn end_time(&self) -> Duration {
        self.delay + self.duration
    }

    pub fn keyframe_list(&self) -> Option<&[Keyframe]> {
        match &self.values {
            AnimationValues::Keyframes(frames) => Some(frames),
            AnimationValues::Basic { .. } => None,
        }
    }

    pub fn first_value(&self) -> Option<&AnimationValue> {
        match &self.values {
            AnimationValues::Basic { from, .. } => Some(from),
            AnimationValues::Keyframes(frames) => frames.first().map(|k| &k.value),
        }
    }

    pub fn final_value(&self) -> Option<&AnimationValue> {
        match &self.values {
            AnimationValues::Basic { to, .. } => Some(to),
            AnimationValues::Keyframes(frames) => frames.last().map(|k| &k.value),
        }
    }

    /// Value at normalized, already eased progress `t`.
    pub fn value_at(&self, t: f32) -> Option<AnimationValue> {
        match &self.values {
            AnimationValues::Basic { from, to } => Some(AnimationValue::lerp(from, to, t)),
            AnimationValues::Keyframes(frames) => {
                let first = frames.first()?;
                if t <= first.time {
                    return Some(first.value.clone());
                }
                for pair in frames.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    if t <= b.time {
                        let span = b.time - a.time;
                        let local = if span > 0.0 { (t - a.time) / span } else { 1.0 };
                        return Some(AnimationValue::lerp(&a.value, &b.value, local));
                    }
                }
                frames.last().map(|k| k.value.clone())
            }
        }
    }

    /// What the host displays `elapsed` after the animation was handed over,
    /// or `None` when the animation has no effect at that time.
    pub fn sample(&self, elapsed: Duration) -> Option<AnimationValue> {
        if elapsed < self.delay {
            return if self.fill_mode.shows_first_value_early() {
                self.first_value().cloned()
            } else {
                None
            };
        }

        let local = elapsed - self.delay;
        if local >= self.duration {
            return if self.fill_mode.holds_final_value() {
                self.final_value().cloned()
            } else {
                None
            };
        }

        let progress = local.as_secs_f32() / self.duration.as_secs_f32();
        self.value_at(self.timing.evaluate(progress))
    }
}
