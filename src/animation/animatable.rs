use crate::color::Color;
use crate::geometry::Point;
use crate::path::Path;

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + 'static {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    /// t can exceed [0, 1] range for overshoot effects
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Point {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
    }
}

impl Animatable for Color {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

/// Paths with the same command structure morph point by point. Paths that
/// cannot be matched switch over at the midpoint.
impl Animatable for Path {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        if !from.is_morphable_to(to) {
            return if t < 0.5 { from.clone() } else { to.clone() };
        }
        Path::from_commands(
            from.commands()
                .iter()
                .zip(to.commands())
                .map(|(a, b)| a.lerp(b, t)),
        )
    }
}
