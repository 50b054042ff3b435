use std::time::Duration;

use crate::color::Color;
use crate::shapes::BoxType;

/// The transition played when the checkbox changes state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationType {
    /// The box and checkmark are drawn along their paths.
    Stroke,
    /// The filled box grows from the centre with a single bounce.
    Fill,
    /// The checkmark bounces in while the box fades.
    #[default]
    Bounce,
    /// A horizontal line morphs into the checkmark.
    Flat,
    /// The box and a long checkmark are drawn in one continuous stroke.
    OneStroke,
    /// Plain cross-fade.
    Fade,
}

/// Appearance and behaviour of a [`CheckBox`](super::CheckBox).
#[derive(Clone, Debug, PartialEq)]
pub struct CheckBoxConfig {
    pub box_type: BoxType,
    pub animation_type: AnimationType,
    /// Fill of the box while on
    pub fill_color: Color,
    /// Stroke of the checkmark
    pub check_color: Color,
    /// Stroke of the box while off
    pub tint_color: Color,
    /// Stroke of the box while on
    pub on_tint_color: Color,
    pub line_width: f32,
    pub animation_duration: Duration,
    /// Draw only the checkmark, never the box.
    pub hide_box: bool,
}

impl Default for CheckBoxConfig {
    fn default() -> Self {
        Self {
            box_type: BoxType::Circle,
            animation_type: AnimationType::Bounce,
            fill_color: Color::rgb8(47, 123, 255),
            check_color: Color::WHITE,
            tint_color: Color::rgb8(171, 171, 171),
            on_tint_color: Color::rgb8(47, 123, 255),
            line_width: 2.0,
            animation_duration: Duration::from_millis(500),
            hide_box: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckBoxConfig::default();
        assert_eq!(config.box_type, BoxType::Circle);
        assert_eq!(config.animation_type, AnimationType::Bounce);
        assert_eq!(config.line_width, 2.0);
        assert_eq!(config.animation_duration, Duration::from_millis(500));
        assert_eq!(config.fill_color, config.on_tint_color);
        assert!(!config.hide_box);
    }
}
