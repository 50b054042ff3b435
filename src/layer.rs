//! Shape layers handed to the host renderer.

use bitflags::bitflags;

use crate::color::Color;
use crate::geometry::Rect;
use crate::path::Path;

bitflags! {
    /// Set of checkbox layers, e.g. the ones currently attached to the host.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Layers: u8 {
        /// Outline shown while off
        const OFF_BOX    = 0b001;
        /// Filled box shown while on
        const ON_BOX     = 0b010;
        /// Checkmark shown while on
        const CHECK_MARK = 0b100;
    }
}

/// Identity of a layer slot. Declaration order is the stacking order,
/// bottom first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    OffBox,
    OnBox,
    CheckMark,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::OffBox, LayerKind::OnBox, LayerKind::CheckMark];

    pub fn flag(self) -> Layers {
        match self {
            LayerKind::OffBox => Layers::OFF_BOX,
            LayerKind::OnBox => Layers::ON_BOX,
            LayerKind::CheckMark => Layers::CHECK_MARK,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// A path with its paint attributes, the unit the host composites.
///
/// Layers are rebuilt from scratch on every redraw and replace the previous
/// layer of the same [`LayerKind`] wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeLayer {
    /// Position and size in the checkbox's coordinate space
    pub frame: Rect,
    pub path: Path,
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl ShapeLayer {
    pub fn new(frame: Rect, path: Path) -> Self {
        Self {
            frame,
            path,
            fill: Color::TRANSPARENT,
            stroke: Color::TRANSPARENT,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    pub fn stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = color;
        self.line_width = width;
        self
    }

    pub fn rounded(mut self) -> Self {
        self.line_cap = LineCap::Round;
        self.line_join = LineJoin::Round;
        self
    }

    /// A layer whose path has no height draws nothing and must be rebuilt.
    pub fn is_degenerate(&self) -> bool {
        self.path.bounds().height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_flags_cover_every_kind() {
        let all = LayerKind::ALL
            .iter()
            .fold(Layers::empty(), |acc, k| acc | k.flag());
        assert_eq!(all, Layers::all());
    }

    #[test]
    fn test_default_layers_are_empty() {
        assert_eq!(Layers::default(), Layers::empty());
    }

    #[test]
    fn test_stacking_order() {
        assert!(LayerKind::OffBox < LayerKind::OnBox);
        assert!(LayerKind::OnBox < LayerKind::CheckMark);
    }

    #[test]
    fn test_degenerate_layer() {
        let empty = ShapeLayer::new(Rect::square(10.0), Path::new());
        assert!(empty.is_degenerate());

        let flat = Path::polyline(&[Point::new(0.0, 5.0), Point::new(10.0, 5.0)]);
        assert!(ShapeLayer::new(Rect::square(10.0), flat).is_degenerate());

        let tick = Path::polyline(&[Point::new(0.0, 5.0), Point::new(5.0, 8.0)]);
        let layer = ShapeLayer::new(Rect::square(10.0), tick)
            .stroke(Color::WHITE, 2.0)
            .rounded();
        assert!(!layer.is_degenerate());
        assert_eq!(layer.line_cap, LineCap::Round);
        assert_eq!(layer.line_width, 2.0);
    }
}
