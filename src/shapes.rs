//! Box and checkmark geometry.
//!
//! All shapes are closed-form functions of the layer size: the box outline
//! follows the configured [`BoxType`], and the checkmarks are proportional
//! polylines whose box-dependent placement comes from a per-type
//! [`BoxShape`] table.
//!
//! A size that is zero, negative or not finite produces the empty path from
//! every generator, so geometry can be requested before the first layout.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::geometry::{Point, Rect};
use crate::path::Path;
use crate::transform::Transform;

/// Corner radius of the square box outline.
pub const SQUARE_CORNER_RADIUS: f32 = 3.0;

/// The outer shape of the checkbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoxType {
    #[default]
    Circle,
    Square,
}

/// Which checkmark outline to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckMarkKind {
    /// The regular tick.
    #[default]
    Short,
    /// A tick whose right arm reaches the box outline.
    Long,
    /// A horizontal line, the starting point of the flat morph.
    Flat,
}

/// Geometry constants that depend on the box type.
#[derive(Debug)]
pub struct BoxShape {
    /// Builds the box outline for a given size.
    pub outline: fn(f32) -> Path,
    /// Scale applied to the tick around the origin before recentering.
    pub check_mark_scale: f32,
    /// Offset applied after scaling, as a fraction of the size.
    pub check_mark_offset: f32,
    /// Size divisors of the long tick's third vertex.
    pub long_tip_divisors: (f32, f32),
    /// Overshoot used by the bounce animation on this box.
    pub bounce_amplitude: f32,
}

static CIRCLE: BoxShape = BoxShape {
    outline: circle_outline,
    check_mark_scale: 1.0,
    check_mark_offset: 0.0,
    long_tip_divisors: (1.1553, 5.9272),
    bounce_amplitude: 0.35,
};

// The tick is visually larger on a square box and shifted back to the centre.
static SQUARE: BoxShape = BoxShape {
    outline: square_outline,
    check_mark_scale: 1.5,
    check_mark_offset: -0.25,
    long_tip_divisors: (1.2053, 4.5272),
    bounce_amplitude: 0.20,
};

impl BoxType {
    pub fn shape(self) -> &'static BoxShape {
        match self {
            BoxType::Circle => &CIRCLE,
            BoxType::Square => &SQUARE,
        }
    }
}

impl BoxShape {
    /// Transform that places a tick built for the circle onto this box.
    pub fn check_mark_transform(&self, size: f32) -> Transform {
        let offset = size * self.check_mark_offset;
        Transform::translate(offset, offset).then(&Transform::scale(self.check_mark_scale))
    }
}

/// Circle of diameter `size` starting at -45 degrees (top right), clockwise.
fn circle_outline(size: f32) -> Path {
    let radius = size / 2.0;
    let mut path = Path::new();
    path.arc(Point::new(radius, radius), radius, -FRAC_PI_4, 2.0 * PI);
    path.close();
    path
}

/// Rounded square, rotated a quarter turn about the origin and shifted back
/// into `[0, size]` so the outline starts on the right edge.
fn square_outline(size: f32) -> Path {
    let transform = Transform::translate(size, 0.0).then(&Transform::rotate(FRAC_PI_2));
    Path::rounded_rect(Rect::square(size), SQUARE_CORNER_RADIUS).transformed(&transform)
}

/// Builds the box and checkmark paths for a square layer of side `size`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathGenerator {
    /// Side of the square the paths are built in.
    pub size: f32,
    /// Stroke width the paths are drawn with.
    pub line_width: f32,
    pub box_type: BoxType,
}

impl PathGenerator {
    pub fn new(size: f32, line_width: f32, box_type: BoxType) -> Self {
        Self {
            size,
            line_width,
            box_type,
        }
    }

    fn has_area(&self) -> bool {
        self.size.is_finite() && self.size > 0.0
    }

    /// The box outline: a circle or a rounded square filling the layer.
    pub fn box_path(&self) -> Path {
        if !self.has_area() {
            return Path::new();
        }
        (self.box_type.shape().outline)(self.size)
    }

    pub fn check_mark_path(&self, kind: CheckMarkKind) -> Path {
        if !self.has_area() {
            return Path::new();
        }
        let size = self.size;
        let shape = self.box_type.shape();

        let vertices = match kind {
            CheckMarkKind::Flat => {
                return Path::polyline(&[
                    Point::new(size / 4.0, size / 2.0),
                    Point::new(size / 2.0, size / 2.0),
                    Point::new(size / 1.2, size / 2.0),
                ]);
            }
            CheckMarkKind::Short => [
                Point::new(size / 3.1578, size / 2.0),
                Point::new(size / 2.0618, size / 1.57894),
                Point::new(size / 1.3953, size / 2.7272),
            ],
            CheckMarkKind::Long => {
                let (dx, dy) = shape.long_tip_divisors;
                [
                    Point::new(size / 3.1578, size / 2.0),
                    Point::new(size / 2.0618, size / 1.57894),
                    Point::new(size / dx, size / dy),
                ]
            }
        };

        let path = Path::polyline(&vertices);
        let transform = shape.check_mark_transform(size);
        if transform.is_identity() {
            path
        } else {
            path.transformed(&transform)
        }
    }

    pub fn short_check_mark(&self) -> Path {
        self.check_mark_path(CheckMarkKind::Short)
    }

    pub fn long_check_mark(&self) -> Path {
        self.check_mark_path(CheckMarkKind::Long)
    }

    pub fn flat_check_mark(&self) -> Path {
        self.check_mark_path(CheckMarkKind::Flat)
    }
}
