//! Vector path representation.
//!
//! A [`Path`] is an ordered list of [`PathCmd`]s in local layer coordinates.
//! Circular arcs are converted to cubic Bezier segments when they are added,
//! so consumers only ever see move/line/cubic/close commands. Arcs are split
//! at multiples of 90 degrees, which keeps every control point inside the
//! bounding box of the arc's circle; the control-point hull used for
//! [`Path::bounds`] is therefore tight for the shapes this crate builds.

use std::f32::consts::FRAC_PI_2;
use std::fmt::Write;

use crate::geometry::{Point, Rect};
use crate::transform::Transform;

/// Angles closer than this are treated as the same arc boundary.
const ANGLE_EPSILON: f32 = 1e-4;

/// Number of line segments used per cubic when measuring length.
const FLATTEN_STEPS: usize = 16;

/// A path command.
#[derive(Clone, Debug, PartialEq)]
pub enum PathCmd {
    /// Move to a point (starts a new subpath).
    MoveTo(Point),
    /// Line to a point.
    LineTo(Point),
    /// Cubic Bezier curve.
    CubicTo { c1: Point, c2: Point, end: Point },
    /// Close the current subpath.
    Close,
}

impl PathCmd {
    fn map(&self, f: impl Fn(Point) -> Point) -> PathCmd {
        match *self {
            PathCmd::MoveTo(p) => PathCmd::MoveTo(f(p)),
            PathCmd::LineTo(p) => PathCmd::LineTo(f(p)),
            PathCmd::CubicTo { c1, c2, end } => PathCmd::CubicTo {
                c1: f(c1),
                c2: f(c2),
                end: f(end),
            },
            PathCmd::Close => PathCmd::Close,
        }
    }

    /// True when both commands are the same kind, so they can be morphed.
    pub(crate) fn same_kind(&self, other: &PathCmd) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub(crate) fn lerp(&self, other: &PathCmd, t: f32) -> PathCmd {
        let mix = |a: Point, b: Point| Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
        match (self, other) {
            (PathCmd::MoveTo(a), PathCmd::MoveTo(b)) => PathCmd::MoveTo(mix(*a, *b)),
            (PathCmd::LineTo(a), PathCmd::LineTo(b)) => PathCmd::LineTo(mix(*a, *b)),
            (
                PathCmd::CubicTo { c1, c2, end },
                PathCmd::CubicTo {
                    c1: o1,
                    c2: o2,
                    end: oe,
                },
            ) => PathCmd::CubicTo {
                c1: mix(*c1, *o1),
                c2: mix(*c2, *o2),
                end: mix(*end, *oe),
            },
            _ => self.clone(),
        }
    }
}

/// A path consisting of multiple commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    cmds: Vec<PathCmd>,
    bounds: Option<Rect>,
    current: Option<Point>,
    subpath_start: Point,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open polyline through `points`. Fewer than one point gives an empty path.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    /// Rounded rectangle, clockwise from the end of the top-left corner.
    /// The corner radius is clamped to half of the smaller side.
    pub fn rounded_rect(rect: Rect, radius: f32) -> Self {
        let r = radius.min(rect.width.min(rect.height) / 2.0).max(0.0);
        let mut path = Self::new();
        if r <= 0.0 {
            path.move_to(Point::new(rect.x, rect.y));
            path.line_to(Point::new(rect.max_x(), rect.y));
            path.line_to(Point::new(rect.max_x(), rect.max_y()));
            path.line_to(Point::new(rect.x, rect.max_y()));
            path.close();
            return path;
        }

        let (left, top, right, bottom) = (rect.x, rect.y, rect.max_x(), rect.max_y());
        path.move_to(Point::new(left + r, top));
        path.arc(Point::new(right - r, top + r), r, -FRAC_PI_2, FRAC_PI_2);
        path.arc(Point::new(right - r, bottom - r), r, 0.0, FRAC_PI_2);
        path.arc(Point::new(left + r, bottom - r), r, FRAC_PI_2, FRAC_PI_2);
        path.arc(Point::new(left + r, top + r), r, 2.0 * FRAC_PI_2, FRAC_PI_2);
        path.close();
        path
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Bounding box of all on-curve and control points. Empty paths report a
    /// zero rect at the origin.
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.cmds.last(), Some(PathCmd::Close))
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    fn include(&mut self, p: Point) {
        self.bounds = Some(match self.bounds {
            Some(b) => b.union_point(p),
            None => Rect::from_point(p),
        });
    }

    pub fn move_to(&mut self, p: Point) {
        self.cmds.push(PathCmd::MoveTo(p));
        self.include(p);
        self.current = Some(p);
        self.subpath_start = p;
    }

    /// Line to a point. Starts a subpath instead when nothing precedes it.
    pub fn line_to(&mut self, p: Point) {
        if self.current.is_none() {
            self.move_to(p);
            return;
        }
        self.cmds.push(PathCmd::LineTo(p));
        self.include(p);
        self.current = Some(p);
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        if self.current.is_none() {
            self.move_to(c1);
        }
        self.cmds.push(PathCmd::CubicTo { c1, c2, end });
        self.include(c1);
        self.include(c2);
        self.include(end);
        self.current = Some(end);
    }

    /// Circular arc from `start_angle` sweeping `sweep_angle` radians.
    ///
    /// Positive sweeps run clockwise on screen (y down). A line connects the
    /// current point to the arc start when they differ; with no current point
    /// the arc starts a new subpath.
    pub fn arc(&mut self, center: Point, radius: f32, start_angle: f32, sweep_angle: f32) {
        let start = point_on_circle(center, radius, start_angle);
        match self.current {
            None => self.move_to(start),
            Some(current) if !current.approx_eq(start, 1e-4) => self.line_to(start),
            Some(_) => {}
        }

        if sweep_angle.abs() < ANGLE_EPSILON {
            return;
        }

        let dir = sweep_angle.signum();
        let end = start_angle + sweep_angle;
        let mut angle = start_angle;
        while (end - angle) * dir > ANGLE_EPSILON {
            let mut boundary = if dir > 0.0 {
                ((angle / FRAC_PI_2).floor() + 1.0) * FRAC_PI_2
            } else {
                ((angle / FRAC_PI_2).ceil() - 1.0) * FRAC_PI_2
            };
            if (boundary - angle).abs() < ANGLE_EPSILON {
                boundary += dir * FRAC_PI_2;
            }
            let next = if dir > 0.0 {
                boundary.min(end)
            } else {
                boundary.max(end)
            };
            self.arc_segment(center, radius, angle, next);
            angle = next;
        }
    }

    /// One cubic approximating an arc of at most a quarter turn.
    fn arc_segment(&mut self, center: Point, radius: f32, from: f32, to: f32) {
        let k = 4.0 / 3.0 * ((to - from) / 4.0).tan() * radius;
        let p0 = point_on_circle(center, radius, from);
        let p3 = point_on_circle(center, radius, to);
        let c1 = Point::new(p0.x - k * from.sin(), p0.y + k * from.cos());
        let c2 = Point::new(p3.x + k * to.sin(), p3.y - k * to.cos());
        self.cubic_to(c1, c2, p3);
    }

    pub fn close(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.cmds.push(PathCmd::Close);
        self.current = Some(self.subpath_start);
    }

    /// A new path with every point mapped through `transform`.
    pub fn transformed(&self, transform: &Transform) -> Path {
        let mut path = Path::new();
        for cmd in &self.cmds {
            match cmd.map(|p| transform.transform_point(p)) {
                PathCmd::MoveTo(p) => path.move_to(p),
                PathCmd::LineTo(p) => path.line_to(p),
                PathCmd::CubicTo { c1, c2, end } => path.cubic_to(c1, c2, end),
                PathCmd::Close => path.close(),
            }
        }
        path
    }

    /// The same geometry traversed backward.
    ///
    /// Supports single open subpaths, which is all the checkmarks use; a
    /// closed or multi-subpath path is returned unchanged.
    pub fn reversed(&self) -> Path {
        let subpaths = self
            .cmds
            .iter()
            .filter(|c| matches!(c, PathCmd::MoveTo(_)))
            .count();
        if subpaths != 1 || self.is_closed() {
            return self.clone();
        }

        let mut path = Path::new();
        let Some(end) = self.current else {
            return path;
        };
        path.move_to(end);
        let mut segments: Vec<(Point, &PathCmd)> = Vec::with_capacity(self.cmds.len());
        let mut from = Point::ZERO;
        for cmd in &self.cmds {
            match cmd {
                PathCmd::MoveTo(p) => from = *p,
                PathCmd::LineTo(p) | PathCmd::CubicTo { end: p, .. } => {
                    segments.push((from, cmd));
                    from = *p;
                }
                PathCmd::Close => {}
            }
        }
        for (start, cmd) in segments.into_iter().rev() {
            match cmd {
                PathCmd::CubicTo { c1, c2, .. } => path.cubic_to(*c2, *c1, start),
                _ => path.line_to(start),
            }
        }
        path
    }

    /// On-curve points in drawing order (control points excluded).
    pub fn vertices(&self) -> Vec<Point> {
        self.cmds
            .iter()
            .filter_map(|cmd| match cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => Some(*p),
                PathCmd::CubicTo { end, .. } => Some(*end),
                PathCmd::Close => None,
            })
            .collect()
    }

    /// Approximate arc length, with cubics flattened into line segments.
    pub fn length(&self) -> f32 {
        let mut total = 0.0;
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    current = p;
                    start = p;
                }
                PathCmd::LineTo(p) => {
                    total += current.distance(p);
                    current = p;
                }
                PathCmd::CubicTo { c1, c2, end } => {
                    let mut prev = current;
                    for i in 1..=FLATTEN_STEPS {
                        let t = i as f32 / FLATTEN_STEPS as f32;
                        let p = cubic_point(current, c1, c2, end, t);
                        total += prev.distance(p);
                        prev = p;
                    }
                    current = end;
                }
                PathCmd::Close => {
                    total += current.distance(start);
                    current = start;
                }
            }
        }
        total
    }

    /// Whether two paths have the same command structure, so they can be
    /// interpolated point by point.
    pub fn is_morphable_to(&self, other: &Path) -> bool {
        self.cmds.len() == other.cmds.len()
            && self
                .cmds
                .iter()
                .zip(&other.cmds)
                .all(|(a, b)| a.same_kind(b))
    }

    /// Path data in SVG `d` attribute syntax.
    pub fn svg_data(&self) -> String {
        let mut d = String::new();
        for cmd in &self.cmds {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match cmd {
                PathCmd::MoveTo(p) => write!(d, "M{} {}", p.x, p.y),
                PathCmd::LineTo(p) => write!(d, "L{} {}", p.x, p.y),
                PathCmd::CubicTo { c1, c2, end } => write!(
                    d,
                    "C{} {} {} {} {} {}",
                    c1.x, c1.y, c2.x, c2.y, end.x, end.y
                ),
                PathCmd::Close => write!(d, "Z"),
            };
        }
        d
    }

    pub(crate) fn from_commands(cmds: impl IntoIterator<Item = PathCmd>) -> Path {
        let mut path = Path::new();
        for cmd in cmds {
            match cmd {
                PathCmd::MoveTo(p) => path.move_to(p),
                PathCmd::LineTo(p) => path.line_to(p),
                PathCmd::CubicTo { c1, c2, end } => path.cubic_to(c1, c2, end),
                PathCmd::Close => path.close(),
            }
        }
        path
    }
}

fn point_on_circle(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

fn cubic_point(p0: Point, c1: Point, c2: Point, p3: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p3.x,
        a * p0.y + b * c1.y + c * c2.y + d * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_polyline_bounds() {
        let path = Path::polyline(&[Point::new(10.0, 20.0), Point::new(30.0, 40.0)]);
        let b = path.bounds();
        assert_eq!(b, Rect::new(10.0, 20.0, 20.0, 20.0));
        assert!(!path.is_closed());
    }

    #[test]
    fn test_empty_path() {
        let path = Path::polyline(&[]);
        assert!(path.is_empty());
        assert_eq!(path.bounds(), Rect::default());
        assert_eq!(path.svg_data(), "");
    }

    #[test]
    fn test_full_circle_splits_at_quadrants() {
        let mut path = Path::new();
        path.arc(Point::new(50.0, 50.0), 25.0, -PI / 4.0, 2.0 * PI);
        path.close();

        // -45..0, 0..90, 90..180, 180..270, 270..315
        let cubics = path
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCmd::CubicTo { .. }))
            .count();
        assert_eq!(cubics, 5);

        let b = path.bounds();
        assert!(approx(b.x, 25.0));
        assert!(approx(b.y, 25.0));
        assert!(approx(b.width, 50.0));
        assert!(approx(b.height, 50.0));
    }

    #[test]
    fn test_arc_endpoint_lies_on_circle() {
        let mut path = Path::new();
        path.arc(Point::ZERO, 10.0, 0.0, PI / 2.0);
        let end = path.current_point().unwrap();
        assert!(end.approx_eq(Point::new(0.0, 10.0), 1e-4));
    }

    #[test]
    fn test_counter_clockwise_arc() {
        let mut path = Path::new();
        path.arc(Point::ZERO, 10.0, 0.0, -PI);
        let end = path.current_point().unwrap();
        assert!(end.approx_eq(Point::new(-10.0, 0.0), 1e-4));
        // Went through the top (negative y)
        assert!(path.bounds().y < -9.9);
    }

    #[test]
    fn test_circle_length() {
        let mut path = Path::new();
        path.arc(Point::ZERO, 10.0, 0.0, 2.0 * PI);
        path.close();
        let expected = 2.0 * PI * 10.0;
        assert!((path.length() - expected).abs() < 0.1);
    }

    #[test]
    fn test_rounded_rect_bounds_and_closure() {
        let path = Path::rounded_rect(Rect::square(40.0), 3.0);
        assert!(path.is_closed());
        let b = path.bounds();
        assert!(approx(b.x, 0.0));
        assert!(approx(b.y, 0.0));
        assert!(approx(b.width, 40.0));
        assert!(approx(b.height, 40.0));
    }

    #[test]
    fn test_rounded_rect_clamps_radius() {
        let path = Path::rounded_rect(Rect::square(4.0), 3.0);
        assert!(approx(path.bounds().width, 4.0));
    }

    #[test]
    fn test_reversed_polyline() {
        let path = Path::polyline(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ]);
        let rev = path.reversed();
        assert_eq!(
            rev.vertices(),
            vec![
                Point::new(2.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 0.0)
            ]
        );
        assert!(approx(rev.length(), path.length()));
    }

    #[test]
    fn test_reversed_closed_path_is_unchanged() {
        let path = Path::rounded_rect(Rect::square(10.0), 2.0);
        assert_eq!(path.reversed(), path);
    }

    #[test]
    fn test_transformed_maps_bounds() {
        let path = Path::polyline(&[Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
        let moved = path.transformed(&Transform::translate(5.0, 5.0));
        assert_eq!(moved.bounds(), Rect::new(5.0, 5.0, 10.0, 5.0));
    }

    #[test]
    fn test_morphable() {
        let a = Path::polyline(&[Point::ZERO, Point::new(1.0, 1.0)]);
        let b = Path::polyline(&[Point::new(2.0, 2.0), Point::new(3.0, 3.0)]);
        let c = Path::polyline(&[Point::ZERO]);
        assert!(a.is_morphable_to(&b));
        assert!(!a.is_morphable_to(&c));
    }

    #[test]
    fn test_svg_data() {
        let mut path = Path::polyline(&[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        path.close();
        assert_eq!(path.svg_data(), "M1 2 L3 4 Z");
    }
}
