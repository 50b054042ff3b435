/// A point in local layer coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Check if two points coincide within `epsilon` on both axes.
    pub fn approx_eq(&self, other: Point, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square rect anchored at the origin, the frame of every checkbox layer.
    pub fn square(size: f32) -> Self {
        Self::new(0.0, 0.0, size, size)
    }

    /// Degenerate rect covering a single point.
    pub fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow the rect so it also covers `p`.
    pub fn union_point(&self, p: Point) -> Self {
        let min_x = self.x.min(p.x);
        let min_y = self.y.min(p.y);
        let max_x = self.max_x().max(p.x);
        let max_y = self.max_y().max(p.y);
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_point_grows_in_every_direction() {
        let r = Rect::from_point(Point::new(5.0, 5.0))
            .union_point(Point::new(10.0, 2.0))
            .union_point(Point::new(1.0, 8.0));
        assert_eq!(r, Rect::new(1.0, 2.0, 9.0, 6.0));
    }

    #[test]
    fn test_center_and_contains() {
        let r = Rect::square(40.0);
        assert_eq!(r.center(), Point::new(20.0, 20.0));
        assert!(r.contains(0.0, 39.9));
        assert!(!r.contains(40.0, 10.0));
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::ZERO.distance(Point::new(3.0, 4.0)), 5.0);
    }
}
