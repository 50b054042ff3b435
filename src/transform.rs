use crate::geometry::Point;

/// A 2D affine transformation stored as the top two rows of a 3x3 matrix.
///
/// Layout is row-major: `[a, b, tx, c, d, ty]`, mapping `(x, y)` to
/// `(a*x + b*y + tx, c*x + d*y + ty)`. Paths are transformed by mapping
/// every on-curve and control point, which is exact for affine maps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub data: [f32; 6],
}

impl Transform {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, // row 1
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            data: [
                1.0, 0.0, x, // row 0
                0.0, 1.0, y, // row 1
            ],
        }
    }

    /// Rotation around the origin. Positive angles turn the x axis toward the
    /// y axis, which is clockwise on screen since y grows downward.
    pub fn rotate(angle_radians: f32) -> Self {
        let cos = angle_radians.cos();
        let sin = angle_radians.sin();
        Self {
            data: [
                cos, -sin, 0.0, // row 0
                sin, cos, 0.0, // row 1
            ],
        }
    }

    pub fn rotate_degrees(angle_degrees: f32) -> Self {
        Self::rotate(angle_degrees.to_radians())
    }

    /// Uniform scale around the origin
    pub fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    pub fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            data: [
                sx, 0.0, 0.0, // row 0
                0.0, sy, 0.0, // row 1
            ],
        }
    }

    /// Uniform scale that keeps `anchor` fixed.
    pub fn scale_about(s: f32, anchor: Point) -> Self {
        Self::translate(anchor.x, anchor.y)
            .then(&Self::scale(s))
            .then(&Self::translate(-anchor.x, -anchor.y))
    }

    /// Compose this transform with another: self * other
    /// Applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let [a1, b1, tx1, c1, d1, ty1] = self.data;
        let [a2, b2, tx2, c2, d2, ty2] = other.data;
        Transform {
            data: [
                a1 * a2 + b1 * c2,
                a1 * b2 + b1 * d2,
                a1 * tx2 + b1 * ty2 + tx1,
                c1 * a2 + d1 * c2,
                c1 * b2 + d1 * d2,
                c1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    /// Inverse transform. A degenerate (zero determinant) matrix yields the
    /// identity.
    pub fn inverse(&self) -> Transform {
        let [a, b, tx, c, d, ty] = self.data;
        let det = a * d - b * c;

        if det.abs() < 1e-10 {
            return Self::IDENTITY;
        }

        let inv_det = 1.0 / det;
        Transform {
            data: [
                d * inv_det,
                -b * inv_det,
                (-d * tx + b * ty) * inv_det,
                -c * inv_det,
                a * inv_det,
                (c * tx - a * ty) * inv_det,
            ],
        }
    }

    pub fn transform_point(&self, p: Point) -> Point {
        let [a, b, tx, c, d, ty] = self.data;
        Point::new(a * p.x + b * p.y + tx, c * p.x + d * p.y + ty)
    }

    pub fn is_identity(&self) -> bool {
        self.data == Self::IDENTITY.data
    }

    /// The SVG `matrix(a b c d e f)` argument order (column-major).
    pub fn svg_matrix(&self) -> [f32; 6] {
        let [a, b, tx, c, d, ty] = self.data;
        [a, c, b, d, tx, ty]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn apply(t: &Transform, x: f32, y: f32) -> (f32, f32) {
        let p = t.transform_point(Point::new(x, y));
        (p.x, p.y)
    }

    #[test]
    fn test_identity() {
        let (x, y) = apply(&Transform::IDENTITY, 10.0, 20.0);
        assert!(approx_eq(x, 10.0));
        assert!(approx_eq(y, 20.0));
        assert!(Transform::default().is_identity());
    }

    #[test]
    fn test_translate() {
        let (x, y) = apply(&Transform::translate(10.0, 20.0), 5.0, 5.0);
        assert!(approx_eq(x, 15.0));
        assert!(approx_eq(y, 25.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let (x, y) = apply(&Transform::rotate_degrees(90.0), 1.0, 0.0);
        assert!(approx_eq(x, 0.0));
        assert!(approx_eq(y, 1.0));
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        let translate = Transform::translate(10.0, 0.0);
        let scale = Transform::scale(2.0);

        // (0,0) -> translate -> (10,0) -> scale -> (20,0)
        let (x, y) = apply(&scale.then(&translate), 0.0, 0.0);
        assert!(approx_eq(x, 20.0));
        assert!(approx_eq(y, 0.0));
    }

    #[test]
    fn test_scale_about_keeps_anchor_fixed() {
        let t = Transform::scale_about(1.5, Point::new(20.0, 20.0));
        let (x, y) = apply(&t, 20.0, 20.0);
        assert!(approx_eq(x, 20.0));
        assert!(approx_eq(y, 20.0));
        let (x, y) = apply(&t, 30.0, 20.0);
        assert!(approx_eq(x, 35.0));
        assert!(approx_eq(y, 20.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::translate(4.0, -3.0)
            .then(&Transform::rotate_degrees(30.0))
            .then(&Transform::scale(2.0));
        let (x, y) = apply(&t.then(&t.inverse()), 3.0, 4.0);
        assert!(approx_eq(x, 3.0));
        assert!(approx_eq(y, 4.0));
    }

    #[test]
    fn test_svg_matrix_order() {
        let t = Transform::translate(1.0, 2.0);
        assert_eq!(t.svg_matrix(), [1.0, 0.0, 0.0, 1.0, 1.0, 2.0]);
    }
}
