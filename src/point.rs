//! The plain geometric point every other module builds upon.

use nalgebra::Vector2;

/// A position on the canvas.
///
/// Control points and derived points alike are stored as [`nalgebra::Vector2`],
/// so the usual vector arithmetic is available on them.
pub type Point2D = Vector2<f64>;

/// Point between `a` and `b` at parameter `t`
pub fn lerp_point(a: &Point2D, b: &Point2D, t: f64) -> Point2D {
    a + (b - a) * t
}

/// Average of `a` and `b`
pub fn midpoint(a: &Point2D, b: &Point2D) -> Point2D {
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation() {
        let a = Point2D::new(0.0, 10.0);
        let b = Point2D::new(10.0, 30.0);
        assert_eq!(lerp_point(&a, &b, 0.0), a);
        assert_eq!(lerp_point(&a, &b, 1.0), b);
        assert_eq!(lerp_point(&a, &b, 0.25), Point2D::new(2.5, 15.0));
        assert_eq!(midpoint(&a, &b), Point2D::new(5.0, 20.0));
    }
}
