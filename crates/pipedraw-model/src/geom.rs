//! Cartesian points and polar conversion.

use serde::{Deserialize, Serialize};

/// A cartesian coordinate in millimeters.
///
/// As usual for drawing surfaces the y axis is inverted compared to plain
/// cartesian coordinates: y increases downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The midpoint between this point and another.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Converts polar coordinates to cartesian.
///
/// `theta` is in radians, 0 pointing right along the x axis with angles
/// increasing counter-clockwise; `r` is the radius from `origin`. The
/// inverted y axis is what makes counter-clockwise angles come out right
/// on a downward-increasing drawing surface.
pub fn polar_to_cartesian(theta: f64, r: f64, origin: Point) -> Point {
    Point::new(origin.x + theta.cos() * r, origin.y - theta.sin() * r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_angle_points_right() {
        let p = polar_to_cartesian(0.0, 5.0, Point::ORIGIN);
        assert!((p.x - 5.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
    }

    #[test]
    fn quarter_turn_points_up() {
        let p = polar_to_cartesian(FRAC_PI_2, 5.0, Point::ORIGIN);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y + 5.0).abs() < 1e-12);
    }

    #[test]
    fn origin_offsets_result() {
        let p = polar_to_cartesian(PI, 2.0, Point::new(10.0, 10.0));
        assert!((p.x - 8.0).abs() < 1e-12);
        assert!((p.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }
}
