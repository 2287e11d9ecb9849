//! 3D sample point.

use std::fmt;
use std::ops::{Add, Sub};

/// A single sampled surface point. `x` and `y` lie on the sampling
/// plane, `z` is the elevation produced by the noise field.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GridPoint {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`, using the real elevation.
    ///
    /// This is the edge-cost metric of the whole system: a sloped
    /// segment costs more than the same segment on flat ground.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        let d = self - other;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for GridPoint {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for GridPoint {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = GridPoint::new(1.0, 2.0, 3.0);
        let b = GridPoint::new(4.0, 6.0, 3.0);
        assert_eq!(a + b, GridPoint::new(5.0, 8.0, 6.0));
        assert_eq!(b - a, GridPoint::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn distance_uses_elevation() {
        let flat = GridPoint::new(0.0, 0.0, 0.0);
        let raised = GridPoint::new(3.0, 4.0, 12.0);
        assert_eq!(flat.distance(raised), 13.0);
        // Symmetric.
        assert_eq!(raised.distance(flat), 13.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = GridPoint::new(-2.5, 7.0, 0.25);
        assert_eq!(p.distance(p), 0.0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_point_round_trip() {
        let p = GridPoint::new(1.5, -2.0, 0.125);
        let json = serde_json::to_string(&p).unwrap();
        let back: GridPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
