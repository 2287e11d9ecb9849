//! **relief-noise** — Gradient noise over a random lattice.
//!
//! A [`GradientNoiseField`] assigns every cell of an N×N lattice a
//! fixed random gradient direction at construction. Sampling at an
//! arbitrary (x, y) interpolates the dot products between the four
//! surrounding gradients and the offsets to the sample point, smoothed
//! by a quintic fade, yielding a continuous value in roughly [−1, 1].
//!
//! The generator is injected, so fields are reproducible when seeded:
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use relief_noise::GradientNoiseField;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let field = GradientNoiseField::new(100, &mut rng).unwrap();
//! let h = field.noise(3.25, 41.5);
//! assert_eq!(h, field.noise(3.25, 41.5));
//! ```

use std::f64::consts::TAU;
use std::fmt;

use rand::{Rng, RngExt};

/// Construction error for [`GradientNoiseField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseError {
    /// A lattice needs at least 2×2 gradients to interpolate between.
    LatticeTooSmall { size: usize },
}

impl fmt::Display for NoiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseError::LatticeTooSmall { size } => {
                write!(f, "noise lattice size {size} is too small (need at least 2)")
            }
        }
    }
}

impl std::error::Error for NoiseError {}

/// A continuous pseudo-random scalar field over the plane.
///
/// Immutable after construction; sampling takes `&self` and is safe to
/// share across concurrently running searches.
#[derive(Debug, Clone)]
pub struct GradientNoiseField {
    size: usize,
    /// Gradient direction in radians per lattice cell, row-major.
    angles: Vec<f64>,
}

impl GradientNoiseField {
    /// Allocate an N×N lattice of gradient angles, each drawn
    /// independently and uniformly from [0, 2π) using `rng`.
    ///
    /// Returns [`NoiseError::LatticeTooSmall`] when `size <= 1`.
    pub fn new(size: usize, rng: &mut impl Rng) -> Result<Self, NoiseError> {
        if size <= 1 {
            return Err(NoiseError::LatticeTooSmall { size });
        }
        let mut angles = Vec::with_capacity(size * size);
        for _ in 0..size * size {
            angles.push(rng.random_range(0.0..TAU));
        }
        Ok(Self { size, angles })
    }

    /// Lattice size N.
    #[inline]
    pub fn lattice_size(&self) -> usize {
        self.size
    }

    /// Sample the field at (x, y).
    ///
    /// Coordinates tile periodically: they are wrapped into [0, N−1)
    /// by Euclidean modulo, so negative inputs are valid.
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let period = (self.size - 1) as f64;
        let x = x.rem_euclid(period);
        let y = y.rem_euclid(period);

        // Surrounding lattice corners.
        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = x0 + 1;
        let y1 = y0 + 1;

        // Dot product of each corner's gradient with the offset from
        // that corner to the sample point.
        let d00 = self.corner_dot(x0, y0, x, y);
        let d10 = self.corner_dot(x1, y0, x, y);
        let d01 = self.corner_dot(x0, y1, x, y);
        let d11 = self.corner_dot(x1, y1, x, y);

        let u = fade(x - x0 as f64);
        let v = fade(y - y0 as f64);

        // Bilinear: along x first, then y.
        lerp(lerp(d00, d10, u), lerp(d01, d11, u), v)
    }

    #[inline]
    fn corner_dot(&self, cx: usize, cy: usize, x: f64, y: f64) -> f64 {
        let angle = self.angles[cx * self.size + cy];
        (x - cx as f64) * angle.cos() + (y - cy as f64) * angle.sin()
    }
}

/// Quintic smoothstep 6t⁵ − 15t⁴ + 10t³. First and second derivative
/// vanish at t = 0 and t = 1, so cell seams stay smooth.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
