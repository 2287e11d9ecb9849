//! **relief-terrain** — Procedural surface sampling.
//!
//! A [`SurfaceSampler`] owns a [`GradientNoiseField`] and derives two
//! views of the same surface from it: a dense heightmap (one sample
//! per integer coordinate, consumed by renderers) and a routable
//! [`PointGrid`] at a caller-chosen density. Both use the elevation
//! rule `z = amplitude * noise(x / divisor, y / divisor)`.

use std::fmt;

use rand::Rng;

use relief_core::{GridError, GridPoint, PointGrid};
use relief_noise::{GradientNoiseField, NoiseError};

/// Errors from terrain construction and discretization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerrainError {
    /// Terrain width must be at least 1.
    ZeroWidth,
    /// Sampling density must be strictly positive.
    NonPositiveDensity { density: f64 },
    /// `width * density` must be integral so the sampled sequence
    /// forms a square grid.
    NonIntegralSampling { width: usize, density: f64 },
    /// Noise field construction failed.
    Noise(NoiseError),
    /// Grid assembly failed.
    Grid(GridError),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::ZeroWidth => write!(f, "terrain width must be at least 1"),
            TerrainError::NonPositiveDensity { density } => {
                write!(f, "sampling density {density} must be positive")
            }
            TerrainError::NonIntegralSampling { width, density } => write!(
                f,
                "width {width} times density {density} is not integral; \
                 sampled points would not form a square grid"
            ),
            TerrainError::Noise(e) => write!(f, "noise field: {e}"),
            TerrainError::Grid(e) => write!(f, "point grid: {e}"),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Noise(e) => Some(e),
            TerrainError::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NoiseError> for TerrainError {
    fn from(e: NoiseError) -> Self {
        TerrainError::Noise(e)
    }
}

impl From<GridError> for TerrainError {
    fn from(e: GridError) -> Self {
        TerrainError::Grid(e)
    }
}

/// Sampling constants of the surface.
#[derive(Debug, Clone, Copy)]
pub struct TerrainParams {
    /// Gradient lattice size of the underlying noise field.
    pub lattice_size: usize,
    /// Elevation scale applied to the raw noise value.
    pub amplitude: f64,
    /// Plane coordinates are divided by this before sampling the
    /// noise, stretching features across the surface.
    pub divisor: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            lattice_size: 100,
            amplitude: 20.0,
            divisor: 15.0,
        }
    }
}

/// A procedurally generated surface over `[0, width] × [0, width]`.
///
/// Immutable after construction. One sampler per terrain instance;
/// any number of grids may be derived from it.
pub struct SurfaceSampler {
    width: usize,
    params: TerrainParams,
    field: GradientNoiseField,
    /// `(width + 1)²` elevations, row-major with y fastest.
    height_map: Vec<f64>,
}

impl SurfaceSampler {
    /// Build a surface of the given width with default parameters,
    /// drawing gradient directions from `rng`.
    pub fn new(width: usize, rng: &mut impl Rng) -> Result<Self, TerrainError> {
        Self::with_params(width, TerrainParams::default(), rng)
    }

    /// Build a surface with explicit [`TerrainParams`].
    pub fn with_params(
        width: usize,
        params: TerrainParams,
        rng: &mut impl Rng,
    ) -> Result<Self, TerrainError> {
        if width == 0 {
            return Err(TerrainError::ZeroWidth);
        }
        let field = GradientNoiseField::new(params.lattice_size, rng)?;

        let samples = width + 1;
        let mut height_map = Vec::with_capacity(samples * samples);
        for x in 0..samples {
            for y in 0..samples {
                height_map.push(elevation(&field, &params, x as f64, y as f64));
            }
        }
        log::debug!(
            "built {samples}x{samples} heightmap (lattice {}, amplitude {})",
            params.lattice_size,
            params.amplitude
        );

        Ok(Self {
            width,
            params,
            field,
            height_map,
        })
    }

    /// Surface width (exclusive of the final sample row).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The sampling constants in effect.
    #[inline]
    pub fn params(&self) -> TerrainParams {
        self.params
    }

    /// Elevation at integer coordinates, or `None` out of range.
    #[inline]
    pub fn height(&self, x: usize, y: usize) -> Option<f64> {
        let samples = self.width + 1;
        if x >= samples || y >= samples {
            return None;
        }
        Some(self.height_map[x * samples + y])
    }

    /// The full `(width + 1)²` heightmap, row-major with y fastest.
    #[inline]
    pub fn height_map(&self) -> &[f64] {
        &self.height_map
    }

    /// Elevation at arbitrary plane coordinates.
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        elevation(&self.field, &self.params, x, y)
    }

    /// Discretize the surface into a routable [`PointGrid`].
    ///
    /// Emits points for x from 0 to width in steps of `1 / density`,
    /// and for each x, y over the same range (y varies fastest), each
    /// with its sampled elevation. `width * density` must be integral
    /// so the result has `(width * density + 1)²` nodes; otherwise
    /// [`TerrainError::NonIntegralSampling`] is returned.
    pub fn point_grid(&self, density: f64) -> Result<PointGrid, TerrainError> {
        if !(density > 0.0) {
            return Err(TerrainError::NonPositiveDensity { density });
        }
        let steps = self.width as f64 * density;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(TerrainError::NonIntegralSampling {
                width: self.width,
                density,
            });
        }
        let side = steps.round() as usize + 1;

        // Index-stepped rather than accumulating x += 1/density, so
        // float drift cannot change the sample count.
        let mut nodes = Vec::with_capacity(side * side);
        for i in 0..side {
            let x = i as f64 / density;
            for j in 0..side {
                let y = j as f64 / density;
                nodes.push(GridPoint::new(x, y, self.sample(x, y)));
            }
        }
        log::debug!("discretized surface into {side}x{side} point grid");
        Ok(PointGrid::from_nodes(nodes)?)
    }
}

#[inline]
fn elevation(field: &GradientNoiseField, params: &TerrainParams, x: f64, y: f64) -> f64 {
    params.amplitude * field.noise(x / params.divisor, y / params.divisor)
}
