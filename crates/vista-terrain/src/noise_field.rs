//! Coherent 3D gradient noise, the foundation for every height query.

use noise::{NoiseFn, Perlin};

/// Deterministic 3D Perlin noise sampler.
///
/// The same `(x, y, z)` always yields the same value for a given permutation
/// seed. Output is continuous and lies in `[-1, 1]`.
#[derive(Clone, Copy, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl NoiseField {
    /// Permutation seed used by [`Default`].
    pub const DEFAULT_SEED: u32 = 0;

    /// Create a noise field with the given permutation table seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// Sample the field at a (possibly fractional) coordinate.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Sample with the coordinate divided by `smoothness` and the result
    /// multiplied by `amplitude`.
    ///
    /// Higher smoothness stretches features horizontally; amplitude scales
    /// the output range to `[-amplitude, amplitude]`.
    pub fn get(&self, x: f64, y: f64, z: f64, smoothness: f64, amplitude: f64) -> f64 {
        self.sample(x / smoothness, y / smoothness, z / smoothness) * amplitude
    }

    /// Permutation seed this field was built with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}
