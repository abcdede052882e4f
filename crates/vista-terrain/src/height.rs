//! World `(x, z)` to terrain height.
//!
//! Heights are a pure function of world coordinates and [`HeightParams`],
//! so two chunks sampling the same border point always agree bit for bit.

use crate::noise_field::NoiseField;

/// Parameters mapping noise to terrain height.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightParams {
    /// Vertical amplitude of the first octave.
    pub scale: f64,
    /// Horizontal divisor of the first octave. Must be positive.
    pub smoothness: f64,
    /// Offset added to the x, y, and z noise coordinates.
    pub seed: f64,
    /// Number of octaves to sum. Each successive octave halves both
    /// smoothness and scale. Values below 1 are treated as 1.
    pub octaves: u32,
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            scale: 8.0,
            smoothness: 8.0,
            seed: 0.0,
            octaves: 1,
        }
    }
}

/// Samples terrain height from a [`NoiseField`].
///
/// A single octave computes
/// `noise((x + seed) / s, seed / s, (z + seed) / s) * scale`.
#[derive(Clone, Debug)]
pub struct HeightSampler {
    noise: NoiseField,
    params: HeightParams,
}

impl HeightSampler {
    /// Create a sampler over the default noise field.
    pub fn new(params: HeightParams) -> Self {
        Self::with_noise(NoiseField::default(), params)
    }

    /// Create a sampler over an explicit noise field.
    pub fn with_noise(noise: NoiseField, params: HeightParams) -> Self {
        Self { noise, params }
    }

    /// Terrain height at world `(x, z)`.
    pub fn height(&self, x: f64, z: f64) -> f64 {
        let seed = self.params.seed;
        let mut smoothness = self.params.smoothness;
        let mut scale = self.params.scale;
        let mut total = 0.0;

        for _ in 0..self.params.octaves.max(1) {
            total += self
                .noise
                .get(x + seed, seed, z + seed, smoothness, scale);
            smoothness *= 0.5;
            scale *= 0.5;
        }

        total
    }

    /// Configured first-octave scale, used to normalize heights into color weights.
    pub fn amplitude(&self) -> f64 {
        self.params.scale
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &HeightParams {
        &self.params
    }

    /// The underlying noise field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }
}
