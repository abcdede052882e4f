//! Procedural terrain heights: seeded 3D noise and octave-summed height sampling.

mod height;
mod noise_field;

pub use height::{HeightParams, HeightSampler};
pub use noise_field::NoiseField;
