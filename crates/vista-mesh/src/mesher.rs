//! The seam between chunk owners and mesh generators.

use glam::Vec3;

use crate::chunk_mesh::ChunkMesh;

/// Errors from a single chunk mesh build.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// The height sampler produced NaN or infinity.
    #[error("non-finite terrain height at world ({x}, {z})")]
    NonFiniteHeight {
        /// World X of the failed sample.
        x: f64,
        /// World Z of the failed sample.
        z: f64,
    },
}

/// Builds the mesh for one chunk footprint.
///
/// Implementations write into `mesh` with overwrite semantics. On error the
/// contents of `mesh` are unspecified, so callers that must keep the
/// previous geometry build into a scratch buffer and swap on success.
pub trait Mesher {
    /// Largest vertex count a chunk of `chunk_size` can produce.
    fn vertex_capacity(&self, chunk_size: u32) -> usize;

    /// Build the mesh for the chunk whose minimum corner sits at `anchor`.
    fn build(&mut self, chunk_size: u32, anchor: Vec3, mesh: &mut ChunkMesh)
    -> Result<(), MeshError>;
}

/// Flat face normal of triangle `(a, b, c)`: `normalize((b - a) x (c - a))`.
///
/// Degenerate triangles get a zero normal.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}
