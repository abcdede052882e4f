//! Block chunk meshing: unit cubes stacked up to the sampled column height.
//!
//! Every solid block emits all six faces. Hidden faces are not culled.

use glam::Vec3;
use vista_terrain::HeightSampler;

use crate::chunk_mesh::ChunkMesh;
use crate::mesher::{MeshError, Mesher};
use crate::palette::Palette;

/// Vertices emitted per solid block (6 faces x 2 triangles).
pub const VERTICES_PER_BLOCK: usize = 36;

/// Unit cube faces: outward normal and two triangles of corner offsets.
const BLOCK_FACES: [([f32; 3], [[f32; 3]; 6]); 6] = [
    // bottom
    (
        [0.0, -1.0, 0.0],
        [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
    ),
    // top
    (
        [0.0, 1.0, 0.0],
        [
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
        ],
    ),
    // -x
    (
        [-1.0, 0.0, 0.0],
        [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
    ),
    // +x
    (
        [1.0, 0.0, 0.0],
        [
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
        ],
    ),
    // +z
    (
        [0.0, 0.0, 1.0],
        [
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
    ),
    // -z
    (
        [0.0, 0.0, -1.0],
        [
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
    ),
];

/// Builds block meshes for one cubic chunk.
///
/// A block at local `(i, j, k)` is solid when `anchor.y + j <= height(x, z)`.
#[derive(Clone, Debug)]
pub struct VoxelMesher {
    sampler: HeightSampler,
    palette: Palette,
}

impl VoxelMesher {
    /// Create a mesher sampling `sampler` and coloring with `palette`.
    pub fn new(sampler: HeightSampler, palette: Palette) -> Self {
        Self { sampler, palette }
    }

    /// The height sampler used for every column.
    pub fn sampler(&self) -> &HeightSampler {
        &self.sampler
    }

    fn push_block(&self, mesh: &mut ChunkMesh, local: Vec3, world_y: f64) {
        let color = self
            .palette
            .color(Palette::weight(world_y, self.sampler.amplitude()));
        for (normal, corners) in &BLOCK_FACES {
            for corner in corners {
                let position = local + Vec3::from_array(*corner);
                mesh.push(position.to_array(), *normal, color);
            }
        }
    }
}

impl Mesher for VoxelMesher {
    fn vertex_capacity(&self, chunk_size: u32) -> usize {
        let n = chunk_size as usize;
        n.saturating_pow(3).saturating_mul(VERTICES_PER_BLOCK)
    }

    fn build(
        &mut self,
        chunk_size: u32,
        anchor: Vec3,
        mesh: &mut ChunkMesh,
    ) -> Result<(), MeshError> {
        mesh.reset(self.vertex_capacity(chunk_size));
        if chunk_size == 0 {
            tracing::warn!(
                "voxel build with chunk_size 0 at ({}, {}, {}): empty mesh",
                anchor.x,
                anchor.y,
                anchor.z
            );
            return Ok(());
        }

        for i in 0..chunk_size {
            for k in 0..chunk_size {
                let x = f64::from(anchor.x) + f64::from(i);
                let z = f64::from(anchor.z) + f64::from(k);
                let height = self.sampler.height(x, z);
                if !height.is_finite() {
                    return Err(MeshError::NonFiniteHeight { x, z });
                }
                for j in 0..chunk_size {
                    let world_y = f64::from(anchor.y) + f64::from(j);
                    if world_y <= height {
                        let local = Vec3::new(i as f32, j as f32, k as f32);
                        self.push_block(mesh, local, world_y);
                    }
                }
            }
        }

        Ok(())
    }
}
