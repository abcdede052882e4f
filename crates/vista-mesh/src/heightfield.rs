//! Heightfield chunk meshing: a triangulated, flat-shaded height surface.
//!
//! The height lattice has `chunk_size + 1` rows along Z and as many columns
//! along X, sampled at integer world offsets from the chunk anchor. Each unit
//! cell with corners `v00, v10, v01, v11` (row, column) becomes the triangles
//! `(v00, v10, v01)` and `(v10, v11, v01)`, both facing +Y on flat ground.

use glam::Vec3;
use vista_terrain::HeightSampler;

use crate::chunk_mesh::ChunkMesh;
use crate::mesher::{MeshError, Mesher, face_normal};
use crate::palette::Palette;

/// Vertices emitted per unit cell (two triangles).
pub const VERTICES_PER_CELL: usize = 6;

/// Builds flat-shaded height surface meshes.
#[derive(Clone, Debug)]
pub struct ChunkMesher {
    sampler: HeightSampler,
    palette: Palette,
    /// Reused `(chunk_size + 1)^2` height lattice, row-major.
    lattice: Vec<f64>,
}

impl ChunkMesher {
    /// Create a mesher sampling `sampler` and coloring with `palette`.
    pub fn new(sampler: HeightSampler, palette: Palette) -> Self {
        Self {
            sampler,
            palette,
            lattice: Vec::new(),
        }
    }

    /// The height sampler used for every lattice point.
    pub fn sampler(&self) -> &HeightSampler {
        &self.sampler
    }

    fn sample_lattice(&mut self, stride: usize, anchor: Vec3) -> Result<(), MeshError> {
        self.lattice.clear();
        for row in 0..stride {
            for col in 0..stride {
                let x = f64::from(anchor.x) + col as f64;
                let z = f64::from(anchor.z) + row as f64;
                let height = self.sampler.height(x, z);
                if !height.is_finite() {
                    return Err(MeshError::NonFiniteHeight { x, z });
                }
                self.lattice.push(height);
            }
        }
        Ok(())
    }

    fn corner(&self, stride: usize, row: usize, col: usize) -> (Vec3, f64) {
        let height = self.lattice[row * stride + col];
        (Vec3::new(col as f32, height as f32, row as f32), height)
    }

    fn emit_triangle(&self, mesh: &mut ChunkMesh, corners: [(Vec3, f64); 3]) {
        let normal = face_normal(corners[0].0, corners[1].0, corners[2].0).to_array();
        let scale = self.sampler.amplitude();
        for (position, height) in corners {
            let color = self.palette.color(Palette::weight(height, scale));
            mesh.push(position.to_array(), normal, color);
        }
    }
}

impl Mesher for ChunkMesher {
    fn vertex_capacity(&self, chunk_size: u32) -> usize {
        let n = chunk_size as usize;
        n.saturating_mul(n).saturating_mul(VERTICES_PER_CELL)
    }

    fn build(
        &mut self,
        chunk_size: u32,
        anchor: Vec3,
        mesh: &mut ChunkMesh,
    ) -> Result<(), MeshError> {
        if chunk_size == 0 {
            tracing::warn!(
                "heightfield build with chunk_size 0 at ({}, {}): empty mesh",
                anchor.x,
                anchor.z
            );
            mesh.clear();
            return Ok(());
        }

        let n = chunk_size as usize;
        let stride = n + 1;
        self.sample_lattice(stride, anchor)?;

        mesh.reset(self.vertex_capacity(chunk_size));
        for row in 0..n {
            for col in 0..n {
                let v00 = self.corner(stride, row, col);
                let v10 = self.corner(stride, row + 1, col);
                let v01 = self.corner(stride, row, col + 1);
                let v11 = self.corner(stride, row + 1, col + 1);
                self.emit_triangle(mesh, [v00, v10, v01]);
                self.emit_triangle(mesh, [v10, v11, v01]);
            }
        }

        debug_assert_eq!(mesh.vertex_count(), n * n * VERTICES_PER_CELL);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_terrain::HeightParams;

    fn mesher(params: HeightParams) -> ChunkMesher {
        ChunkMesher::new(HeightSampler::new(params), Palette::default())
    }

    fn default_mesher() -> ChunkMesher {
        mesher(HeightParams {
            seed: 11.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_triangle_count_is_two_per_cell() {
        let mut m = default_mesher();
        for size in 1..=12u32 {
            let mut mesh = ChunkMesh::new();
            m.build(size, Vec3::ZERO, &mut mesh).unwrap();
            let cells = (size * size) as usize;
            assert_eq!(mesh.triangle_count(), cells * 2);
            assert_eq!(mesh.vertex_count(), cells * VERTICES_PER_CELL);
            assert_eq!(mesh.normals().len(), mesh.positions().len());
            assert_eq!(mesh.colors().len(), mesh.positions().len());
        }
    }

    #[test]
    fn test_zero_chunk_size_yields_empty_mesh() {
        let mut m = default_mesher();
        let mut mesh = ChunkMesh::with_capacity(6);
        mesh.push([1.0; 3], [0.0, 1.0, 0.0], [1.0; 3]);
        m.build(0, Vec3::new(5.0, 0.0, 5.0), &mut mesh).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_rebuild_reuses_buffer() {
        let mut m = default_mesher();
        let mut mesh = ChunkMesh::new();
        m.build(8, Vec3::ZERO, &mut mesh).unwrap();
        let capacity = mesh.capacity();
        m.build(8, Vec3::new(80.0, 0.0, -40.0), &mut mesh).unwrap();
        assert_eq!(mesh.capacity(), capacity);
        assert_eq!(mesh.vertex_count(), 8 * 8 * VERTICES_PER_CELL);
    }

    #[test]
    fn test_positions_are_local_with_world_heights() {
        let mut m = default_mesher();
        let anchor = Vec3::new(30.0, 0.0, -20.0);
        let mut mesh = ChunkMesh::new();
        m.build(4, anchor, &mut mesh).unwrap();

        for p in mesh.positions() {
            assert!((0.0..=4.0).contains(&p[0]));
            assert!((0.0..=4.0).contains(&p[2]));
            let expected = m
                .sampler()
                .height(f64::from(anchor.x + p[0]), f64::from(anchor.z + p[2]));
            assert_eq!(p[1], expected as f32);
        }
    }

    #[test]
    fn test_first_cell_layout() {
        let mut m = default_mesher();
        let mut mesh = ChunkMesh::new();
        m.build(2, Vec3::ZERO, &mut mesh).unwrap();

        let xz: Vec<[f32; 2]> = mesh.positions()[..6].iter().map(|p| [p[0], p[2]]).collect();
        assert_eq!(
            xz,
            vec![
                [0.0, 0.0],
                [0.0, 1.0],
                [1.0, 0.0],
                [0.0, 1.0],
                [1.0, 1.0],
                [1.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_flat_normals_shared_per_triangle_and_upward() {
        let mut m = default_mesher();
        let mut mesh = ChunkMesh::new();
        m.build(6, Vec3::new(-12.0, 0.0, 7.0), &mut mesh).unwrap();

        for (tri, normals) in mesh.normals().chunks_exact(3).enumerate() {
            assert_eq!(normals[0], normals[1]);
            assert_eq!(normals[1], normals[2]);
            let n = Vec3::from_array(normals[0]);
            assert!((n.length() - 1.0).abs() < 1e-5, "triangle {tri} normal not unit");
            assert!(n.y > 0.0, "triangle {tri} normal faces down: {n}");

            let p = &mesh.positions()[tri * 3..tri * 3 + 3];
            let expected = face_normal(
                Vec3::from_array(p[0]),
                Vec3::from_array(p[1]),
                Vec3::from_array(p[2]),
            );
            assert!((n - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_flat_terrain_colors_are_ground() {
        let mut m = mesher(HeightParams {
            scale: 0.0,
            ..Default::default()
        });
        let mut mesh = ChunkMesh::new();
        m.build(3, Vec3::ZERO, &mut mesh).unwrap();
        let ground = Palette::default().ground.to_array();
        assert!(mesh.colors().iter().all(|c| *c == ground));
        assert!(mesh.normals().iter().all(|n| *n == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_colors_follow_height_weight() {
        let mut m = default_mesher();
        let mut mesh = ChunkMesh::new();
        m.build(5, Vec3::new(3.0, 0.0, 3.0), &mut mesh).unwrap();
        let palette = Palette::default();
        let scale = m.sampler().amplitude();
        for (p, c) in mesh.positions().iter().zip(mesh.colors()) {
            let height = m.sampler().height(f64::from(3.0 + p[0]), f64::from(3.0 + p[2]));
            assert_eq!(*c, palette.color(Palette::weight(height, scale)));
        }
    }

    #[test]
    fn test_adjacent_chunks_share_edge_heights() {
        let mut m = default_mesher();
        let size = 8u32;
        let mut left = ChunkMesh::new();
        let mut right = ChunkMesh::new();
        m.build(size, Vec3::new(16.0, 0.0, 0.0), &mut left).unwrap();
        m.build(size, Vec3::new(24.0, 0.0, 0.0), &mut right).unwrap();

        let edge = |mesh: &ChunkMesh, local_x: f32| -> Vec<(u32, u32)> {
            let mut points: Vec<(u32, u32)> = mesh
                .positions()
                .iter()
                .filter(|p| p[0] == local_x)
                .map(|p| (p[2] as u32, p[1].to_bits()))
                .collect();
            points.sort();
            points.dedup();
            points
        };

        let left_edge = edge(&left, size as f32);
        let right_edge = edge(&right, 0.0);
        assert_eq!(left_edge.len(), size as usize + 1);
        assert_eq!(left_edge, right_edge, "shared edge heights must be bit-identical");
    }

    #[test]
    fn test_non_finite_height_is_an_error() {
        let mut m = mesher(HeightParams {
            scale: f64::INFINITY,
            seed: 0.25,
            ..Default::default()
        });
        let mut mesh = ChunkMesh::new();
        let result = m.build(2, Vec3::new(0.5, 0.0, 0.5), &mut mesh);
        assert!(matches!(result, Err(MeshError::NonFiniteHeight { .. })));
    }
}
