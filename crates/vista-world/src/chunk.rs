//! A relocatable terrain tile and the builder that regenerates its mesh.

use glam::{UVec3, Vec3};
use vista_mesh::{ChunkMesh, MeshError, Mesher};

/// Stable identifier of a chunk within its pool.
///
/// Renderers key their GPU buffers by this id. Ids are assigned in pool
/// order at initialization and never change while the pool lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub u32);

/// Regenerates chunk meshes with a single reusable scratch buffer.
///
/// Every build goes into the scratch mesh first and is swapped into the
/// chunk only when complete, so a failed build leaves the chunk untouched
/// and a successful one never exposes a half-written buffer.
pub struct ChunkBuilder {
    mesher: Box<dyn Mesher>,
    chunk_size: u32,
    scratch: ChunkMesh,
    builds: u64,
}

impl ChunkBuilder {
    /// Creates a builder for chunks of `chunk_size` using `mesher`.
    pub fn new(mesher: Box<dyn Mesher>, chunk_size: u32) -> Self {
        let scratch = ChunkMesh::with_capacity(mesher.vertex_capacity(chunk_size));
        Self {
            mesher,
            chunk_size,
            scratch,
            builds: 0,
        }
    }

    /// Grid units per chunk edge.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Vertex capacity every chunk mesh is pre-sized to.
    pub fn vertex_capacity(&self) -> usize {
        self.mesher.vertex_capacity(self.chunk_size)
    }

    /// Total successful mesh builds since creation.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    /// Build at `anchor`, then swap the result into `target`.
    fn build_into(&mut self, anchor: Vec3, target: &mut ChunkMesh) -> Result<(), MeshError> {
        self.mesher
            .build(self.chunk_size, anchor, &mut self.scratch)?;
        std::mem::swap(&mut self.scratch, target);
        self.builds += 1;
        Ok(())
    }
}

/// A fixed-footprint terrain tile.
///
/// Created once at pool initialization, then only mutated in place: its
/// anchor moves and its mesh buffer is overwritten.
#[derive(Clone, Debug)]
pub struct Chunk {
    id: ChunkId,
    cell: UVec3,
    anchor: Vec3,
    mesh: ChunkMesh,
    rebuilds: u64,
}

impl Chunk {
    /// Creates a chunk with an empty mesh pre-sized to `capacity` vertices.
    pub fn new(id: ChunkId, cell: UVec3, anchor: Vec3, capacity: usize) -> Self {
        Self {
            id,
            cell,
            anchor,
            mesh: ChunkMesh::with_capacity(capacity),
            rebuilds: 0,
        }
    }

    /// Pool-assigned identifier.
    pub fn id(&self) -> ChunkId {
        self.id
    }

    /// Grid cell `(i, j, k)` this chunk was laid out in.
    pub fn cell(&self) -> UVec3 {
        self.cell
    }

    /// World position of the chunk's minimum corner.
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Current mesh, in chunk-local coordinates.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Number of successful mesh builds for this chunk.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Rebuild the mesh at the current anchor.
    pub fn rebuild(&mut self, builder: &mut ChunkBuilder) -> Result<(), MeshError> {
        builder.build_into(self.anchor, &mut self.mesh)?;
        self.rebuilds += 1;
        Ok(())
    }

    /// Shift the anchor on X and Z and rebuild at the new position.
    ///
    /// All-or-nothing: if the build fails, anchor and mesh stay as they were.
    pub fn relocate(
        &mut self,
        delta_x: f32,
        delta_z: f32,
        builder: &mut ChunkBuilder,
    ) -> Result<(), MeshError> {
        let target = self.anchor + Vec3::new(delta_x, 0.0, delta_z);
        builder.build_into(target, &mut self.mesh)?;
        self.anchor = target;
        self.rebuilds += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_mesh::{ChunkMesher, Palette};
    use vista_terrain::{HeightParams, HeightSampler};

    /// Mesher that fails whenever the anchor lies beyond `max_x`.
    struct FencedMesher {
        inner: ChunkMesher,
        max_x: f32,
    }

    impl Mesher for FencedMesher {
        fn vertex_capacity(&self, chunk_size: u32) -> usize {
            self.inner.vertex_capacity(chunk_size)
        }

        fn build(
            &mut self,
            chunk_size: u32,
            anchor: Vec3,
            mesh: &mut ChunkMesh,
        ) -> Result<(), MeshError> {
            if anchor.x > self.max_x {
                return Err(MeshError::NonFiniteHeight {
                    x: f64::from(anchor.x),
                    z: f64::from(anchor.z),
                });
            }
            self.inner.build(chunk_size, anchor, mesh)
        }
    }

    fn heightfield() -> ChunkMesher {
        ChunkMesher::new(
            HeightSampler::new(HeightParams {
                seed: 4.0,
                ..Default::default()
            }),
            Palette::default(),
        )
    }

    fn builder(size: u32) -> ChunkBuilder {
        ChunkBuilder::new(Box::new(heightfield()), size)
    }

    #[test]
    fn test_rebuild_fills_mesh() {
        let mut b = builder(4);
        let mut chunk = Chunk::new(ChunkId(0), UVec3::ZERO, Vec3::ZERO, b.vertex_capacity());
        assert!(chunk.mesh().is_empty());

        chunk.rebuild(&mut b).unwrap();
        assert_eq!(chunk.mesh().triangle_count(), 4 * 4 * 2);
        assert_eq!(chunk.rebuilds(), 1);
        assert_eq!(b.builds(), 1);
    }

    #[test]
    fn test_relocate_moves_anchor_and_regenerates() {
        let mut b = builder(4);
        let mut chunk = Chunk::new(ChunkId(3), UVec3::ZERO, Vec3::ZERO, b.vertex_capacity());
        chunk.rebuild(&mut b).unwrap();

        chunk.relocate(40.0, -40.0, &mut b).unwrap();
        assert_eq!(chunk.anchor(), Vec3::new(40.0, 0.0, -40.0));

        let mut expected = ChunkMesh::new();
        heightfield()
            .build(4, Vec3::new(40.0, 0.0, -40.0), &mut expected)
            .unwrap();
        assert_eq!(chunk.mesh().positions(), expected.positions());
        assert_eq!(chunk.mesh().colors(), expected.colors());
        assert_eq!(chunk.rebuilds(), 2);
    }

    #[test]
    fn test_relocate_keeps_buffer_capacity() {
        let mut b = builder(6);
        let mut chunk = Chunk::new(ChunkId(0), UVec3::ZERO, Vec3::ZERO, b.vertex_capacity());
        chunk.rebuild(&mut b).unwrap();
        for _ in 0..5 {
            chunk.relocate(60.0, 0.0, &mut b).unwrap();
            assert_eq!(chunk.mesh().capacity(), b.vertex_capacity());
        }
    }

    #[test]
    fn test_failed_relocate_is_all_or_nothing() {
        let mut b = ChunkBuilder::new(
            Box::new(FencedMesher {
                inner: heightfield(),
                max_x: 10.0,
            }),
            4,
        );
        let mut chunk = Chunk::new(ChunkId(0), UVec3::ZERO, Vec3::ZERO, b.vertex_capacity());
        chunk.rebuild(&mut b).unwrap();
        let before = chunk.mesh().clone();

        let result = chunk.relocate(40.0, 0.0, &mut b);
        assert!(result.is_err());
        assert_eq!(chunk.anchor(), Vec3::ZERO);
        assert_eq!(chunk.mesh(), &before);
        assert_eq!(chunk.rebuilds(), 1);
        assert_eq!(b.builds(), 1);
    }
}
