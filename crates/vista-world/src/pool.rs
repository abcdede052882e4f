//! Fixed-size chunk pool tiling a square area around an origin.
//!
//! The pool is laid out once per terrain configuration and never resized.
//! Streaming moves individual chunks; a configuration change tears the whole
//! pool down and lays it out again.

use glam::{UVec3, Vec3};
use vista_config::TerrainConfig;

use crate::chunk::{Chunk, ChunkBuilder, ChunkId};
use crate::sink::{DisposalError, MeshSink};

/// Grid geometry of a chunk pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolLayout {
    /// Grid units per chunk edge.
    pub chunk_size: u32,
    /// Chunks per horizontal axis.
    pub map_size: u32,
    /// Chunk layers stacked vertically (1 for heightfields).
    pub layers: u32,
    /// World X of chunk (0, 0, 0).
    pub origin_x: i32,
    /// World Z of chunk (0, 0, 0).
    pub origin_z: i32,
}

impl PoolLayout {
    /// Layout described by a validated terrain config.
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            map_size: config.map_size,
            layers: config.layers(),
            origin_x: config.origin_x,
            origin_z: config.origin_z,
        }
    }

    /// Edge length of the tiled area in world units.
    pub fn extent(&self) -> u32 {
        self.chunk_size.saturating_mul(self.map_size)
    }

    /// Number of chunks the pool holds.
    pub fn chunk_count(&self) -> usize {
        let map = self.map_size as usize;
        map * map * self.layers as usize
    }

    /// Horizontal world area covered by the pool.
    pub fn covered_area(&self) -> u64 {
        let extent = u64::from(self.extent());
        extent * extent
    }

    /// Initial anchor of grid cell `(i, j, k)`.
    pub fn anchor_for(&self, cell: UVec3) -> Vec3 {
        let size = i64::from(self.chunk_size);
        Vec3::new(
            (i64::from(cell.x) * size + i64::from(self.origin_x)) as f32,
            (i64::from(cell.y) * size) as f32,
            (i64::from(cell.z) * size + i64::from(self.origin_z)) as f32,
        )
    }
}

/// The fixed set of chunks covering the terrain around the viewer.
#[derive(Clone, Debug)]
pub struct ChunkPool {
    layout: PoolLayout,
    chunks: Vec<Chunk>,
}

impl ChunkPool {
    /// Lay out and build every chunk once.
    ///
    /// A chunk whose first build fails keeps an empty mesh; the failure is
    /// logged and the remaining chunks are still built.
    pub fn initialize(layout: PoolLayout, builder: &mut ChunkBuilder) -> Self {
        let mut chunks = Vec::with_capacity(layout.chunk_count());
        let capacity = builder.vertex_capacity();

        for i in 0..layout.map_size {
            for j in 0..layout.layers {
                for k in 0..layout.map_size {
                    let cell = UVec3::new(i, j, k);
                    let id = ChunkId(chunks.len() as u32);
                    let mut chunk = Chunk::new(id, cell, layout.anchor_for(cell), capacity);
                    if let Err(e) = chunk.rebuild(builder) {
                        tracing::warn!(chunk = id.0, "initial chunk build failed: {e}");
                    }
                    chunks.push(chunk);
                }
            }
        }

        tracing::debug!(
            chunks = chunks.len(),
            extent = layout.extent(),
            "chunk pool initialized"
        );
        Self { layout, chunks }
    }

    /// Dispose every chunk's render resources, then lay the pool out again.
    ///
    /// Disposal failures do not stop the rebuild; they are returned so the
    /// renderer's owner can deal with them.
    pub fn rebuild_all(
        &mut self,
        layout: PoolLayout,
        builder: &mut ChunkBuilder,
        sink: &mut dyn MeshSink,
    ) -> Vec<DisposalError> {
        let failures: Vec<DisposalError> = self
            .chunks
            .iter()
            .filter_map(|chunk| sink.dispose(chunk.id()).err())
            .collect();
        for failure in &failures {
            tracing::error!("{failure}");
        }

        *self = Self::initialize(layout, builder);
        failures
    }

    /// Hand every chunk's current mesh to the sink.
    pub fn upload_all(&self, sink: &mut dyn MeshSink) {
        for chunk in &self.chunks {
            sink.upload(chunk.id(), chunk.anchor(), chunk.mesh());
        }
    }

    /// The layout this pool was built from.
    pub fn layout(&self) -> &PoolLayout {
        &self.layout
    }

    /// Number of chunks in the pool.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if the pool holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk by id.
    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id.0 as usize)
    }

    /// Iterates over chunks in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Mutable iteration in pool order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks.iter_mut()
    }
}
