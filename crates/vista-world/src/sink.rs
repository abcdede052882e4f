//! Renderer-facing mesh contract.
//!
//! The engine owns no GPU resources. It hands finished meshes to a
//! [`MeshSink`] and asks the sink to release them when the pool is torn down.

use glam::Vec3;
use rustc_hash::FxHashMap;
use vista_mesh::ChunkMesh;

use crate::chunk::ChunkId;

/// A renderer failed to release a retired chunk buffer.
///
/// The engine cannot recover from this; it hands the error back to the
/// caller that requested the rebuild.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to dispose mesh for chunk {}: {reason}", .chunk.0)]
pub struct DisposalError {
    /// Chunk whose buffer could not be released.
    pub chunk: ChunkId,
    /// Renderer-specific description.
    pub reason: String,
}

/// Consumer of chunk meshes.
pub trait MeshSink {
    /// A chunk's mesh was (re)built. `anchor` is the chunk's world transform;
    /// the mesh is in chunk-local coordinates.
    fn upload(&mut self, id: ChunkId, anchor: Vec3, mesh: &ChunkMesh);

    /// The chunk is being retired; release whatever was uploaded for it.
    fn dispose(&mut self, id: ChunkId) -> Result<(), DisposalError>;
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MeshSink for NullSink {
    fn upload(&mut self, _id: ChunkId, _anchor: Vec3, _mesh: &ChunkMesh) {}

    fn dispose(&mut self, _id: ChunkId) -> Result<(), DisposalError> {
        Ok(())
    }
}

/// What a [`RecordingSink`] holds for one chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResidentMesh {
    /// World transform at the last upload.
    pub anchor: Vec3,
    /// Vertex count at the last upload.
    pub vertices: usize,
}

/// Sink that tracks what a renderer would hold, for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Total upload calls.
    pub uploads: u64,
    /// Total successful dispose calls.
    pub disposals: u64,
    /// Meshes currently resident, keyed by chunk.
    pub resident: FxHashMap<ChunkId, ResidentMesh>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total vertices across resident meshes.
    pub fn resident_vertices(&self) -> usize {
        self.resident.values().map(|m| m.vertices).sum()
    }
}

impl MeshSink for RecordingSink {
    fn upload(&mut self, id: ChunkId, anchor: Vec3, mesh: &ChunkMesh) {
        self.uploads += 1;
        self.resident.insert(
            id,
            ResidentMesh {
                anchor,
                vertices: mesh.vertex_count(),
            },
        );
    }

    fn dispose(&mut self, id: ChunkId) -> Result<(), DisposalError> {
        match self.resident.remove(&id) {
            Some(_) => {
                self.disposals += 1;
                Ok(())
            }
            None => Err(DisposalError {
                chunk: id,
                reason: "no resident mesh".to_string(),
            }),
        }
    }
}
