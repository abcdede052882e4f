//! Chunk meshing: heightfield and block meshers writing into reusable mesh buffers.

pub mod chunk_mesh;
pub mod heightfield;
pub mod mesher;
pub mod palette;
pub mod voxel;

pub use chunk_mesh::ChunkMesh;
pub use heightfield::{ChunkMesher, VERTICES_PER_CELL};
pub use mesher::{MeshError, Mesher, face_normal};
pub use palette::Palette;
pub use voxel::{VERTICES_PER_BLOCK, VoxelMesher};
