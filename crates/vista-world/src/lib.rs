//! Chunk lifecycle and streaming: a fixed pool of relocatable terrain chunks
//! kept centered on the viewer, plus the engine that owns it.

pub mod chunk;
pub mod engine;
pub mod pool;
pub mod sink;
pub mod streaming;

pub use chunk::{Chunk, ChunkBuilder, ChunkId};
pub use engine::{ConfigChange, TerrainEngine, height_params};
pub use pool::{ChunkPool, PoolLayout};
pub use sink::{DisposalError, MeshSink, NullSink, RecordingSink, ResidentMesh};
pub use streaming::{StreamingController, StreamingReport};
