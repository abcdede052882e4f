//! Top-level terrain engine: one config snapshot, one pool, one mesher.
//!
//! The engine is driven from outside. The host calls [`TerrainEngine::tick`]
//! once per frame with the viewer position, and [`TerrainEngine::apply_config`]
//! whenever the terrain parameters are edited.

use glam::Vec3;
use vista_config::{Config, ConfigurationError, MeshMode, TerrainConfig};
use vista_mesh::{ChunkMesher, Mesher, Palette, VoxelMesher};
use vista_terrain::{HeightParams, HeightSampler};

use crate::chunk::ChunkBuilder;
use crate::pool::{ChunkPool, PoolLayout};
use crate::sink::{DisposalError, MeshSink};
use crate::streaming::{StreamingController, StreamingReport};

/// Outcome of [`TerrainEngine::apply_config`].
#[derive(Debug, PartialEq)]
pub enum ConfigChange {
    /// The terrain parameters were identical; nothing was rebuilt.
    Unchanged,
    /// The pool was torn down and rebuilt from the new snapshot.
    Rebuilt {
        /// Buffers the renderer failed to release during teardown.
        disposal_failures: Vec<DisposalError>,
    },
}

/// Owns everything needed to generate and stream terrain.
pub struct TerrainEngine {
    config: TerrainConfig,
    pool: ChunkPool,
    builder: ChunkBuilder,
    streaming: StreamingController,
    ticks: u64,
    elapsed: f64,
}

impl TerrainEngine {
    /// Validate `config`, build the pool, and upload every chunk to `sink`.
    pub fn new(config: TerrainConfig, sink: &mut dyn MeshSink) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let layout = PoolLayout::from_config(&config);
        let mut builder = make_builder(&config);
        let pool = ChunkPool::initialize(layout, &mut builder);
        pool.upload_all(sink);

        tracing::info!(
            chunks = pool.len(),
            chunk_size = config.chunk_size,
            map_size = config.map_size,
            mode = ?config.mode,
            "terrain engine ready"
        );

        Ok(Self {
            streaming: StreamingController::new(&layout),
            config,
            pool,
            builder,
            ticks: 0,
            elapsed: 0.0,
        })
    }

    /// Run one frame of streaming around `viewer`.
    ///
    /// Every relocated chunk is re-uploaded to `sink` once its new mesh is
    /// complete.
    pub fn tick(&mut self, viewer: Vec3, dt: f32, sink: &mut dyn MeshSink) -> StreamingReport {
        self.ticks += 1;
        self.elapsed += f64::from(dt);

        let report = self
            .streaming
            .tick(viewer, &mut self.pool, &mut self.builder);
        for id in &report.moved {
            if let Some(chunk) = self.pool.get(*id) {
                sink.upload(chunk.id(), chunk.anchor(), chunk.mesh());
            }
        }

        if report.relocated > 0 {
            tracing::debug!(
                tick = self.ticks,
                relocated = report.relocated,
                failed = report.failed,
                "streamed chunks"
            );
        }
        report
    }

    /// Switch to new terrain parameters.
    ///
    /// The snapshot is validated before anything is touched; on error the
    /// engine keeps running on its previous configuration. A snapshot equal to
    /// the current one is a no-op. Anything else rebuilds the whole pool.
    pub fn apply_config(
        &mut self,
        config: &TerrainConfig,
        sink: &mut dyn MeshSink,
    ) -> Result<ConfigChange, ConfigurationError> {
        config.validate()?;
        if *config == self.config {
            return Ok(ConfigChange::Unchanged);
        }

        let layout = PoolLayout::from_config(config);
        let mut builder = make_builder(config);
        let disposal_failures = self.pool.rebuild_all(layout, &mut builder, sink);
        self.pool.upload_all(sink);

        self.builder = builder;
        self.streaming = StreamingController::new(&layout);
        self.config = config.clone();

        tracing::info!(
            chunks = self.pool.len(),
            disposal_failures = disposal_failures.len(),
            "terrain rebuilt from new config"
        );
        Ok(ConfigChange::Rebuilt { disposal_failures })
    }

    /// Apply the terrain section of a full config. Camera and debug settings
    /// never cause a rebuild.
    pub fn apply(
        &mut self,
        config: &Config,
        sink: &mut dyn MeshSink,
    ) -> Result<ConfigChange, ConfigurationError> {
        self.apply_config(&config.terrain, sink)
    }

    /// The configuration snapshot currently in effect.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// The chunk pool.
    pub fn pool(&self) -> &ChunkPool {
        &self.pool
    }

    /// Mesh builds since the pool was last laid out.
    pub fn rebuild_count(&self) -> u64 {
        self.builder.builds()
    }

    /// Number of ticks run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sum of `dt` over all ticks, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Streaming thresholds in effect.
    pub fn streaming(&self) -> &StreamingController {
        &self.streaming
    }
}

/// Height parameters for a terrain config.
pub fn height_params(config: &TerrainConfig) -> HeightParams {
    HeightParams {
        scale: config.scale,
        smoothness: config.smoothness,
        seed: config.seed,
        octaves: config.octaves.count(),
    }
}

fn make_builder(config: &TerrainConfig) -> ChunkBuilder {
    let sampler = HeightSampler::new(height_params(config));
    let palette = Palette::new(config.ground_color, config.mountain_color);
    let mesher: Box<dyn Mesher> = match config.mode {
        MeshMode::Heightfield => Box::new(ChunkMesher::new(sampler, palette)),
        MeshMode::Voxel => Box::new(VoxelMesher::new(sampler, palette)),
    };
    ChunkBuilder::new(mesher, config.chunk_size)
}
