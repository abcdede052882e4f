//! Command-line argument parsing for Vista.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, MeshMode, OctaveStrategy};

/// Vista command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "vista", about = "Streaming procedural terrain")]
pub struct CliArgs {
    /// Grid units per chunk edge.
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// Chunks per horizontal axis.
    #[arg(long)]
    pub map_size: Option<u32>,

    /// Vertical terrain amplitude.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Horizontal noise divisor (higher is smoother).
    #[arg(long)]
    pub smoothness: Option<f64>,

    /// Noise coordinate offset.
    #[arg(long)]
    pub seed: Option<f64>,

    /// Number of summed noise octaves (1 = single pass).
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Chunk mesher.
    #[arg(long, value_enum)]
    pub mode: Option<MeshMode>,

    /// Viewer fly speed in units per second.
    #[arg(long)]
    pub player_speed: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Number of frames to simulate before exiting.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Overrides are not validated here; call [`Config::validate`] afterwards.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.chunk_size {
            self.terrain.chunk_size = size;
        }
        if let Some(size) = args.map_size {
            self.terrain.map_size = size;
        }
        if let Some(scale) = args.scale {
            self.terrain.scale = scale;
        }
        if let Some(smoothness) = args.smoothness {
            self.terrain.smoothness = smoothness;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(octaves) = args.octaves {
            self.terrain.octaves = match octaves {
                1 => OctaveStrategy::Single,
                n => OctaveStrategy::Octaves(n),
            };
        }
        if let Some(mode) = args.mode {
            self.terrain.mode = mode;
        }
        if let Some(speed) = args.player_speed {
            self.camera.player_speed = speed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
