//! Headless Vista demo: flies a viewer across streaming terrain.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p vista-demo` for the default flight.
//! Run with `cargo run -p vista-demo -- --mode voxel --octaves 3` for block terrain.
//!
//! Editing `config.ron` while the demo runs rebuilds the terrain at the next
//! stats report.

use std::path::{Path, PathBuf};

use clap::Parser;
use glam::Vec3;
use tracing::{info, warn};
use vista_config::{CliArgs, Config};
use vista_world::{ConfigChange, RecordingSink, TerrainEngine};

/// Fixed simulation timestep (60 Hz).
const FIXED_DT: f32 = 1.0 / 60.0;

/// Frames simulated when `--frames` is not given.
const DEFAULT_FRAMES: u64 = 3600;

/// Radians per second the viewer turns while flying.
const TURN_RATE: f32 = 0.05;

/// Viewer that flies forward at a constant speed while slowly turning.
struct Flyer {
    position: Vec3,
    heading: f32,
    speed: f32,
}

impl Flyer {
    fn new(config: &Config) -> Self {
        Self {
            position: Vec3::from_array(config.camera.start_position),
            heading: 0.0,
            speed: config.camera.player_speed,
        }
    }

    fn update(&mut self, dt: f32) {
        self.heading += TURN_RATE * dt;
        let forward = Vec3::new(self.heading.cos(), 0.0, self.heading.sin());
        self.position += forward * self.speed * dt;
    }
}

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(vista_config::default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // The on-disk snapshot is kept separately so hot-reload compares like with like.
    let file_config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = with_overrides(&file_config, &args);
    if let Err(e) = config.validate() {
        eprintln!("Invalid command-line overrides: {e}, using defaults");
        config = Config::default();
    }

    let log_dir = config_dir.join("logs");
    vista_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    run(config, file_config, &config_dir, &args);
}

fn with_overrides(base: &Config, args: &CliArgs) -> Config {
    let mut config = base.clone();
    config.apply_cli_overrides(args);
    config
}

fn run(mut config: Config, mut file_config: Config, config_dir: &Path, args: &CliArgs) {
    let mut sink = RecordingSink::new();
    let mut engine = match TerrainEngine::new(config.terrain.clone(), &mut sink) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Cannot start terrain engine: {e}");
            return;
        }
    };

    let mut flyer = Flyer::new(&config);
    let frames = args.frames.unwrap_or(DEFAULT_FRAMES);
    let stats_interval = config.debug.stats_interval.max(1);
    let mut relocated_total = 0u64;

    info!(
        frames,
        chunks = engine.pool().len(),
        extent = engine.pool().layout().extent(),
        "Starting flight"
    );

    for frame in 1..=frames {
        flyer.update(FIXED_DT);
        let report = engine.tick(flyer.position, FIXED_DT, &mut sink);
        relocated_total += u64::from(report.relocated);

        if frame % stats_interval != 0 {
            continue;
        }

        info!(
            frame,
            x = flyer.position.x,
            z = flyer.position.z,
            relocated = relocated_total,
            builds = engine.rebuild_count(),
            resident_vertices = sink.resident_vertices(),
            "Terrain stats"
        );

        match file_config.reload(config_dir) {
            Ok(Some(reloaded)) => {
                config = with_overrides(&reloaded, args);
                file_config = reloaded;
                flyer.speed = config.camera.player_speed;
                match engine.apply(&config, &mut sink) {
                    Ok(ConfigChange::Rebuilt { disposal_failures }) => {
                        for failure in &disposal_failures {
                            warn!("{failure}");
                        }
                    }
                    Ok(ConfigChange::Unchanged) => {}
                    Err(e) => warn!("Rejected reloaded terrain config: {e}"),
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    info!(
        ticks = engine.ticks(),
        seconds = engine.elapsed(),
        relocated = relocated_total,
        "Flight finished"
    );
}
