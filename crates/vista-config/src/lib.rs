//! Configuration system for Vista.
//!
//! Provides terrain, camera, and debug settings that persist to disk as RON
//! files. Supports CLI overrides via clap, hot-reload detection, and
//! validation of terrain parameters before they reach the generator.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CameraConfig, Config, DebugConfig, MeshMode, OctaveStrategy, TerrainConfig};
pub use error::{ConfigError, ConfigurationError};

/// Default config directory (`<platform config dir>/vista`), if the platform has one.
pub fn default_config_dir() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("vista"))
}
