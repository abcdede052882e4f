//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigurationError};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain generation settings. Any change here rebuilds the chunk pool.
    pub terrain: TerrainConfig,
    /// Viewer settings. Never affects generated terrain.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// How many noise passes are summed per height sample.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OctaveStrategy {
    /// One pass at the configured smoothness and scale.
    #[default]
    Single,
    /// `n` passes, halving smoothness and scale each time.
    Octaves(u32),
}

impl OctaveStrategy {
    /// Number of noise passes per sample.
    pub fn count(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Octaves(n) => n,
        }
    }
}

/// Which mesher builds chunk geometry.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum,
)]
pub enum MeshMode {
    /// Triangulated height surface, one chunk layer.
    #[default]
    Heightfield,
    /// Unit blocks stacked up to the sampled height, `vertical_layers` chunk layers.
    Voxel,
}

/// Terrain generation parameters.
///
/// One validated snapshot of this struct drives an entire generation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid units per chunk edge.
    pub chunk_size: u32,
    /// Chunks per horizontal axis.
    pub map_size: u32,
    /// Vertical amplitude of the height noise.
    pub scale: f64,
    /// Horizontal noise frequency divisor. Higher is smoother.
    pub smoothness: f64,
    /// Offset added to every noise coordinate.
    pub seed: f64,
    /// Single-pass or multi-octave height sampling.
    pub octaves: OctaveStrategy,
    /// Mesher used for every chunk.
    pub mode: MeshMode,
    /// Chunk layers stacked vertically in voxel mode.
    pub vertical_layers: u32,
    /// World X of the pool's first chunk.
    pub origin_x: i32,
    /// World Z of the pool's first chunk.
    pub origin_z: i32,
    /// Vertex color at zero height.
    pub ground_color: [f32; 3],
    /// Vertex color at height == scale.
    pub mountain_color: [f32; 3],
}

/// Viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Fly speed in world units per second.
    pub player_speed: f32,
    /// Viewer position on startup.
    pub start_position: [f32; 3],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Ticks between streaming statistics log lines (0 = never).
    pub stats_interval: u64,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            map_size: 10,
            scale: 8.0,
            smoothness: 8.0,
            seed: 0.0,
            octaves: OctaveStrategy::Single,
            mode: MeshMode::Heightfield,
            vertical_layers: 2,
            origin_x: -50,
            origin_z: -50,
            ground_color: [0.22, 0.52, 0.18],
            mountain_color: [0.92, 0.92, 0.95],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            start_position: [0.0, 12.0, 0.0],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stats_interval: 120,
        }
    }
}

// --- Validation ---

impl TerrainConfig {
    /// Check every parameter the generator divides by, loops over, or tiles with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.chunk_size == 0 {
            return Err(ConfigurationError::ZeroChunkSize);
        }
        if self.map_size == 0 {
            return Err(ConfigurationError::ZeroMapSize);
        }
        if self.vertical_layers == 0 {
            return Err(ConfigurationError::ZeroVerticalLayers);
        }
        if self.chunk_size.checked_mul(self.map_size).is_none() {
            return Err(ConfigurationError::ExtentOverflow {
                chunk_size: self.chunk_size,
                map_size: self.map_size,
            });
        }
        for (field, value) in [
            ("scale", self.scale),
            ("smoothness", self.smoothness),
            ("seed", self.seed),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field });
            }
        }
        if self.smoothness <= 0.0 {
            return Err(ConfigurationError::NonPositiveSmoothness(self.smoothness));
        }
        if self.octaves.count() == 0 {
            return Err(ConfigurationError::ZeroOctaves);
        }
        let colors = self.ground_color.iter().chain(self.mountain_color.iter());
        if colors.into_iter().any(|c| !c.is_finite()) {
            return Err(ConfigurationError::NonFinite { field: "color" });
        }
        Ok(())
    }

    /// Edge length of the whole pool in world units.
    ///
    /// Only meaningful after [`validate`](Self::validate) has passed.
    pub fn extent(&self) -> u32 {
        self.chunk_size.saturating_mul(self.map_size)
    }

    /// Number of chunk layers the pool stacks vertically.
    pub fn layers(&self) -> u32 {
        match self.mode {
            MeshMode::Heightfield => 1,
            MeshMode::Voxel => self.vertical_layers,
        }
    }
}

impl Config {
    /// Validate every section that has invariants.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.terrain.validate()
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// A file that parses but fails validation is an error; the caller keeps
    /// running on `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("chunk_size: 10"));
        assert!(ron_str.contains("player_speed: 5.0"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(terrain: (chunk_size: 4))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain.chunk_size, 4);
        assert_eq!(config.terrain.map_size, TerrainConfig::default().map_size);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_octave_strategy_parses() {
        let ron_str = "(terrain: (octaves: Octaves(3), mode: Voxel))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain.octaves, OctaveStrategy::Octaves(3));
        assert_eq!(config.terrain.octaves.count(), 3);
        assert_eq!(config.terrain.mode, MeshMode::Voxel);
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let mut terrain = TerrainConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert_eq!(terrain.validate(), Err(ConfigurationError::ZeroChunkSize));

        terrain.chunk_size = 4;
        terrain.map_size = 0;
        assert_eq!(terrain.validate(), Err(ConfigurationError::ZeroMapSize));
    }

    #[test]
    fn test_non_positive_smoothness_rejected() {
        for smoothness in [0.0, -1.5] {
            let terrain = TerrainConfig {
                smoothness,
                ..Default::default()
            };
            assert_eq!(
                terrain.validate(),
                Err(ConfigurationError::NonPositiveSmoothness(smoothness))
            );
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let terrain = TerrainConfig {
            seed: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            terrain.validate(),
            Err(ConfigurationError::NonFinite { field: "seed" })
        );

        let terrain = TerrainConfig {
            smoothness: f64::INFINITY,
            ..Default::default()
        };
        assert_eq!(
            terrain.validate(),
            Err(ConfigurationError::NonFinite {
                field: "smoothness"
            })
        );
    }

    #[test]
    fn test_zero_octaves_rejected() {
        let terrain = TerrainConfig {
            octaves: OctaveStrategy::Octaves(0),
            ..Default::default()
        };
        assert_eq!(terrain.validate(), Err(ConfigurationError::ZeroOctaves));
    }

    #[test]
    fn test_extent_overflow_rejected() {
        let terrain = TerrainConfig {
            chunk_size: u32::MAX,
            map_size: 2,
            ..Default::default()
        };
        assert!(matches!(
            terrain.validate(),
            Err(ConfigurationError::ExtentOverflow { .. })
        ));
    }

    #[test]
    fn test_layers_depend_on_mode() {
        let mut terrain = TerrainConfig {
            vertical_layers: 3,
            ..Default::default()
        };
        assert_eq!(terrain.layers(), 1);
        terrain.mode = MeshMode::Voxel;
        assert_eq!(terrain.layers(), 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.chunk_size = 16;
        config.terrain.seed = 42.5;
        config.camera.player_speed = 12.0;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.ron"),
            "(terrain: (smoothness: 0.0))",
        )
        .unwrap();

        let result = Config::load_or_create(dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(
                ConfigurationError::NonPositiveSmoothness(_)
            ))
        ));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.terrain.scale = 20.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.terrain.scale), Some(20.0));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
