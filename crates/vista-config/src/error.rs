//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The file parsed but describes terrain the engine cannot generate.
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigurationError),
}

/// Terrain parameters rejected before any generation attempt.
///
/// Returned by [`TerrainConfig::validate`](crate::TerrainConfig::validate).
/// A rejected snapshot never touches existing chunk state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// `chunk_size` must be at least 1.
    #[error("chunk_size must be at least 1")]
    ZeroChunkSize,

    /// `map_size` must be at least 1.
    #[error("map_size must be at least 1")]
    ZeroMapSize,

    /// `vertical_layers` must be at least 1.
    #[error("vertical_layers must be at least 1")]
    ZeroVerticalLayers,

    /// `smoothness` divides every noise coordinate.
    #[error("smoothness must be positive, got {0}")]
    NonPositiveSmoothness(f64),

    /// A float parameter is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },

    /// An explicit octave strategy needs at least one octave.
    #[error("octave count must be at least 1")]
    ZeroOctaves,

    /// `chunk_size * map_size` does not fit in a `u32`.
    #[error("chunk_size {chunk_size} x map_size {map_size} overflows the world extent")]
    ExtentOverflow {
        /// Requested chunk edge length.
        chunk_size: u32,
        /// Requested chunks per axis.
        map_size: u32,
    },
}
