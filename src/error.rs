//! Error types for generation, export and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::axial::AxialCoord;

/// Errors raised by the generation core. All of them abort the generation
/// call in progress; no partial grid is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexflowerError {
    /// Direction index outside 0..=5
    #[error("invalid direction index {0} (expected 0..=5)")]
    InvalidDirection(usize),

    /// Negative ring or snowflake radius
    #[error("invalid radius {0} (must be >= 0)")]
    InvalidRadius(i32),

    /// Negative meta radius
    #[error("invalid meta radius {0} (must be >= 0)")]
    InvalidMetaRadius(i32),

    /// Chain builder asked for fewer than one snowflake
    #[error("invalid snowflake count {0} (must be >= 1)")]
    InvalidCount(i32),

    /// Biome reached during generation has no entry in the transition table
    #[error("unknown biome '{0}'")]
    UnknownBiome(String),

    /// Biome entry exists but has no candidate with positive weight
    #[error("biome '{0}' has no weighted candidates")]
    EmptyCandidates(String),

    /// Grid lookup miss for a coordinate expected to exist
    #[error("no cell at {0}")]
    NotFound(AxialCoord),

    /// Chain builder could not attach the next snowflake
    #[error("failed to place snowflake {placed} without overlap after {attempts} attempts")]
    PlacementFailed { placed: usize, attempts: usize },
}

pub type Result<T, E = HexflowerError> = std::result::Result<T, E>;

/// Errors raised while writing records or images.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Renderers need at least one cell to size the canvas
    #[error("cannot render an empty grid")]
    EmptyGrid,

    #[error("invalid hex size {0} (must be finite and > 0)")]
    InvalidHexSize(f64),

    #[error("canvas of {width}x{height} pixels is too large")]
    CanvasTooLarge { width: f64, height: f64 },
}

/// Errors raised while loading configuration or biome table files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid hex size {0} (must be finite and > 0)")]
    InvalidHexSize(f64),
}
