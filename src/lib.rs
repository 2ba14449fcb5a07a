//! Hexflower map generation library
//!
//! Deterministic hex-map generation on axial coordinates: single snowflakes
//! grown from weighted biome transition tables, meta layouts of overlapping
//! snowflakes, and chains of connected snowflakes. Re-exports modules for the
//! `hexflower` binary.

pub mod axial;
pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod grid;
pub mod logging;
pub mod render;
pub mod seeds;
pub mod tables;
pub mod traversal;

pub use axial::{AxialCoord, HexDirection};
pub use error::{ConfigError, ExportError, HexflowerError, Result};
pub use export::HexRecord;
pub use generators::{generate_chain, generate_meta, generate_meta_par, generate_snowflake};
pub use grid::HexGrid;
pub use tables::{Biome, BiomeTable, WeightedBiome};
