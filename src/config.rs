//! Run configuration loaded from a JSON file and merged with CLI flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::generators::DEFAULT_MAX_TRIES;
use crate::tables::BiomeTable;

/// Configuration parameters for a generation run. Every field is optional in
/// the file; missing ones take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexflowerConfig {
    /// Master seed. `None` picks a random one at startup.
    pub seed: Option<u64>,

    /// Snowflake radius (default: 2).
    pub radius: i32,

    /// Meta radius. Set to generate a hexflower of hexflowers.
    pub meta_radius: Option<i32>,

    /// Number of chained snowflakes (default: 1).
    pub count: i32,

    /// Fixed biome for every snowflake center.
    pub root_biome: Option<String>,

    /// Path to a biome table JSON file. Sandbox table when absent.
    pub table: Option<PathBuf>,

    /// Hex radius in pixels for SVG/PNG output.
    pub hex_size: f64,

    /// Placement attempts per chained snowflake.
    pub max_tries: usize,
}

impl Default for HexflowerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            radius: 2,
            meta_radius: None,
            count: 1,
            root_biome: None,
            table: None,
            hex_size: 38.0,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }
}

impl HexflowerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reject values no generator or renderer can use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hex_size.is_finite() && self.hex_size > 0.0) {
            return Err(ConfigError::InvalidHexSize(self.hex_size));
        }
        Ok(())
    }

    /// Biome table for this run: the configured file or the sandbox table,
    /// with `root_biome` applied on top.
    pub fn biome_table(&self) -> Result<BiomeTable, ConfigError> {
        let table = match &self.table {
            Some(path) => {
                let table = BiomeTable::load(path)?;
                tracing::info!(path = %path.display(), biomes = table.transitions.len(), "loaded biome table");
                table
            }
            None => BiomeTable::sandbox(),
        };
        Ok(match &self.root_biome {
            Some(root) => table.with_root(root.as_str()),
            None => table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = HexflowerConfig::default();
        assert_eq!(config.radius, 2);
        assert_eq!(config.count, 1);
        assert_eq!(config.hex_size, 38.0);
        assert_eq!(config.max_tries, 5000);
        assert!(config.seed.is_none());
        assert!(config.meta_radius.is_none());
    }

    #[test]
    fn test_validate_hex_size() {
        assert!(HexflowerConfig::default().validate().is_ok());
        for hex_size in [0.0, -12.0, f64::NAN, f64::INFINITY] {
            let config = HexflowerConfig {
                hex_size,
                ..HexflowerConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidHexSize(_))));
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 42, "meta_radius": 1}}"#).unwrap();

        let config = HexflowerConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.meta_radius, Some(1));
        assert_eq!(config.radius, 2);
        assert_eq!(config.count, 1);
    }

    #[test]
    fn test_load_errors() {
        let err = HexflowerConfig::load(Path::new("/nonexistent/hexflower.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = HexflowerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_biome_table_applies_root() {
        let config = HexflowerConfig {
            root_biome: Some("marsh".to_string()),
            ..HexflowerConfig::default()
        };
        let table = config.biome_table().unwrap();
        assert_eq!(table.root.as_deref(), Some("marsh"));
        assert!(table.transitions.contains_key("forest"));
    }

    #[test]
    fn test_biome_table_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"root": "ice", "transitions": {{"ice": [{{"biome": "ice", "weight": 1}}]}}}}"#
        )
        .unwrap();
        let config = HexflowerConfig {
            table: Some(file.path().to_path_buf()),
            ..HexflowerConfig::default()
        };
        let table = config.biome_table().unwrap();
        assert_eq!(table.root.as_deref(), Some("ice"));
        assert_eq!(table.transitions.len(), 1);
    }
}
