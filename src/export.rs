//! Flat record export
//!
//! The export contract is the ordered list of `{q, r, value}` records in grid
//! insertion order. JSON output is exactly that list.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axial::AxialCoord;
use crate::error::ExportError;
use crate::grid::HexGrid;
use crate::tables::Biome;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexRecord {
    pub q: i32,
    pub r: i32,
    pub value: String,
}

impl HexRecord {
    pub fn coord(&self) -> AxialCoord {
        AxialCoord::new(self.q, self.r)
    }
}

/// Records in grid insertion order.
pub fn to_records(grid: &HexGrid<Biome>) -> Vec<HexRecord> {
    grid.iter()
        .map(|(coord, value)| HexRecord {
            q: coord.q,
            r: coord.r,
            value: value.clone(),
        })
        .collect()
}

/// Rebuild a grid through `insert`, keeping record order.
pub fn from_records<I>(records: I) -> HexGrid<Biome>
where
    I: IntoIterator<Item = HexRecord>,
{
    records
        .into_iter()
        .map(|record| (record.coord(), record.value))
        .collect()
}

pub fn to_json_string(grid: &HexGrid<Biome>) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&to_records(grid))?)
}

/// Write the record list as pretty JSON, creating parent directories.
pub fn write_json(grid: &HexGrid<Biome>, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json_string(grid)?)?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<HexGrid<Biome>, ExportError> {
    let text = fs::read_to_string(path)?;
    let records: Vec<HexRecord> = serde_json::from_str(&text)?;
    Ok(from_records(records))
}
