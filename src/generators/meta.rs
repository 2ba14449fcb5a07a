//! Hexflower of hexflowers: overlapping snowflakes on a scaled spiral.
//!
//! Snowflake centers sit on a spiral whose unit step is `2R - 1` cells, one
//! ring-width short of two radii, so neighbouring snowflakes share an edge
//! band instead of leaving a gap. Snowflakes are merged into the global grid
//! in spiral order with first-write-wins, so the more central snowflake owns
//! every contested cell.

use rayon::prelude::*;

use crate::axial::AxialCoord;
use crate::error::{HexflowerError, Result};
use crate::grid::HexGrid;
use crate::seeds::{rng_from_seed, snowflake_seed};
use crate::tables::{Biome, BiomeTable};
use crate::traversal::{hexagon_size, scaled_spiral, spiral};

use super::snowflake::grow_snowflake;

/// One snowflake of a meta layout, in merge order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedSnowflake {
    /// Position on the unit meta spiral
    pub meta_position: AxialCoord,
    /// Center in global cell coordinates
    pub center: AxialCoord,
    /// Seed the snowflake was grown from
    pub seed: u64,
    /// Cells the snowflake generated
    pub cells: usize,
    /// Cells it actually owns after merging
    pub claimed: usize,
}

impl PlacedSnowflake {
    /// Cells lost to snowflakes merged earlier
    pub fn overlap(&self) -> usize {
        self.cells - self.claimed
    }
}

/// Merged meta layout plus per-snowflake bookkeeping.
#[derive(Clone, Debug)]
pub struct MetaLayout {
    pub radius: i32,
    pub meta_radius: i32,
    pub spacing: i32,
    pub grid: HexGrid<Biome>,
    pub snowflakes: Vec<PlacedSnowflake>,
}

impl MetaLayout {
    /// Cell count before deduplication
    pub fn unmerged_cells(&self) -> usize {
        self.snowflakes.iter().map(|s| s.cells).sum()
    }

    /// Cells dropped because an earlier snowflake already owned them
    pub fn overlap_cells(&self) -> usize {
        self.snowflakes.iter().map(PlacedSnowflake::overlap).sum()
    }
}

/// Distance between adjacent snowflake centers, never below one cell.
pub fn meta_spacing(radius: i32) -> i32 {
    (2 * radius - 1).max(1)
}

fn check_radii(radius: i32, meta_radius: Option<i32>) -> Result<i32> {
    if radius < 0 {
        return Err(HexflowerError::InvalidRadius(radius));
    }
    let meta_radius = meta_radius.unwrap_or(0);
    if meta_radius < 0 {
        return Err(HexflowerError::InvalidMetaRadius(meta_radius));
    }
    Ok(meta_radius)
}

/// Global snowflake centers in merge order.
pub fn meta_centers(radius: i32, meta_radius: i32) -> Result<Vec<AxialCoord>> {
    let meta_radius = check_radii(radius, Some(meta_radius))?;
    Ok(scaled_spiral(AxialCoord::ORIGIN, meta_radius, meta_spacing(radius))?.collect())
}

/// Where and from which seed each snowflake grows, in merge order.
#[derive(Clone, Copy, Debug)]
struct Placement {
    meta_position: AxialCoord,
    center: AxialCoord,
    seed: u64,
}

fn placements(seed: u64, radius: i32, meta_radius: i32) -> Result<Vec<Placement>> {
    let spacing = meta_spacing(radius);
    Ok(spiral(AxialCoord::ORIGIN, meta_radius)?
        .map(|meta_position| Placement {
            meta_position,
            center: meta_position * spacing,
            seed: snowflake_seed(seed, meta_position),
        })
        .collect())
}

fn grow_at(placement: &Placement, radius: i32, table: &BiomeTable) -> Result<HexGrid<Biome>> {
    grow_snowflake(placement.center, radius, table, &mut rng_from_seed(placement.seed))
}

/// Merge grown snowflakes in placement order, first write wins.
fn stitch(radius: i32, meta_radius: i32, placements: &[Placement], grown: &[HexGrid<Biome>]) -> MetaLayout {
    let mut grid = HexGrid::with_capacity(hexagon_size(radius) * placements.len());
    let mut snowflakes = Vec::with_capacity(placements.len());
    for (placement, snowflake) in placements.iter().zip(grown) {
        let claimed = grid.merge(snowflake);
        snowflakes.push(PlacedSnowflake {
            meta_position: placement.meta_position,
            center: placement.center,
            seed: placement.seed,
            cells: snowflake.len(),
            claimed,
        });
    }

    MetaLayout {
        radius,
        meta_radius,
        spacing: meta_spacing(radius),
        grid,
        snowflakes,
    }
}

/// Full meta layout, snowflakes grown one after another.
pub fn generate_meta_layout(
    seed: u64,
    radius: i32,
    meta_radius: Option<i32>,
    table: &BiomeTable,
) -> Result<MetaLayout> {
    let meta_radius = check_radii(radius, meta_radius)?;
    let placements = placements(seed, radius, meta_radius)?;
    let grown = placements
        .iter()
        .map(|p| grow_at(p, radius, table))
        .collect::<Result<Vec<_>>>()?;
    Ok(stitch(radius, meta_radius, &placements, &grown))
}

/// Full meta layout, snowflakes grown in parallel. Each snowflake writes only
/// into its own grid and the merge still runs in spiral order, so the result
/// is identical to [`generate_meta_layout`].
pub fn generate_meta_layout_par(
    seed: u64,
    radius: i32,
    meta_radius: Option<i32>,
    table: &BiomeTable,
) -> Result<MetaLayout> {
    let meta_radius = check_radii(radius, meta_radius)?;
    let placements = placements(seed, radius, meta_radius)?;
    let grown = placements
        .par_iter()
        .map(|p| grow_at(p, radius, table))
        .collect::<Result<Vec<_>>>()?;
    Ok(stitch(radius, meta_radius, &placements, &grown))
}

/// Merged grid of `3M(M+1)+1` snowflakes. `None` meta radius means a single
/// snowflake.
pub fn generate_meta(
    seed: u64,
    radius: i32,
    meta_radius: Option<i32>,
    table: &BiomeTable,
) -> Result<HexGrid<Biome>> {
    generate_meta_layout(seed, radius, meta_radius, table).map(|layout| layout.grid)
}

pub fn generate_meta_par(
    seed: u64,
    radius: i32,
    meta_radius: Option<i32>,
    table: &BiomeTable,
) -> Result<HexGrid<Biome>> {
    generate_meta_layout_par(seed, radius, meta_radius, table).map(|layout| layout.grid)
}
