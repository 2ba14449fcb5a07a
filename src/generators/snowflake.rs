//! Snowflake growth: one hexflower grown ring by ring from its center.
//!
//! The center gets the root biome. Every cell of ring `k` then draws its biome
//! from the transition table, using the biome of its inward reference neighbor
//! on ring `k - 1` as the previous hex. A single RNG stream is threaded through
//! the rings in traversal order, so the same seed, radius and table always
//! yield the same grid.

use rand::Rng;

use crate::axial::AxialCoord;
use crate::error::{HexflowerError, Result};
use crate::grid::HexGrid;
use crate::seeds::rng_from_seed;
use crate::tables::{Biome, BiomeTable};
use crate::traversal::{hexagon_size, ring};

/// Inward reference neighbor of `coord`: the first neighbor, in direction
/// index order, that is one step closer to `center`. `None` for the center.
pub fn inward_neighbor(center: AxialCoord, coord: AxialCoord) -> Option<AxialCoord> {
    let dist = coord.distance(center);
    if dist == 0 {
        return None;
    }
    coord
        .neighbors()
        .into_iter()
        .find(|nb| nb.distance(center) == dist - 1)
}

/// Grow a snowflake of `radius` around `center`, drawing from `rng`.
pub fn grow_snowflake<R: Rng>(
    center: AxialCoord,
    radius: i32,
    table: &BiomeTable,
    rng: &mut R,
) -> Result<HexGrid<Biome>> {
    if radius < 0 {
        return Err(HexflowerError::InvalidRadius(radius));
    }
    if radius > 0 {
        table.validate()?;
    }

    let mut grid = HexGrid::with_capacity(hexagon_size(radius));
    grid.insert(center, table.root_biome(rng)?);

    for k in 1..=radius {
        for coord in ring(center, k)? {
            let inward = inward_neighbor(center, coord).ok_or(HexflowerError::NotFound(coord))?;
            let prev = grid.get(inward)?;
            let biome = table.next(prev, rng)?;
            grid.insert(coord, biome);
        }
    }

    Ok(grid)
}

/// Single snowflake centered on the origin, seeded from `seed`.
pub fn generate_snowflake(seed: u64, radius: i32, table: &BiomeTable) -> Result<HexGrid<Biome>> {
    let mut rng = rng_from_seed(seed);
    grow_snowflake(AxialCoord::ORIGIN, radius, table, &mut rng)
}
