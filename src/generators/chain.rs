//! Connected placement: snowflakes attached one by one to a growing map so
//! that each new one touches it edge to edge without overlapping.
//!
//! The first snowflake sits at the origin. Every following snowflake is grown
//! at the origin, then translated so one of its cells (the anchor) lands on
//! an empty cell next to the map (the target). Placement is retried with new
//! random target/anchor pairs until the moved snowflake is disjoint from and
//! touching the map.

use rand::Rng;

use crate::axial::AxialCoord;
use crate::error::{HexflowerError, Result};
use crate::grid::HexGrid;
use crate::seeds::rng_from_seed;
use crate::tables::{Biome, BiomeTable};

use super::snowflake::grow_snowflake;

pub const DEFAULT_MAX_TRIES: usize = 5000;

/// Attach `snowflake` to `map`. Returns the accepted translation.
fn attach<R: Rng>(
    map: &mut HexGrid<Biome>,
    snowflake: &HexGrid<Biome>,
    max_tries: usize,
    rng: &mut R,
) -> Option<AxialCoord> {
    let frontier = map.frontier();
    let anchors: Vec<AxialCoord> = snowflake.coords().collect();
    if frontier.is_empty() || anchors.is_empty() {
        return None;
    }

    for _ in 0..max_tries {
        let target = frontier[rng.gen_range(0..frontier.len())];
        let anchor = anchors[rng.gen_range(0..anchors.len())];
        let offset = target - anchor;

        let moved = snowflake.translate(offset);
        if !map.is_disjoint(&moved) || !map.touches(&moved) {
            continue;
        }
        map.merge(&moved);
        return Some(offset);
    }
    None
}

/// Chain of `count` connected, non-overlapping snowflakes from one RNG stream.
pub fn generate_chain(
    seed: u64,
    count: i32,
    radius: i32,
    table: &BiomeTable,
    max_tries: usize,
) -> Result<HexGrid<Biome>> {
    if count < 1 {
        return Err(HexflowerError::InvalidCount(count));
    }

    let mut rng = rng_from_seed(seed);
    let mut map = grow_snowflake(AxialCoord::ORIGIN, radius, table, &mut rng)?;

    for placed in 1..count as usize {
        let snowflake = grow_snowflake(AxialCoord::ORIGIN, radius, table, &mut rng)?;
        if attach(&mut map, &snowflake, max_tries, &mut rng).is_none() {
            return Err(HexflowerError::PlacementFailed {
                placed,
                attempts: max_tries,
            });
        }
    }

    Ok(map)
}
