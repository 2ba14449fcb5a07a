//! Hexflower generators
//!
//! - `snowflake`: one hexflower grown ring by ring
//! - `meta`: overlapping snowflakes on a scaled spiral, stitched first-write-wins
//! - `chain`: snowflakes attached edge to edge without overlap

pub mod chain;
pub mod meta;
pub mod snowflake;

pub use chain::{generate_chain, DEFAULT_MAX_TRIES};
pub use meta::{
    generate_meta, generate_meta_layout, generate_meta_layout_par, generate_meta_par, meta_centers,
    meta_spacing, MetaLayout, PlacedSnowflake,
};
pub use snowflake::{generate_snowflake, grow_snowflake, inward_neighbor};
