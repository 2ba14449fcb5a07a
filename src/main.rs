use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use hexflower::config::HexflowerConfig;
use hexflower::export;
use hexflower::generators::{
    generate_chain, generate_meta_layout, generate_meta_layout_par, generate_snowflake,
};
use hexflower::grid::HexGrid;
use hexflower::logging::init_logging;
use hexflower::render::png::write_png;
use hexflower::render::svg::{SvgOptions, SvgRenderer};
use hexflower::render::{Palette, PointyTopLayout};
use hexflower::tables::{Biome, BiomeTable};

#[derive(Parser, Debug)]
#[command(name = "hexflower")]
#[command(about = "Generate deterministic hexflower maps from weighted biome tables")]
struct Args {
    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Snowflake radius in rings (default: 2)
    #[arg(short, long)]
    radius: Option<i32>,

    /// Meta radius: generate a hexflower of hexflowers
    #[arg(short, long)]
    meta_radius: Option<i32>,

    /// Number of connected, non-overlapping snowflakes (default: 1)
    #[arg(short, long)]
    count: Option<i32>,

    /// Fixed biome for every snowflake center
    #[arg(long)]
    root: Option<String>,

    /// Biome table JSON file (sandbox table if not specified)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Run configuration JSON file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the ordered cell records as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write an SVG rendering
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write a PNG rendering
    #[arg(long)]
    png: Option<PathBuf>,

    /// Hex radius in pixels for SVG/PNG output (default: 38)
    #[arg(long)]
    hex_size: Option<f64>,

    /// Hide axial coordinates in SVG output
    #[arg(long)]
    no_coords: bool,

    /// Hide biome names in SVG output
    #[arg(long)]
    no_labels: bool,

    /// SVG title (defaults to a description of the run)
    #[arg(long)]
    title: Option<String>,

    /// Grow meta-layout snowflakes in parallel
    #[arg(long)]
    parallel: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Flags override values loaded from `--config`.
    fn merge_into(&self, mut config: HexflowerConfig) -> HexflowerConfig {
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if self.meta_radius.is_some() {
            config.meta_radius = self.meta_radius;
        }
        if let Some(count) = self.count {
            config.count = count;
        }
        if self.root.is_some() {
            config.root_biome = self.root.clone();
        }
        if self.table.is_some() {
            config.table = self.table.clone();
        }
        if let Some(hex_size) = self.hex_size {
            config.hex_size = hex_size;
        }
        config
    }
}

/// Pick the generator from the config: meta layout, chain, or a single
/// snowflake. Returns the grid plus a default title.
fn generate(
    config: &HexflowerConfig,
    seed: u64,
    table: &BiomeTable,
    parallel: bool,
) -> Result<(HexGrid<Biome>, String), Box<dyn Error>> {
    if let Some(meta_radius) = config.meta_radius {
        let layout = if parallel {
            generate_meta_layout_par(seed, config.radius, Some(meta_radius), table)?
        } else {
            generate_meta_layout(seed, config.radius, Some(meta_radius), table)?
        };
        tracing::info!(
            snowflakes = layout.snowflakes.len(),
            spacing = layout.spacing,
            cells = layout.grid.len(),
            overlap = layout.overlap_cells(),
            "generated meta layout"
        );
        for placed in &layout.snowflakes {
            tracing::debug!(
                center = %placed.center,
                seed = placed.seed,
                claimed = placed.claimed,
                "snowflake"
            );
        }
        let title = format!("Hexflower of hexflowers (seed {}, R={}, M={})", seed, config.radius, meta_radius);
        return Ok((layout.grid, title));
    }

    // anything but exactly one snowflake goes through the chain builder,
    // which rejects counts below one
    if config.count != 1 {
        let grid = generate_chain(seed, config.count, config.radius, table, config.max_tries)?;
        tracing::info!(snowflakes = config.count, cells = grid.len(), "generated chain");
        let title = format!("Hexflower chain (seed {}, R={}, count={})", seed, config.radius, config.count);
        return Ok((grid, title));
    }

    let grid = generate_snowflake(seed, config.radius, table)?;
    tracing::info!(cells = grid.len(), "generated snowflake");
    Ok((grid, format!("Hexflower (seed {}, R={})", seed, config.radius)))
}

/// Generate and write every requested output. The JSON records go to `out`
/// when no output file is requested.
fn run<W: Write>(args: Args, out: &mut W) -> Result<(), Box<dyn Error>> {
    let file_config = match &args.config {
        Some(path) => HexflowerConfig::load(path)?,
        None => HexflowerConfig::default(),
    };
    let config = args.merge_into(file_config);
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| rand::random());
    tracing::info!(seed, radius = config.radius, "generating hexflower");

    let table = config.biome_table()?;
    let (grid, default_title) = generate(&config, seed, &table, args.parallel)?;

    let layout = PointyTopLayout::new(config.hex_size);
    let palette = Palette::default();
    let mut wrote_file = false;

    if let Some(path) = &args.json {
        export::write_json(&grid, path)?;
        tracing::info!(path = %path.display(), "wrote JSON");
        wrote_file = true;
    }

    if let Some(path) = &args.svg {
        let options = SvgOptions {
            title: args.title.clone().unwrap_or(default_title),
            show_coords: !args.no_coords,
            show_biome_label: !args.no_labels,
            ..SvgOptions::default()
        };
        SvgRenderer::new(layout)
            .with_palette(palette.clone())
            .write_svg(&grid, path, &options)?;
        tracing::info!(path = %path.display(), "wrote SVG");
        wrote_file = true;
    }

    if let Some(path) = &args.png {
        write_png(&grid, path, &layout, &palette)?;
        tracing::info!(path = %path.display(), "wrote PNG");
        wrote_file = true;
    }

    if !wrote_file {
        writeln!(out, "{}", export::to_json_string(&grid)?)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
