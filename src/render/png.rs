//! Raster rendering of a hex grid with the `image` crate.

use std::fs;
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::axial::AxialCoord;
use crate::error::ExportError;
use crate::grid::HexGrid;
use crate::tables::Biome;

use super::{Palette, PointyTopLayout};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const OUTLINE: Rgb<u8> = Rgb([0x33, 0x33, 0x33]);

/// Largest canvas `render_png` will allocate.
pub const MAX_CANVAS_PIXELS: f64 = (1u64 << 28) as f64;

/// Rasterize the grid: every pixel takes the color of the hex it falls in,
/// pixels on a hex boundary are outlined, pixels outside the grid stay white.
pub fn render_png(
    grid: &HexGrid<Biome>,
    layout: &PointyTopLayout,
    palette: &Palette,
) -> Result<RgbImage, ExportError> {
    layout.check_size()?;
    let (min_x, max_x, min_y, max_y) = layout.bbox(grid).ok_or(ExportError::EmptyGrid)?;
    let pad = layout.size * 1.5;
    let origin_x = min_x - pad;
    let origin_y = min_y - pad;
    let width = ((max_x - min_x) + 2.0 * pad).ceil().max(1.0);
    let height = ((max_y - min_y) + 2.0 * pad).ceil().max(1.0);
    if width * height > MAX_CANVAS_PIXELS {
        return Err(ExportError::CanvasTooLarge { width, height });
    }
    let (width, height) = (width as u32, height as u32);

    let hex_at = |px: u32, py: u32| -> AxialCoord {
        layout.pixel_to_axial(origin_x + px as f64 + 0.5, origin_y + py as f64 + 0.5)
    };

    let mut img: RgbImage = ImageBuffer::new(width, height);
    for py in 0..height {
        for px in 0..width {
            let h = hex_at(px, py);
            let Ok(biome) = grid.get(h) else {
                img.put_pixel(px, py, BACKGROUND);
                continue;
            };

            let edge = (px + 1 < width && hex_at(px + 1, py) != h)
                || (py + 1 < height && hex_at(px, py + 1) != h);
            let color = if edge { OUTLINE } else { Rgb(palette.color(biome)) };
            img.put_pixel(px, py, color);
        }
    }

    Ok(img)
}

pub fn write_png(
    grid: &HexGrid<Biome>,
    path: &Path,
    layout: &PointyTopLayout,
    palette: &Palette,
) -> Result<(), ExportError> {
    let img = render_png(grid, layout, palette)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    img.save(path)?;
    Ok(())
}
