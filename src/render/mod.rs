//! Rendering collaborators: pointy-top pixel layout, biome palette, SVG and
//! PNG writers. Renderers only read `(coord, value)` pairs from a finished
//! grid; they never re-derive biomes.

pub mod png;
pub mod svg;

use std::collections::HashMap;

use crate::axial::AxialCoord;
use crate::error::ExportError;
use crate::grid::HexGrid;

/// Axial <-> pixel conversion for pointy-top hexes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointyTopLayout {
    /// Hex radius in pixels
    pub size: f64,
}

impl PointyTopLayout {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    /// Renderers refuse zero, negative and non-finite sizes.
    pub fn check_size(&self) -> Result<(), ExportError> {
        if self.size.is_finite() && self.size > 0.0 {
            Ok(())
        } else {
            Err(ExportError::InvalidHexSize(self.size))
        }
    }

    pub fn axial_to_pixel(&self, h: AxialCoord) -> (f64, f64) {
        let x = self.size * 3f64.sqrt() * (h.q as f64 + h.r as f64 / 2.0);
        let y = self.size * 1.5 * h.r as f64;
        (x, y)
    }

    /// Hex containing the pixel, by cube rounding.
    pub fn pixel_to_axial(&self, x: f64, y: f64) -> AxialCoord {
        let q = (3f64.sqrt() / 3.0 * x - y / 3.0) / self.size;
        let r = (2.0 / 3.0 * y) / self.size;
        axial_round(q, r)
    }

    pub fn hex_corners(&self, cx: f64, cy: f64) -> [(f64, f64); 6] {
        std::array::from_fn(|i| {
            let angle = (60.0 * i as f64 - 30.0).to_radians();
            (cx + self.size * angle.cos(), cy + self.size * angle.sin())
        })
    }

    /// `(min_x, max_x, min_y, max_y)` of cell centers, `None` for an empty grid.
    pub fn bbox<T>(&self, grid: &HexGrid<T>) -> Option<(f64, f64, f64, f64)> {
        grid.coords().map(|h| self.axial_to_pixel(h)).fold(None, |acc, (x, y)| {
            Some(match acc {
                None => (x, x, y, y),
                Some((min_x, max_x, min_y, max_y)) => {
                    (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
                }
            })
        })
    }
}

fn axial_round(q: f64, r: f64) -> AxialCoord {
    let s = -q - r;
    let (mut rq, mut rr, rs) = (q.round(), r.round(), s.round());
    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    AxialCoord::new(rq as i32, rr as i32)
}

/// Biome fill colors.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: HashMap<String, [u8; 3]>,
    pub fallback: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        let colors = [
            ("grassland", [154, 205, 50]),
            ("forest", [46, 139, 87]),
            ("hills", [194, 178, 128]),
            ("marsh", [95, 158, 160]),
            ("mountains", [169, 169, 169]),
        ]
        .into_iter()
        .map(|(name, rgb)| (name.to_string(), rgb))
        .collect();

        Self {
            colors,
            fallback: [221, 221, 221],
        }
    }
}

impl Palette {
    pub fn with_color(mut self, biome: impl Into<String>, rgb: [u8; 3]) -> Self {
        self.colors.insert(biome.into(), rgb);
        self
    }

    pub fn color(&self, biome: &str) -> [u8; 3] {
        self.colors.get(biome).copied().unwrap_or(self.fallback)
    }

    pub fn hex_color(&self, biome: &str) -> String {
        to_hex(self.color(biome))
    }
}

pub fn to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}
