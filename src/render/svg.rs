//! SVG rendering of a hex grid.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::ExportError;
use crate::grid::HexGrid;
use crate::tables::Biome;

use super::{to_hex, Palette, PointyTopLayout};

/// Per-render options.
#[derive(Clone, Debug)]
pub struct SvgOptions {
    pub title: String,
    pub show_coords: bool,
    pub show_biome_label: bool,
    /// Padding around the cell centers, in hex radii
    pub padding_factor: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            show_coords: true,
            show_biome_label: true,
            padding_factor: 2.2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SvgRenderer {
    pub layout: PointyTopLayout,
    pub palette: Palette,
    pub stroke: [u8; 3],
    pub stroke_width: f64,
    pub background: String,
}

impl SvgRenderer {
    pub fn new(layout: PointyTopLayout) -> Self {
        Self {
            layout,
            palette: Palette::default(),
            stroke: [0x33, 0x33, 0x33],
            stroke_width: 2.0,
            background: "white".to_string(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn render(&self, grid: &HexGrid<Biome>, options: &SvgOptions) -> Result<String, ExportError> {
        self.layout.check_size()?;
        let (min_x, max_x, min_y, max_y) = self.layout.bbox(grid).ok_or(ExportError::EmptyGrid)?;
        let pad = self.layout.size * options.padding_factor;

        let view_min_x = min_x - pad;
        let view_min_y = min_y - pad;
        let width = (max_x - min_x) + 2.0 * pad;
        let height = (max_y - min_y) + 2.0 * pad;

        let mut parts: Vec<String> = Vec::with_capacity(grid.len() * 3 + 4);
        parts.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="{:.0} {:.0} {:.0} {:.0}">"#,
            width, height, view_min_x, view_min_y, width, height
        ));
        parts.push(format!(
            r#"<rect x="{:.0}" y="{:.0}" width="{:.0}" height="{:.0}" fill="{}"/>"#,
            view_min_x,
            view_min_y,
            width,
            height,
            escape(&self.background)
        ));
        parts.push(format!(
            r##"<text x="{:.1}" y="{:.1}" font-family="Arial" font-size="18" fill="#111">{}</text>"##,
            view_min_x + pad / 2.0,
            view_min_y + pad / 2.0,
            escape(&options.title)
        ));

        // paint top to bottom, left to right
        let mut cells: Vec<_> = grid.iter().collect();
        cells.sort_by_key(|(h, _)| (h.r, h.q));

        let stroke = to_hex(self.stroke);
        for (h, biome) in cells {
            let (cx, cy) = self.layout.axial_to_pixel(h);
            let mut points = String::new();
            for (i, (x, y)) in self.layout.hex_corners(cx, cy).iter().enumerate() {
                if i > 0 {
                    points.push(' ');
                }
                let _ = write!(points, "{:.1},{:.1}", x, y);
            }

            parts.push(format!(
                r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
                points,
                self.palette.hex_color(biome),
                stroke,
                self.stroke_width
            ));

            if options.show_coords {
                parts.push(format!(
                    r##"<text x="{:.1}" y="{:.1}" font-family="Arial" font-size="12" text-anchor="middle" fill="#111">{}</text>"##,
                    cx,
                    cy - 2.0,
                    escape(&format!("{},{}", h.q, h.r))
                ));
            }
            if options.show_biome_label {
                parts.push(format!(
                    r##"<text x="{:.1}" y="{:.1}" font-family="Arial" font-size="11" text-anchor="middle" fill="#111">{}</text>"##,
                    cx,
                    cy + 16.0,
                    escape(biome)
                ));
            }
        }

        parts.push("</svg>".to_string());
        Ok(parts.join("\n"))
    }

    pub fn write_svg(&self, grid: &HexGrid<Biome>, path: &Path, options: &SvgOptions) -> Result<(), ExportError> {
        let svg = self.render(grid, options)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, svg)?;
        Ok(())
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
