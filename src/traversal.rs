//! Ring and spiral traversal in axial coordinates.
//!
//! Visitation order is a contract: it decides which cell is grown first inside
//! a snowflake and which snowflake owns a contested cell in a meta layout.
//! A ring of radius `n > 0` starts at `center + SW * n` and walks the six sides
//! in direction index order (E, NE, NW, W, SW, SE), `n` steps per side,
//! emitting each cell before stepping off it.
//!
//! With `r` growing down the screen (see [`crate::axial`]) the walk from the
//! south-west corner heading east turns counterclockwise on screen; it is
//! clockwise only in a y-up frame. The index order, not the screen sense, is
//! what generation depends on.

use crate::axial::{AxialCoord, HexDirection};
use crate::error::{HexflowerError, Result};

/// Lazy sequence of the cells at an exact distance from a center.
#[derive(Clone, Debug)]
pub struct Ring {
    current: AxialCoord,
    radius: i32,
    side: usize,
    step: i32,
    remaining: usize,
}

impl Ring {
    fn new(center: AxialCoord, radius: i32) -> Self {
        let remaining = if radius == 0 { 1 } else { 6 * radius as usize };
        Self {
            current: center.translate(HexDirection::SouthWest, radius),
            radius,
            side: 0,
            step: 0,
            remaining,
        }
    }
}

impl Iterator for Ring {
    type Item = AxialCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let out = self.current;
        if self.radius > 0 {
            self.current = self.current.neighbor(HexDirection::ALL[self.side]);
            self.step += 1;
            if self.step == self.radius {
                self.step = 0;
                self.side += 1;
            }
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Ring {}

/// All cells at hex distance exactly `radius` from `center`.
pub fn ring(center: AxialCoord, radius: i32) -> Result<Ring> {
    if radius < 0 {
        return Err(HexflowerError::InvalidRadius(radius));
    }
    Ok(Ring::new(center, radius))
}

/// Rings `0..=max_radius` concatenated, center first.
#[derive(Clone, Debug)]
pub struct Spiral {
    center: AxialCoord,
    max_radius: i32,
    spacing: i32,
    ring: Ring,
    remaining: usize,
}

impl Iterator for Spiral {
    type Item = AxialCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let unit = match self.ring.next() {
            Some(h) => h,
            None => {
                // previous ring exhausted, remaining > 0 guarantees another
                let next_radius = self.ring.radius + 1;
                debug_assert!(next_radius <= self.max_radius);
                self.ring = Ring::new(AxialCoord::ORIGIN, next_radius);
                self.ring.next()?
            }
        };
        self.remaining -= 1;
        Some(self.center + unit * self.spacing)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Spiral {}

/// Number of cells in a filled hexagon of the given radius: `3n(n+1) + 1`.
pub fn hexagon_size(radius: i32) -> usize {
    let n = radius.max(0) as usize;
    3 * n * (n + 1) + 1
}

pub fn spiral(center: AxialCoord, max_radius: i32) -> Result<Spiral> {
    scaled_spiral(center, max_radius, 1)
}

/// Spiral at a larger scale: every offset from `center` is multiplied by
/// `spacing`, so ring `k` lands `k * spacing` cells out along the primary
/// directions.
pub fn scaled_spiral(center: AxialCoord, max_radius: i32, spacing: i32) -> Result<Spiral> {
    if max_radius < 0 {
        return Err(HexflowerError::InvalidRadius(max_radius));
    }
    Ok(Spiral {
        center,
        max_radius,
        spacing,
        ring: Ring::new(AxialCoord::ORIGIN, 0),
        remaining: hexagon_size(max_radius),
    })
}
