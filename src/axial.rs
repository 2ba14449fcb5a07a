//! Axial hex coordinates (pointy-top orientation).
//!
//! `q` grows to the east, `r` grows to the south-east. Pixel `y` grows
//! downwards, so increasing `r` moves a cell down the screen.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{HexflowerError, Result};
use HexDirection::*;

/// Axial hex coordinate. Plain value type, compared and hashed by `(q, r)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const ORIGIN: AxialCoord = AxialCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Implicit third cube coordinate
    pub fn s(self) -> i32 {
        -self.q - self.r
    }

    pub fn neighbor(self, dir: HexDirection) -> Self {
        self + dir.offset()
    }

    /// All six neighbors, in direction index order.
    pub fn neighbors(self) -> [AxialCoord; 6] {
        HexDirection::ALL.map(|dir| self.neighbor(dir))
    }

    /// Step `steps` cells along `dir`.
    pub fn translate(self, dir: HexDirection, steps: i32) -> Self {
        self + dir.offset() * steps
    }

    /// Hex distance: `(|dq| + |dr| + |dq + dr|) / 2`.
    pub fn distance(self, other: Self) -> i32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }

    /// Distance from the origin.
    pub fn length(self) -> i32 {
        self.distance(Self::ORIGIN)
    }

    /// Rotate this vector about the origin by `steps` direction steps, in the
    /// same sense as direction indices increase (E -> NE -> NW ...).
    pub fn rotate(self, steps: i32) -> Self {
        let mut out = self;
        for _ in 0..steps.rem_euclid(6) {
            out = Self::new(out.q + out.r, -out.q);
        }
        out
    }
}

impl Add for AxialCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl AddAssign for AxialCoord {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for AxialCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Mul<i32> for AxialCoord {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(self.q * rhs, self.r * rhs)
    }
}

impl Neg for AxialCoord {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.q, -self.r)
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

// index order is part of the traversal contract, do not reorder
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexDirection {
    East = 0,
    NorthEast = 1,
    NorthWest = 2,
    West = 3,
    SouthWest = 4,
    SouthEast = 5,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [East, NorthEast, NorthWest, West, SouthWest, SouthEast];

    const OFFSETS: [AxialCoord; 6] = [
        AxialCoord::new(1, 0),
        AxialCoord::new(1, -1),
        AxialCoord::new(0, -1),
        AxialCoord::new(-1, 0),
        AxialCoord::new(-1, 1),
        AxialCoord::new(0, 1),
    ];

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(HexflowerError::InvalidDirection(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn offset(self) -> AxialCoord {
        Self::OFFSETS[self.index()]
    }

    /// Rotate by `steps` (negative allowed), wrapping modulo 6.
    pub fn rotate(self, steps: i32) -> Self {
        Self::ALL[(self.index() as i32 + steps).rem_euclid(6) as usize]
    }

    pub fn opposite(self) -> Self {
        self.rotate(3)
    }

    pub fn name(self) -> &'static str {
        match self {
            East => "E",
            NorthEast => "NE",
            NorthWest => "NW",
            West => "W",
            SouthWest => "SW",
            SouthEast => "SE",
        }
    }
}

/// Unit offset vector for a direction index.
pub fn direction(index: usize) -> Result<AxialCoord> {
    Ok(HexDirection::from_index(index)?.offset())
}

/// Rotated direction index, modulo 6.
pub fn rotate_direction(index: usize, steps: i32) -> Result<usize> {
    Ok(HexDirection::from_index(index)?.rotate(steps).index())
}

pub fn distance(a: AxialCoord, b: AxialCoord) -> i32 {
    a.distance(b)
}
