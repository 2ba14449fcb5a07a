//! Sparse hex grid with write-once cells and insertion-ordered iteration.

use std::collections::{HashMap, HashSet};

use crate::axial::AxialCoord;
use crate::error::{HexflowerError, Result};

/// Sparse mapping from axial coordinate to a cell value.
///
/// Entries live in a `Vec` in the order they were first written, with a
/// `HashMap` index on the side. A key, once written, is never overwritten:
/// a second `insert` for the same coordinate is a silent no-op. This is the
/// stitching rule used when overlapping snowflakes are merged.
#[derive(Clone, Debug)]
pub struct HexGrid<T> {
    cells: Vec<(AxialCoord, T)>,
    index: HashMap<AxialCoord, usize>,
}

impl<T> Default for HexGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HexGrid<T> {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Write `value` at `coord` if the coordinate is still empty.
    /// Returns `true` if the value was stored.
    pub fn insert(&mut self, coord: AxialCoord, value: T) -> bool {
        if self.index.contains_key(&coord) {
            return false;
        }
        self.index.insert(coord, self.cells.len());
        self.cells.push((coord, value));
        true
    }

    pub fn get(&self, coord: AxialCoord) -> Result<&T> {
        self.index
            .get(&coord)
            .map(|&idx| &self.cells[idx].1)
            .ok_or(HexflowerError::NotFound(coord))
    }

    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.index.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate cells in insertion order. Calling again restarts from the
    /// first written cell.
    pub fn iter(&self) -> impl Iterator<Item = (AxialCoord, &T)> + '_ {
        self.cells.iter().map(|(coord, value)| (*coord, value))
    }

    /// Coordinates in insertion order.
    pub fn coords(&self) -> impl Iterator<Item = AxialCoord> + '_ {
        self.cells.iter().map(|(coord, _)| *coord)
    }

    /// True if no coordinate is shared with `other`.
    pub fn is_disjoint<U>(&self, other: &HexGrid<U>) -> bool {
        if self.len() <= other.len() {
            self.coords().all(|coord| !other.contains(coord))
        } else {
            other.coords().all(|coord| !self.contains(coord))
        }
    }

    /// True if any cell of `self` is edge-adjacent to a cell of `other`.
    pub fn touches<U>(&self, other: &HexGrid<U>) -> bool {
        self.coords()
            .any(|coord| coord.neighbors().iter().any(|&nb| other.contains(nb)))
    }

    /// Empty coordinates adjacent to the grid, each listed once, in the order
    /// they are first discovered walking cells in insertion order.
    pub fn frontier(&self) -> Vec<AxialCoord> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for coord in self.coords() {
            for nb in coord.neighbors() {
                if !self.contains(nb) && seen.insert(nb) {
                    out.push(nb);
                }
            }
        }
        out
    }
}

impl<T: Clone> HexGrid<T> {
    /// Insert every cell of `other` in its order, first write wins.
    /// Returns how many cells were claimed.
    pub fn merge(&mut self, other: &HexGrid<T>) -> usize {
        let mut claimed = 0;
        for (coord, value) in other.iter() {
            if self.insert(coord, value.clone()) {
                claimed += 1;
            }
        }
        claimed
    }

    /// Copy of the grid with every coordinate shifted by `offset`.
    pub fn translate(&self, offset: AxialCoord) -> HexGrid<T> {
        let mut out = HexGrid::with_capacity(self.len());
        for (coord, value) in self.iter() {
            out.insert(coord + offset, value.clone());
        }
        out
    }
}

impl<T> FromIterator<(AxialCoord, T)> for HexGrid<T> {
    fn from_iter<I: IntoIterator<Item = (AxialCoord, T)>>(iter: I) -> Self {
        let mut grid = HexGrid::new();
        for (coord, value) in iter {
            grid.insert(coord, value);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(q: i32, r: i32) -> AxialCoord {
        AxialCoord::new(q, r)
    }

    #[test]
    fn test_first_write_wins() {
        let mut grid = HexGrid::new();
        assert!(grid.insert(c(0, 0), "forest"));
        assert!(!grid.insert(c(0, 0), "marsh"));
        assert_eq!(grid.get(c(0, 0)), Ok(&"forest"));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let grid: HexGrid<String> = HexGrid::new();
        assert_eq!(grid.get(c(3, 1)), Err(HexflowerError::NotFound(c(3, 1))));
        assert!(!grid.contains(c(3, 1)));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut grid = HexGrid::new();
        let order = [c(5, 5), c(-1, 0), c(2, -3), c(0, 0)];
        for (i, &coord) in order.iter().enumerate() {
            grid.insert(coord, i);
        }
        // rewrite must not move the entry
        grid.insert(c(-1, 0), 99);

        let first: Vec<_> = grid.iter().map(|(coord, &v)| (coord, v)).collect();
        let second: Vec<_> = grid.iter().map(|(coord, &v)| (coord, v)).collect();
        assert_eq!(first, vec![(c(5, 5), 0), (c(-1, 0), 1), (c(2, -3), 2), (c(0, 0), 3)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_merge_counts_claimed_cells() {
        let mut a: HexGrid<&str> = [(c(0, 0), "a"), (c(1, 0), "a")].into_iter().collect();
        let b: HexGrid<&str> = [(c(1, 0), "b"), (c(2, 0), "b")].into_iter().collect();
        assert_eq!(a.merge(&b), 1);
        assert_eq!(a.get(c(1, 0)), Ok(&"a"));
        assert_eq!(a.get(c(2, 0)), Ok(&"b"));
    }

    #[test]
    fn test_translate() {
        let grid: HexGrid<u8> = [(c(0, 0), 1), (c(1, -1), 2)].into_iter().collect();
        let moved = grid.translate(c(3, 2));
        assert_eq!(moved.get(c(3, 2)), Ok(&1));
        assert_eq!(moved.get(c(4, 1)), Ok(&2));
        assert_eq!(moved.coords().collect::<Vec<_>>(), vec![c(3, 2), c(4, 1)]);
    }

    #[test]
    fn test_disjoint_and_touching() {
        let a: HexGrid<()> = [(c(0, 0), ())].into_iter().collect();
        let adjacent: HexGrid<()> = [(c(1, 0), ())].into_iter().collect();
        let far: HexGrid<()> = [(c(5, 0), ())].into_iter().collect();
        let overlapping: HexGrid<()> = [(c(0, 0), ()), (c(9, 9), ())].into_iter().collect();

        assert!(a.is_disjoint(&adjacent));
        assert!(a.touches(&adjacent));
        assert!(a.is_disjoint(&far));
        assert!(!a.touches(&far));
        assert!(!a.is_disjoint(&overlapping));
        assert!(!overlapping.is_disjoint(&a));
    }

    #[test]
    fn test_frontier_of_single_cell() {
        let a: HexGrid<()> = [(c(0, 0), ())].into_iter().collect();
        let frontier = a.frontier();
        assert_eq!(frontier, c(0, 0).neighbors().to_vec());
    }

    #[test]
    fn test_frontier_has_no_duplicates() {
        let a: HexGrid<()> = [(c(0, 0), ()), (c(1, 0), ())].into_iter().collect();
        let frontier = a.frontier();
        let unique: HashSet<_> = frontier.iter().collect();
        assert_eq!(unique.len(), frontier.len());
        assert_eq!(frontier.len(), 8);
        assert!(frontier.iter().all(|&h| !a.contains(h)));
    }
}
