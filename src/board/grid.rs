//! Fixed-size cell grid.
//!
//! The grid owns a single row-major buffer of cells. Cloning deep-copies the
//! buffer, so two engines never alias each other's cells.

use std::fmt;

use super::cell::Cell;

/// A grid coordinate. Signed so that off-grid neighbours are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Manhattan distance to `other`.
    pub const fn manhattan(self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The game grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: i32,
    height: i32,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl GridMap {
    /// Creates a grid of the given size filled with empty cells.
    ///
    /// Panics if either dimension is zero or does not fit an `i32`.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let w = i32::try_from(width).unwrap_or_else(|_| panic!("grid width {width} too large"));
        let h = i32::try_from(height).unwrap_or_else(|_| panic!("grid height {height} too large"));
        GridMap {
            width: w,
            height: h,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Returns the raw cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check if a coordinate lies inside the grid.
    pub const fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Moves a coordinate onto the nearest grid cell.
    pub fn clamp_to_bounds(&self, coord: Coord) -> Coord {
        Coord::new(coord.x.clamp(0, self.width - 1), coord.y.clamp(0, self.height - 1))
    }

    /// Converts a coordinate to a buffer index.
    ///
    /// Panics on an out-of-bounds coordinate: callers are expected to check
    /// `is_in_bounds` first, so reaching this is an engine defect.
    pub fn index_of(&self, coord: Coord) -> usize {
        assert!(
            self.is_in_bounds(coord),
            "grid access at {coord} outside {}x{} grid",
            self.width,
            self.height
        );
        coord.y as usize * self.width as usize + coord.x as usize
    }

    /// Converts a buffer index back to its coordinate.
    pub fn coord_of(&self, index: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((index % w) as i32, (index / w) as i32)
    }

    /// Returns the cell at `coord`. Panics when out of bounds.
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[self.index_of(coord)]
    }

    /// Returns the cell at `coord`, or None when out of bounds.
    pub fn try_get(&self, coord: Coord) -> Option<Cell> {
        if self.is_in_bounds(coord) {
            Some(self.get(coord))
        } else {
            None
        }
    }

    /// Overwrites the cell at `coord`. Panics when out of bounds.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let idx = self.index_of(coord);
        self.cells[idx] = cell;
    }

    /// True if `coord` is inside the grid and holds nothing.
    pub fn is_free(&self, coord: Coord) -> bool {
        matches!(self.try_get(coord), Some(Cell::Empty))
    }

    /// Iterates over every coordinate paired with its cell, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (self.coord_of(i), cell))
    }

    /// Counts the people currently on the grid.
    pub fn people_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_person()).count()
    }

    /// Returns one string per grid row in wire characters.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
