//! Per-turn effect coverage.
//!
//! The mask records, for every grid cell, which living player's scream reached
//! it this turn. Its contents are only meaningful between the effect phase and
//! the end of the same turn; the engine clears it before every turn.

use super::cell::PlayerId;
use super::grid::{Coord, GridMap};

/// Coverage state of one cell for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coverage {
    #[default]
    Uncovered,
    Owned(PlayerId),
    /// Reached by two or more players. Never reverts to `Owned`.
    Contested,
}

/// Scratch buffer of coverage, sized to a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectMask {
    width: i32,
    height: i32,
    entries: Vec<Coverage>,
}

impl EffectMask {
    /// Creates an all-uncovered mask matching the grid's dimensions.
    pub fn for_grid(grid: &GridMap) -> Self {
        let len = grid.cells().len();
        EffectMask {
            width: grid.width(),
            height: grid.height(),
            entries: vec![Coverage::Uncovered; len],
        }
    }

    pub fn clear(&mut self) {
        self.entries.fill(Coverage::Uncovered);
    }

    fn index_of(&self, coord: Coord) -> usize {
        assert!(
            coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height,
            "mask access at {coord} outside {}x{} grid",
            self.width,
            self.height
        );
        coord.y as usize * self.width as usize + coord.x as usize
    }

    pub fn get(&self, coord: Coord) -> Coverage {
        self.entries[self.index_of(coord)]
    }

    /// Records `id` reaching `coord`: the first claim owns the cell, any
    /// later claim contests it.
    pub fn claim(&mut self, coord: Coord, id: PlayerId) {
        let idx = self.index_of(coord);
        let entry = &mut self.entries[idx];
        *entry = match *entry {
            Coverage::Uncovered => Coverage::Owned(id),
            Coverage::Owned(_) | Coverage::Contested => Coverage::Contested,
        };
    }

    /// Resets one cell to uncovered.
    pub fn release(&mut self, coord: Coord) {
        let idx = self.index_of(coord);
        self.entries[idx] = Coverage::Uncovered;
    }

    /// True if no cell is covered.
    pub fn is_clear(&self) -> bool {
        self.entries.iter().all(|c| *c == Coverage::Uncovered)
    }
}
