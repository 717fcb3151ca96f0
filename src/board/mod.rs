//! Grid and player representation.
//!
//! Contains the core data structures for cells, the grid buffer, the player
//! roster with its ranking, the per-turn effect mask, and layout validation.

pub mod cell;
pub mod grid;
pub mod mask;
pub mod moves;
pub mod roster;
pub mod setup;

pub use cell::{Cell, PlayerId, MAX_EXPOSURE, MAX_PLAYERS};
pub use grid::{Coord, GridMap};
pub use mask::{Coverage, EffectMask};
pub use moves::{Move, ALL_MOVES};
pub use roster::{Player, Roster};
pub use setup::{parse_layout, Layout};
