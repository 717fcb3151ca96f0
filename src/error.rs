//! Engine error types.
//!
//! Construction failures (`InvalidMap`, `InvalidEffectRadius`,
//! `InvalidConversionThreshold`) abort game setup. `OutOfRange` and
//! `DuplicateMove` are per-call errors that leave the engine untouched.

use std::fmt;

use crate::board::{Coord, PlayerId};

/// Why an initial layout was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("invalid cell character '{ch}' at {at}")]
    InvalidCell { ch: char, at: Coord },

    #[error("player '{0}' appears more than once")]
    DuplicatePlayer(char),

    #[error("player '{present}' present but '{missing}' is missing")]
    NonContiguousPlayers { missing: char, present: char },

    #[error("player count {0} outside 1..=26")]
    PlayerCount(usize),
}

/// The index a caller supplied that did not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSubject {
    PlayerId(PlayerId),
    Rank(usize),
    Coord(Coord),
}

impl fmt::Display for RangeSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSubject::PlayerId(id) => write!(f, "player {id}"),
            RangeSubject::Rank(rank) => write!(f, "rank {rank}"),
            RangeSubject::Coord(c) => write!(f, "coordinate {c}"),
        }
    }
}

/// Errors returned by the simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid map: {0}")]
    InvalidMap(#[from] MapError),

    #[error("effect radius must be at least 1, got {0}")]
    InvalidEffectRadius(i32),

    #[error("conversion threshold must be within 1..=9, got {0}")]
    InvalidConversionThreshold(u8),

    #[error("{0} is out of range")]
    OutOfRange(RangeSubject),

    #[error("player {0} already submitted a move this turn")]
    DuplicateMove(PlayerId),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
