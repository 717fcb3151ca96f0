//! Screamfield engine library.
//!
//! Exposes the grid and roster representation, the turn phases, the
//! simulation engine, and the text protocol, controller and self-play layers
//! built on top of it.

pub mod board;
pub mod controller;
pub mod engine;
pub mod error;
pub mod mapgen;
pub mod protocol;
pub mod resolve;
pub mod search;
pub mod selfplay;

pub use board::{Cell, Coord, GridMap, Move, Player, PlayerId};
pub use engine::{GameConfig, GameOver, SimulationEngine};
pub use error::{EngineError, EngineResult, MapError, RangeSubject};
