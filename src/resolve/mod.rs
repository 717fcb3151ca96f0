//! Turn resolution.
//!
//! A turn runs four phases in a fixed order: effect coverage, conversion and
//! scoring, movement, and push. Each phase is a free function over the grid,
//! the effect mask and the roster so it can be exercised on its own.

pub mod conversion;
pub mod effect;
pub mod movement;
pub mod push;

pub use conversion::{convert_people, Conversion};
pub use effect::{apply_effects, effect_area};
pub use movement::{apply_moves, destination};
pub use push::push_people;
