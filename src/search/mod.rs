//! Move selection for agents.
//!
//! Strategies only read the grid and return a move; they never touch the
//! engine directly.

pub mod greedy;

pub use greedy::{find_avatar, greedy_move, nearest_person, step_toward};
