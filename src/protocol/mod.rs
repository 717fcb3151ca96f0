//! Text protocol between the match controller and player agents.
//!
//! Covers the match input and grid encodings, the controller's addressed
//! message lines, and the parser for agent replies.

pub mod map;
pub mod messages;
pub mod parser;

pub use map::{
    encode_game_input, encode_grid_flat, encode_rules, parse_game_input, parse_grid_flat,
    parse_rules, GameInput, MapTextError, Rules,
};
pub use parser::{parse_reply, Reply};
