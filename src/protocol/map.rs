//! Text encodings of matches and grids.
//!
//! A match input is a header `<width> <height> <radius> <max_turns>` followed
//! by `width * height` grid characters in row-major order. Whitespace between
//! grid characters is ignored, so both one row per line and one flat line
//! are accepted. The rules line sent to agents is
//! `<width> <height> <radius> <players> <letter>`.

use crate::board::{GridMap, PlayerId};
use crate::engine::{GameConfig, DEFAULT_CONVERSION_THRESHOLD};

/// Errors that can occur while reading a match input or rules line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapTextError {
    #[error("missing header field '{0}'")]
    MissingField(&'static str),

    #[error("invalid value for '{field}': '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("grid needs {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },

    #[error("grid size {width}x{height} is too large")]
    TooLarge { width: usize, height: usize },
}

/// A parsed match input: rules plus layout rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInput {
    pub width: usize,
    pub height: usize,
    pub config: GameConfig,
    pub rows: Vec<String>,
}

/// The rules line an agent receives before the first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub width: usize,
    pub height: usize,
    pub effect_radius: i32,
    pub player_count: usize,
    pub me: PlayerId,
}

fn next_field<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
) -> Result<T, MapTextError> {
    let raw = tokens.next().ok_or(MapTextError::MissingField(field))?;
    raw.parse().map_err(|_| MapTextError::InvalidField {
        field,
        value: raw.to_string(),
    })
}

/// Splits `width * height` grid characters into rows.
///
/// Cell characters are not validated here; the engine does that.
fn collect_rows(cells: &[char], width: usize, height: usize) -> Result<Vec<String>, MapTextError> {
    let expected = width
        .checked_mul(height)
        .ok_or(MapTextError::TooLarge { width, height })?;
    if cells.len() != expected || width == 0 {
        return Err(MapTextError::CellCount { expected, found: cells.len() });
    }
    Ok(cells.chunks(width).map(|row| row.iter().collect()).collect())
}

/// Parses a full match input.
pub fn parse_game_input(text: &str) -> Result<GameInput, MapTextError> {
    let mut tokens = text.split_whitespace();
    let width: usize = next_field(&mut tokens, "width")?;
    let height: usize = next_field(&mut tokens, "height")?;
    let effect_radius: i32 = next_field(&mut tokens, "radius")?;
    let max_turns: u32 = next_field(&mut tokens, "max_turns")?;

    let cells: Vec<char> = tokens.flat_map(str::chars).collect();
    let rows = collect_rows(&cells, width, height)?;

    Ok(GameInput {
        width,
        height,
        config: GameConfig {
            effect_radius,
            max_turns,
            conversion_threshold: DEFAULT_CONVERSION_THRESHOLD,
        },
        rows,
    })
}

/// Renders a match input in the format `parse_game_input` reads.
pub fn encode_game_input(config: &GameConfig, rows: &[String]) -> String {
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut out = format!(
        "{} {} {} {}\n",
        width,
        rows.len(),
        config.effect_radius,
        config.max_turns
    );
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// Renders the grid on one line, row after row.
pub fn encode_grid_flat(grid: &GridMap) -> String {
    grid.cells().iter().map(|c| c.to_char()).collect()
}

/// Renders the rules line for `me`.
pub fn encode_rules(rules: &Rules) -> String {
    format!(
        "{} {} {} {} {}",
        rules.width,
        rules.height,
        rules.effect_radius,
        rules.player_count,
        rules.me.letter()
    )
}

/// Parses a rules line.
pub fn parse_rules(line: &str) -> Result<Rules, MapTextError> {
    let mut tokens = line.split_whitespace();
    let width = next_field(&mut tokens, "width")?;
    let height = next_field(&mut tokens, "height")?;
    let effect_radius = next_field(&mut tokens, "radius")?;
    let player_count = next_field(&mut tokens, "players")?;
    let letter: char = next_field(&mut tokens, "letter")?;
    let me = PlayerId::from_letter(letter).ok_or(MapTextError::InvalidField {
        field: "letter",
        value: letter.to_string(),
    })?;
    Ok(Rules { width, height, effect_radius, player_count, me })
}

/// Parses a flat grid of `width * height` characters into rows.
pub fn parse_grid_flat(text: &str, width: usize, height: usize) -> Result<Vec<String>, MapTextError> {
    let cells: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    collect_rows(&cells, width, height)
}
