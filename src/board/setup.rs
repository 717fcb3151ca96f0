//! Initial layout validation.
//!
//! Turns rows of wire characters into a grid and a roster, rejecting layouts
//! with foreign characters, repeated letters, or a player alphabet with gaps.

use super::cell::{Cell, PlayerId, MAX_PLAYERS};
use super::grid::{Coord, GridMap};
use super::roster::Roster;
use crate::error::MapError;

/// A validated starting position.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: GridMap,
    pub roster: Roster,
    /// Number of person cells on the initial grid.
    pub people: usize,
}

/// Validates `rows` and builds the starting grid and roster.
pub fn parse_layout<S: AsRef<str>>(rows: &[S]) -> Result<Layout, MapError> {
    let width = match rows.first() {
        Some(first) => first.as_ref().chars().count(),
        None => return Err(MapError::Empty),
    };
    if width == 0 {
        return Err(MapError::Empty);
    }
    for (row, line) in rows.iter().enumerate() {
        let found = line.as_ref().chars().count();
        if found != width {
            return Err(MapError::Ragged { row, expected: width, found });
        }
    }

    let mut grid = GridMap::new(width, rows.len());
    let mut seats: [Option<Coord>; MAX_PLAYERS] = [None; MAX_PLAYERS];
    let mut people = 0;

    for (y, line) in rows.iter().enumerate() {
        for (x, ch) in line.as_ref().chars().enumerate() {
            let at = Coord::new(x as i32, y as i32);
            let cell = Cell::from_char(ch).ok_or(MapError::InvalidCell { ch, at })?;
            match cell {
                Cell::Avatar(id) => {
                    let seat = &mut seats[id.index()];
                    if seat.is_some() {
                        return Err(MapError::DuplicatePlayer(ch));
                    }
                    *seat = Some(at);
                }
                Cell::Person(_) => people += 1,
                Cell::Empty => {}
            }
            grid.set(at, cell);
        }
    }

    let count = seats.iter().take_while(|s| s.is_some()).count();
    if let Some(late) = seats[count..].iter().position(Option::is_some) {
        let missing = PlayerId::new(count).map_or('?', PlayerId::letter);
        let present = PlayerId::new(count + late).map_or('?', PlayerId::letter);
        return Err(MapError::NonContiguousPlayers { missing, present });
    }
    if count == 0 || count > MAX_PLAYERS {
        return Err(MapError::PlayerCount(count));
    }

    let positions: Vec<Coord> = seats.iter().flatten().copied().collect();
    Ok(Layout {
        grid,
        roster: Roster::new(&positions),
        people,
    })
}
