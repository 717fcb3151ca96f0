//! Nearest-person heuristic.
//!
//! Walks toward the closest person by straight-line distance, fixing the
//! column first and the row second. Cheap enough to run for every agent on
//! every turn, and the default opponent for self-play.

use crate::board::{Cell, Coord, GridMap, Move, PlayerId};

/// Finds the person closest to `from`. Ties go to the first in row-major order.
pub fn nearest_person(grid: &GridMap, from: Coord) -> Option<Coord> {
    let mut best: Option<(i64, Coord)> = None;
    for (at, cell) in grid.iter() {
        if !matches!(cell, Cell::Person(_)) {
            continue;
        }
        let dx = i64::from(at.x - from.x);
        let dy = i64::from(at.y - from.y);
        let dist = dx * dx + dy * dy;
        if best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, at));
        }
    }
    best.map(|(_, at)| at)
}

/// Locates the avatar of `me` on the grid.
pub fn find_avatar(grid: &GridMap, me: PlayerId) -> Option<Coord> {
    grid.iter()
        .find(|&(_, cell)| cell == Cell::Avatar(me))
        .map(|(at, _)| at)
}

/// Returns the step from `from` toward `target`, horizontal first.
pub fn step_toward(from: Coord, target: Coord) -> Move {
    if target.x < from.x {
        Move::Left
    } else if target.x > from.x {
        Move::Right
    } else if target.y < from.y {
        Move::Up
    } else if target.y > from.y {
        Move::Down
    } else {
        Move::Stop
    }
}

/// Picks the greedy move for `me`. Stops when the avatar or every person is
/// gone from the grid.
pub fn greedy_move(grid: &GridMap, me: PlayerId) -> Move {
    let Some(from) = find_avatar(grid, me) else {
        return Move::Stop;
    };
    match nearest_person(grid, from) {
        Some(target) => step_toward(from, target),
        None => Move::Stop,
    }
}
