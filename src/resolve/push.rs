//! Push phase: covered people are shoved away from their owner.

use crate::board::{Cell, Coord, Coverage, EffectMask, GridMap, Roster};

/// Returns the cell a person at `at` is pushed to, away from `owner`.
///
/// The horizontal step is tried first and only when the columns differ; the
/// vertical step is the fallback under the same rule. The target must be an
/// in-bounds empty cell.
fn push_target(grid: &GridMap, at: Coord, owner: Coord) -> Option<Coord> {
    let dx = (at.x - owner.x).signum();
    let dy = (at.y - owner.y).signum();
    [at.offset(dx, 0), at.offset(0, dy)]
        .into_iter()
        .zip([dx, dy])
        .find(|&(to, step)| step != 0 && grid.is_free(to))
        .map(|(to, _)| to)
}

/// Pushes every person still standing on an owned cell one step away from
/// the owning player's current position.
///
/// Cells are scanned row by row. A pushed person's new cell is released in
/// the mask so it cannot be pushed a second time this turn. Returns the
/// number of people moved.
pub fn push_people(grid: &mut GridMap, mask: &mut EffectMask, roster: &Roster) -> usize {
    let mut pushed = 0;
    for idx in 0..grid.cells().len() {
        let at = grid.coord_of(idx);
        let cell = grid.get(at);
        if !cell.is_person() {
            continue;
        }
        let Coverage::Owned(owner) = mask.get(at) else {
            continue;
        };
        let Some(player) = roster.by_id(owner).filter(|p| p.alive) else {
            continue;
        };
        if let Some(to) = push_target(grid, at, player.position) {
            grid.set(to, cell);
            grid.set(at, Cell::Empty);
            mask.release(to);
            pushed += 1;
        }
    }
    pushed
}
