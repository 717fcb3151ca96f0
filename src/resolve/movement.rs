//! Movement phase.

use crate::board::{Cell, Coord, GridMap, Move, Roster};

/// Returns the cell one step from `from` in the direction of `mv`.
pub const fn destination(from: Coord, mv: Move) -> Coord {
    let (dx, dy) = mv.delta();
    from.offset(dx, dy)
}

/// Moves every living player with a pending move, in id order.
///
/// A step succeeds only into an in-bounds empty cell; anything else leaves
/// the player where it is. Later players see the grid as already changed by
/// earlier ones, so following into a just-vacated cell works. Returns the
/// number of avatars that moved.
pub fn apply_moves(grid: &mut GridMap, roster: &mut Roster) -> usize {
    let mut moved = 0;
    for player in roster.iter_mut().filter(|p| p.alive) {
        let Some(mv) = player.pending_move else {
            continue;
        };
        if mv == Move::Stop {
            continue;
        }
        let to = destination(player.position, mv);
        if !grid.is_free(to) {
            continue;
        }
        grid.set(player.position, Cell::Empty);
        grid.set(to, Cell::Avatar(player.id));
        player.position = to;
        moved += 1;
    }
    moved
}
