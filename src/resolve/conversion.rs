//! Conversion phase: exposure counters and scoring.

use tracing::debug;

use crate::board::{Cell, Coord, Coverage, EffectMask, GridMap, PlayerId, Roster};

/// A person converted into a point this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub at: Coord,
    pub player: PlayerId,
}

/// Advances every person's exposure counter according to `mask`.
///
/// A person owned by one player gains one exposure, or converts into a point
/// for that player once its counter already equals `threshold`. A person on
/// an uncovered or contested cell loses all progress. Returns the
/// conversions in row-major order.
pub fn convert_people(
    grid: &mut GridMap,
    mask: &EffectMask,
    roster: &mut Roster,
    threshold: u8,
) -> Vec<Conversion> {
    let mut converted = Vec::new();
    for idx in 0..grid.cells().len() {
        let at = grid.coord_of(idx);
        let Cell::Person(exposure) = grid.get(at) else {
            continue;
        };
        match mask.get(at) {
            Coverage::Owned(player) if exposure >= threshold => {
                grid.set(at, Cell::Empty);
                roster.inc_score(player);
                debug!(%player, %at, "person converted");
                converted.push(Conversion { at, player });
            }
            Coverage::Owned(_) => grid.set(at, Cell::Person(exposure + 1)),
            Coverage::Uncovered | Coverage::Contested => grid.set(at, Cell::Person(0)),
        }
    }
    converted
}
