//! Effect phase: which living player covers each cell.

use crate::board::{Coord, EffectMask, GridMap, Roster};

/// Returns every in-bounds cell within Manhattan distance `radius` of
/// `center`, row by row.
///
/// The area is a diamond: row offset `dy` spans columns
/// `±(radius - |dy|)`. Both offsets are clipped to the grid before any cell
/// is produced, so the cost is bounded by the grid size.
pub fn effect_area(grid: &GridMap, center: Coord, radius: i32) -> impl Iterator<Item = Coord> {
    let (width, height) = (grid.width(), grid.height());
    let dy_min = (-radius).max(-center.y);
    let dy_max = radius.min(height - 1 - center.y);
    (dy_min..=dy_max).flat_map(move |dy| {
        let span = radius - dy.abs();
        let dx_min = (-span).max(-center.x);
        let dx_max = span.min(width - 1 - center.x);
        (dx_min..=dx_max).map(move |dx| Coord::new(center.x + dx, center.y + dy))
    })
}

/// Clears `mask` and records the coverage of every living player.
///
/// Players claim cells in id order; the first claim owns a cell and any
/// later one marks it contested.
pub fn apply_effects(grid: &GridMap, roster: &Roster, radius: i32, mask: &mut EffectMask) {
    mask.clear();
    for player in roster.iter().filter(|p| p.alive) {
        for coord in effect_area(grid, player.position, radius) {
            mask.claim(coord, player.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{parse_layout, Coverage, PlayerId};

    #[test]
    fn diamond_shape_in_open_field() {
        let grid = GridMap::new(5, 5);
        let cells: Vec<Coord> = effect_area(&grid, Coord::new(2, 2), 2).collect();
        assert_eq!(cells.len(), 13);
        assert!(cells.iter().all(|c| c.manhattan(Coord::new(2, 2)) <= 2));
        assert!(!cells.contains(&Coord::new(0, 0)));
        assert!(cells.contains(&Coord::new(2, 0)));
    }

    #[test]
    fn diamond_clipped_at_edges() {
        let grid = GridMap::new(3, 1);
        let cells: Vec<Coord> = effect_area(&grid, Coord::new(0, 0), 1).collect();
        assert_eq!(cells, vec![Coord::new(0, 0), Coord::new(1, 0)]);
    }

    #[test]
    fn huge_radius_covers_small_grid_once() {
        let grid = GridMap::new(2, 1);
        let cells: Vec<Coord> = effect_area(&grid, Coord::new(0, 0), i32::MAX).collect();
        assert_eq!(cells, vec![Coord::new(0, 0), Coord::new(1, 0)]);

        let grid = GridMap::new(3, 3);
        let cells: Vec<Coord> = effect_area(&grid, Coord::new(1, 1), 1_000_000).collect();
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn overlap_is_contested_and_dead_players_cover_nothing() {
        let mut layout = parse_layout(&["A.B.."]).unwrap();
        let mut mask = EffectMask::for_grid(&layout.grid);
        let a = PlayerId::new(0).unwrap();
        let b = PlayerId::new(1).unwrap();

        apply_effects(&layout.grid, &layout.roster, 1, &mut mask);
        assert_eq!(mask.get(Coord::new(0, 0)), Coverage::Owned(a));
        assert_eq!(mask.get(Coord::new(1, 0)), Coverage::Contested);
        assert_eq!(mask.get(Coord::new(2, 0)), Coverage::Owned(b));
        assert_eq!(mask.get(Coord::new(4, 0)), Coverage::Uncovered);

        layout.roster.kill(a);
        apply_effects(&layout.grid, &layout.roster, 1, &mut mask);
        assert_eq!(mask.get(Coord::new(0, 0)), Coverage::Uncovered);
        assert_eq!(mask.get(Coord::new(1, 0)), Coverage::Owned(b));
    }
}
