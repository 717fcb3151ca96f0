//! Random map generation.
//!
//! Produces layout rows with the requested number of players on distinct
//! cells and people scattered over the remaining ones, all starting at zero
//! exposure.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Cell, PlayerId, MAX_PLAYERS};

/// Parameters for a generated map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapGenConfig {
    pub width: usize,
    pub height: usize,
    pub players: usize,
    /// Chance in `[0, 1]` that a non-player cell holds a person.
    pub people_density: f64,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        MapGenConfig {
            width: 20,
            height: 20,
            players: 4,
            people_density: 0.15,
        }
    }
}

/// Errors that can occur during map generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapGenError {
    #[error("player count {0} outside 1..=26")]
    PlayerCount(usize),

    #[error("{players} players do not fit on a {width}x{height} grid")]
    TooSmall { width: usize, height: usize, players: usize },

    #[error("people density {0} outside 0..=1")]
    Density(f64),
}

/// Generates layout rows for `config`.
pub fn generate<R: Rng>(config: &MapGenConfig, rng: &mut R) -> Result<Vec<String>, MapGenError> {
    if config.players == 0 || config.players > MAX_PLAYERS {
        return Err(MapGenError::PlayerCount(config.players));
    }
    let size = config.width * config.height;
    if config.width == 0 || size < config.players {
        return Err(MapGenError::TooSmall {
            width: config.width,
            height: config.height,
            players: config.players,
        });
    }
    if !(0.0..=1.0).contains(&config.people_density) {
        return Err(MapGenError::Density(config.people_density));
    }

    let mut cells = vec![Cell::Empty; size];
    let mut order: Vec<usize> = (0..size).collect();
    order.shuffle(rng);

    let (seats, rest) = order.split_at(config.players);
    for (i, &idx) in seats.iter().enumerate() {
        if let Some(id) = PlayerId::new(i) {
            cells[idx] = Cell::Avatar(id);
        }
    }
    for &idx in rest {
        if rng.gen_bool(config.people_density) {
            cells[idx] = Cell::Person(0);
        }
    }

    Ok(cells
        .chunks(config.width)
        .map(|row| row.iter().map(|c| c.to_char()).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::parse_layout;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn generated_map_is_valid() {
        let mut rng = SmallRng::seed_from_u64(7);
        let config = MapGenConfig { width: 12, height: 8, players: 5, people_density: 0.3 };
        let rows = generate(&config, &mut rng).unwrap();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.len() == 12));
        let layout = parse_layout(&rows).unwrap();
        assert_eq!(layout.roster.len(), 5);
    }

    #[test]
    fn same_seed_same_map() {
        let config = MapGenConfig::default();
        let a = generate(&config, &mut SmallRng::seed_from_u64(3)).unwrap();
        let b = generate(&config, &mut SmallRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn density_extremes() {
        let mut rng = SmallRng::seed_from_u64(1);
        let full = MapGenConfig { width: 3, height: 3, players: 2, people_density: 1.0 };
        let rows = generate(&full, &mut rng).unwrap();
        assert_eq!(parse_layout(&rows).unwrap().people, 7);

        let empty = MapGenConfig { people_density: 0.0, ..full };
        let rows = generate(&empty, &mut rng).unwrap();
        assert_eq!(parse_layout(&rows).unwrap().people, 0);
    }

    #[test]
    fn rejects_impossible_configs() {
        let mut rng = SmallRng::seed_from_u64(1);
        let base = MapGenConfig::default();
        assert_eq!(
            generate(&MapGenConfig { players: 0, ..base }, &mut rng).unwrap_err(),
            MapGenError::PlayerCount(0)
        );
        assert_eq!(
            generate(&MapGenConfig { players: 27, ..base }, &mut rng).unwrap_err(),
            MapGenError::PlayerCount(27)
        );
        assert!(matches!(
            generate(&MapGenConfig { width: 2, height: 1, players: 3, ..base }, &mut rng),
            Err(MapGenError::TooSmall { .. })
        ));
        assert!(generate(&MapGenConfig { people_density: 1.5, ..base }, &mut rng).is_err());
    }
}
