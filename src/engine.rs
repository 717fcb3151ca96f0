//! Simulation engine.
//!
//! Owns the grid, the roster and the effect mask of one match, accepts moves
//! between turns, and runs whole turns through the resolve phases. A turn
//! either runs completely or, once the game is over, not at all.

use serde::Serialize;
use tracing::{debug, trace};

use crate::board::{parse_layout, Cell, Coord, EffectMask, GridMap, Move, Player, PlayerId, Roster, MAX_EXPOSURE};
use crate::error::{EngineError, EngineResult, RangeSubject};
use crate::resolve::{apply_effects, apply_moves, convert_people, push_people};

/// Default exposure count at which a singly-covered person converts.
pub const DEFAULT_CONVERSION_THRESHOLD: u8 = MAX_EXPOSURE;

/// Tunable rules of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    /// Manhattan radius of every player's scream.
    pub effect_radius: i32,
    /// Last turn number that is still played.
    pub max_turns: u32,
    /// Exposure a person must already carry to convert on its next owned turn.
    pub conversion_threshold: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            effect_radius: 2,
            max_turns: 100,
            conversion_threshold: DEFAULT_CONVERSION_THRESHOLD,
        }
    }
}

impl GameConfig {
    /// Checks the parameters that do not depend on the map.
    pub fn validate(&self) -> EngineResult<()> {
        if self.effect_radius < 1 {
            return Err(EngineError::InvalidEffectRadius(self.effect_radius));
        }
        if !(1..=MAX_EXPOSURE).contains(&self.conversion_threshold) {
            return Err(EngineError::InvalidConversionThreshold(self.conversion_threshold));
        }
        Ok(())
    }
}

/// Why a game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum GameOver {
    /// Every allowed turn has been played.
    TurnLimit,
    /// One player holds more than half of the starting people.
    Majority { leader: PlayerId },
    /// Nobody is left alive.
    NoSurvivors,
}

/// The state of one match.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    grid: GridMap,
    mask: EffectMask,
    roster: Roster,
    config: GameConfig,
    total_people: usize,
    current_turn: u32,
}

impl SimulationEngine {
    /// Creates an engine from layout rows with the default conversion threshold.
    pub fn new<S: AsRef<str>>(rows: &[S], effect_radius: i32, max_turns: u32) -> EngineResult<Self> {
        Self::with_config(
            rows,
            GameConfig {
                effect_radius,
                max_turns,
                conversion_threshold: DEFAULT_CONVERSION_THRESHOLD,
            },
        )
    }

    /// Creates an engine from layout rows and a full configuration.
    pub fn with_config<S: AsRef<str>>(rows: &[S], config: GameConfig) -> EngineResult<Self> {
        let layout = parse_layout(rows)?;
        config.validate()?;
        Ok(SimulationEngine {
            mask: EffectMask::for_grid(&layout.grid),
            grid: layout.grid,
            roster: layout.roster,
            config,
            total_people: layout.people,
            current_turn: 1,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    pub fn alive_count(&self) -> usize {
        self.roster.alive_count()
    }

    /// Number of the next turn to be played (the first turn is 1).
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// People on the initial map.
    pub fn total_people(&self) -> usize {
        self.total_people
    }

    /// People still on the grid.
    pub fn people_remaining(&self) -> usize {
        self.grid.people_count()
    }

    /// Read-only view of the grid for serialization.
    pub fn grid_snapshot(&self) -> &GridMap {
        &self.grid
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player_by_id(&self, id: PlayerId) -> EngineResult<&Player> {
        self.roster
            .by_id(id)
            .ok_or(EngineError::OutOfRange(RangeSubject::PlayerId(id)))
    }

    pub fn player_by_rank(&self, rank: usize) -> EngineResult<&Player> {
        self.roster
            .by_rank(rank)
            .ok_or(EngineError::OutOfRange(RangeSubject::Rank(rank)))
    }

    pub fn cell_at(&self, coord: Coord) -> EngineResult<Cell> {
        self.grid
            .try_get(coord)
            .ok_or(EngineError::OutOfRange(RangeSubject::Coord(coord)))
    }

    /// Records `mv` as the player's move for the current turn.
    ///
    /// Dead players are accepted here; the movement phase skips them.
    pub fn submit_move(&mut self, id: PlayerId, mv: Move) -> EngineResult<()> {
        let player = self
            .roster
            .by_id_mut(id)
            .ok_or(EngineError::OutOfRange(RangeSubject::PlayerId(id)))?;
        if player.pending_move.is_some() {
            return Err(EngineError::DuplicateMove(id));
        }
        player.pending_move = Some(mv);
        Ok(())
    }

    /// Marks a player dead. Killing a dead player is a no-op.
    ///
    /// The avatar stays on the grid as an obstacle.
    pub fn kill(&mut self, id: PlayerId) -> EngineResult<()> {
        if self.roster.by_id(id).is_none() {
            return Err(EngineError::OutOfRange(RangeSubject::PlayerId(id)));
        }
        if self.roster.kill(id) {
            debug!(player = %id, turn = self.current_turn, "player killed");
        }
        Ok(())
    }

    /// Returns why the game is over, or None while turns can still be played.
    pub fn status(&self) -> Option<GameOver> {
        if self.current_turn > self.config.max_turns {
            return Some(GameOver::TurnLimit);
        }
        if self.roster.top_score() as usize > self.total_people / 2 {
            let leader = self.roster.by_rank(0).map(|p| p.id)?;
            return Some(GameOver::Majority { leader });
        }
        if self.roster.alive_count() == 0 {
            return Some(GameOver::NoSurvivors);
        }
        None
    }

    pub fn is_over(&self) -> bool {
        self.status().is_some()
    }

    /// Plays one turn. Returns false, without touching any state, when the
    /// game is already over.
    pub fn advance(&mut self) -> bool {
        if let Some(over) = self.status() {
            debug!(?over, turn = self.current_turn, "game over");
            return false;
        }

        apply_effects(&self.grid, &self.roster, self.config.effect_radius, &mut self.mask);
        let converted = convert_people(
            &mut self.grid,
            &self.mask,
            &mut self.roster,
            self.config.conversion_threshold,
        );
        let moved = apply_moves(&mut self.grid, &mut self.roster);
        let pushed = push_people(&mut self.grid, &mut self.mask, &self.roster);
        debug_assert!(self.roster.ranking_is_consistent());

        trace!(
            turn = self.current_turn,
            converted = converted.len(),
            moved,
            pushed,
            "turn executed"
        );

        self.roster.clear_moves();
        self.current_turn += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> PlayerId {
        PlayerId::new(i).unwrap()
    }

    #[test]
    fn construction_reports_counts() {
        let engine = SimulationEngine::new(&["A.1", "2B."], 1, 10).unwrap();
        assert_eq!(engine.player_count(), 2);
        assert_eq!(engine.alive_count(), 2);
        assert_eq!(engine.total_people(), 2);
        assert_eq!(engine.current_turn(), 1);
        assert_eq!(engine.status(), None);
    }

    #[test]
    fn radius_is_checked_after_map() {
        assert_eq!(
            SimulationEngine::new(&["A.."], 0, 10).unwrap_err(),
            EngineError::InvalidEffectRadius(0)
        );
        assert!(matches!(
            SimulationEngine::new(&["A.C"], 0, 10).unwrap_err(),
            EngineError::InvalidMap(_)
        ));
    }

    #[test]
    fn conversion_threshold_is_validated() {
        let config = GameConfig { conversion_threshold: 0, ..GameConfig::default() };
        assert_eq!(
            SimulationEngine::with_config(&["A"], config).unwrap_err(),
            EngineError::InvalidConversionThreshold(0)
        );
        let config = GameConfig { conversion_threshold: 10, ..GameConfig::default() };
        assert!(SimulationEngine::with_config(&["A"], config).is_err());
    }

    #[test]
    fn lookups_out_of_range() {
        let engine = SimulationEngine::new(&["AB"], 1, 10).unwrap();
        assert_eq!(engine.player_by_id(id(1)).unwrap().id, id(1));
        assert_eq!(
            engine.player_by_id(id(2)).unwrap_err(),
            EngineError::OutOfRange(RangeSubject::PlayerId(id(2)))
        );
        assert_eq!(
            engine.player_by_rank(2).unwrap_err(),
            EngineError::OutOfRange(RangeSubject::Rank(2))
        );
        assert_eq!(engine.cell_at(Coord::new(1, 0)).unwrap(), Cell::Avatar(id(1)));
        assert!(engine.cell_at(Coord::new(-1, 0)).is_err());
    }

    #[test]
    fn duplicate_move_rejected_until_next_turn() {
        let mut engine = SimulationEngine::new(&["A.."], 1, 10).unwrap();
        engine.submit_move(id(0), Move::Stop).unwrap();
        assert_eq!(
            engine.submit_move(id(0), Move::Right).unwrap_err(),
            EngineError::DuplicateMove(id(0))
        );
        assert!(engine.advance());
        // The rejected move was not recorded: A stopped.
        assert_eq!(engine.grid_snapshot().to_string(), "A..\n");
        engine.submit_move(id(0), Move::Right).unwrap();
        assert!(engine.advance());
        assert_eq!(engine.grid_snapshot().to_string(), ".A.\n");
    }

    #[test]
    fn move_then_exposure() {
        let mut engine = SimulationEngine::new(&["A.1"], 1, 10).unwrap();
        engine.submit_move(id(0), Move::Right).unwrap();
        assert!(engine.advance());
        assert_eq!(engine.grid_snapshot().to_string(), ".A1\n");
        assert!(engine.advance());
        assert_eq!(engine.cell_at(Coord::new(2, 0)).unwrap(), Cell::Person(1));
        assert_eq!(engine.current_turn(), 3);
    }

    #[test]
    fn turn_limit_ends_game() {
        let mut engine = SimulationEngine::new(&["A"], 1, 2).unwrap();
        assert!(engine.advance());
        assert!(engine.advance());
        assert!(!engine.advance());
        assert_eq!(engine.status(), Some(GameOver::TurnLimit));
        assert_eq!(engine.current_turn(), 3);
        assert!(!engine.advance());
    }

    #[test]
    fn zero_turns_never_plays() {
        let mut engine = SimulationEngine::new(&["A"], 1, 0).unwrap();
        assert!(!engine.advance());
    }

    #[test]
    fn no_survivors_ends_game() {
        let mut engine = SimulationEngine::new(&["AB"], 1, 10).unwrap();
        engine.kill(id(0)).unwrap();
        engine.kill(id(0)).unwrap();
        assert!(engine.advance());
        engine.kill(id(1)).unwrap();
        assert!(!engine.advance());
        assert_eq!(engine.status(), Some(GameOver::NoSurvivors));
        assert!(engine.kill(id(5)).is_err());
    }

    #[test]
    fn dead_avatar_stays_as_obstacle() {
        let mut engine = SimulationEngine::new(&["AB."], 1, 10).unwrap();
        engine.kill(id(1)).unwrap();
        engine.submit_move(id(0), Move::Right).unwrap();
        engine.submit_move(id(1), Move::Right).unwrap();
        assert!(engine.advance());
        assert_eq!(engine.grid_snapshot().to_string(), "AB.\n");
    }

    #[test]
    fn majority_ends_game() {
        // One person, converted on the second turn: 1 > 1 / 2.
        let mut engine = SimulationEngine::new(&["A9"], 1, 10).unwrap();
        assert!(engine.advance());
        assert_eq!(engine.player_by_id(id(0)).unwrap().score, 1);
        assert_eq!(engine.status(), Some(GameOver::Majority { leader: id(0) }));
        assert!(!engine.advance());
    }
}
