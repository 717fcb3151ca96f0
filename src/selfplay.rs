//! Self-play match generation.
//!
//! Plays full matches on generated maps with every player driven by the
//! greedy strategy, optionally perturbed by random moves. Records the map,
//! per-turn moves and scores, and the final outcome of every match.

use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::board::{Move, PlayerId, ALL_MOVES};
use crate::engine::{GameConfig, GameOver, SimulationEngine};
use crate::error::EngineError;
use crate::mapgen::{generate, MapGenConfig, MapGenError};
use crate::search::greedy_move;

/// Configuration for self-play match generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_games: usize,
    /// Shape of the generated maps.
    pub map: MapGenConfig,
    /// Rules every match is played under.
    pub game: GameConfig,
    /// Chance that an agent plays a uniformly random move instead of the greedy one.
    pub exploration: f64,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Base random seed (0 = use entropy).
    pub seed: u64,
    /// Keep per-turn move and score records.
    pub record_turns: bool,
    /// Suppress per-match progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            map: MapGenConfig::default(),
            game: GameConfig::default(),
            exploration: 0.05,
            threads: 4,
            seed: 0,
            record_turns: true,
            quiet: false,
        }
    }
}

/// Errors that stop self-play.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("map generation failed: {0}")]
    MapGen(#[from] MapGenError),

    #[error("engine rejected generated match: {0}")]
    Engine(#[from] EngineError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// One played turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    /// One protocol move letter per player id, `.` for dead players.
    pub moves: String,
    /// Scores by player id after the turn.
    pub scores: Vec<u32>,
}

/// A complete self-play match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    /// Seed the match's generator was built from; replays the same match.
    pub seed: u64,
    pub rules: GameConfig,
    /// Initial layout rows.
    pub map: Vec<String>,
    pub people_start: usize,
    pub people_remaining: usize,
    pub turns_played: u32,
    pub outcome: Option<GameOver>,
    pub final_scores: Vec<u32>,
    /// Player letters from first place to last.
    pub ranking: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub turns: Vec<TurnRecord>,
}

/// Returns the seed for match `game_id`.
fn game_seed(base: u64, game_id: usize) -> u64 {
    if base != 0 {
        base.wrapping_add(game_id as u64)
    } else {
        rand::random()
    }
}

/// Picks the move for one agent.
fn agent_move(engine: &SimulationEngine, id: PlayerId, exploration: f64, rng: &mut SmallRng) -> Move {
    if exploration > 0.0 && rng.gen_bool(exploration.min(1.0)) {
        ALL_MOVES[rng.gen_range(0..ALL_MOVES.len())]
    } else {
        greedy_move(engine.grid_snapshot(), id)
    }
}

/// Plays a single self-play match seeded with `seed`.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, seed: u64) -> Result<GameRecord, SelfPlayError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let map = generate(&config.map, &mut rng)?;
    let mut engine = SimulationEngine::with_config(&map, config.game)?;
    let mut turns = Vec::new();

    while !engine.is_over() {
        let living: Vec<PlayerId> = engine
            .roster()
            .iter()
            .filter(|p| p.alive)
            .map(|p| p.id)
            .collect();
        let moves: Vec<(PlayerId, Move)> = living
            .into_iter()
            .map(|id| (id, agent_move(&engine, id, config.exploration, &mut rng)))
            .collect();
        for &(id, mv) in &moves {
            engine.submit_move(id, mv)?;
        }

        let turn = engine.current_turn();
        if !engine.advance() {
            break;
        }

        if config.record_turns {
            let mut letters = vec!['.'; engine.player_count()];
            for &(id, mv) in &moves {
                letters[id.index()] = mv.protocol_char();
            }
            turns.push(TurnRecord {
                turn,
                moves: letters.into_iter().collect(),
                scores: engine.roster().iter().map(|p| p.score).collect(),
            });
        }
    }

    Ok(GameRecord {
        game_id,
        seed,
        rules: config.game,
        people_start: engine.total_people(),
        people_remaining: engine.people_remaining(),
        turns_played: engine.current_turn() - 1,
        outcome: engine.status(),
        final_scores: engine.roster().iter().map(|p| p.score).collect(),
        ranking: engine.roster().ranking().map(|p| p.id.letter()).collect(),
        map,
        turns,
    })
}

fn log_game(config: &SelfPlayConfig, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match game.outcome {
        Some(GameOver::Majority { leader }) => format!("{leader} wins by majority"),
        Some(GameOver::TurnLimit) => "turn limit".to_string(),
        Some(GameOver::NoSurvivors) => "no survivors".to_string(),
        None => "unfinished".to_string(),
    };
    info!(
        game = game.game_id + 1,
        of = config.num_games,
        turns = game.turns_played,
        ranking = %game.ranking,
        secs = started.elapsed().as_secs_f64(),
        "{outcome}"
    );
}

/// Runs self-play generation, producing one record per match in game order.
///
/// When `config.threads > 1`, matches are played concurrently using rayon.
/// Per-match seeds depend only on the base seed and the game id, so the
/// thread count does not change the results.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    if config.threads > 1 {
        run_self_play_parallel(config)
    } else {
        run_self_play_sequential(config)
    }
}

fn play_logged(config: &SelfPlayConfig, game_id: usize) -> Result<GameRecord, SelfPlayError> {
    let started = Instant::now();
    let game = play_game(config, game_id, game_seed(config.seed, game_id))?;
    log_game(config, &game, started);
    Ok(game)
}

/// Sequential self-play: plays matches one at a time.
fn run_self_play_sequential(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    (0..config.num_games).map(|i| play_logged(config, i)).collect()
}

/// Parallel self-play on a dedicated rayon pool.
fn run_self_play_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| play_logged(config, i))
            .collect()
    })
}

/// Writes game records as JSONL (one JSON object per match, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate statistics over a batch of matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub avg_turns: f64,
    pub majority_wins: usize,
    pub turn_limits: usize,
    /// Matches won (first place with a positive score) per player letter.
    pub wins_by_letter: Vec<(char, usize)>,
    /// Share of starting people converted across all matches.
    pub conversion_rate: f64,
}

/// Computes summary statistics over `games`.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let total = games.len();
    let mut wins = std::collections::BTreeMap::new();
    let mut turns = 0u64;
    let mut majority_wins = 0;
    let mut turn_limits = 0;
    let mut people_start = 0usize;
    let mut converted = 0u64;

    for game in games {
        turns += u64::from(game.turns_played);
        people_start += game.people_start;
        converted += game.final_scores.iter().map(|&s| u64::from(s)).sum::<u64>();
        match game.outcome {
            Some(GameOver::Majority { .. }) => majority_wins += 1,
            Some(GameOver::TurnLimit) => turn_limits += 1,
            _ => {}
        }
        if let Some(leader) = game.ranking.chars().next() {
            let leader_score = PlayerId::from_letter(leader)
                .and_then(|id| game.final_scores.get(id.index()).copied())
                .unwrap_or(0);
            if leader_score > 0 {
                *wins.entry(leader).or_insert(0usize) += 1;
            }
        }
    }

    Summary {
        games: total,
        avg_turns: turns as f64 / total.max(1) as f64,
        majority_wins,
        turn_limits,
        wins_by_letter: wins.into_iter().collect(),
        conversion_rate: converted as f64 / people_start.max(1) as f64,
    }
}

/// Logs a summary of self-play results.
pub fn log_summary(games: &[GameRecord]) {
    let summary = summarize(games);
    info!("=== Self-Play Summary ===");
    info!("Games: {}", summary.games);
    info!("Avg turns/game: {:.1}", summary.avg_turns);
    info!("Majority wins: {}", summary.majority_wins);
    info!("Turn limits: {}", summary.turn_limits);
    info!("People converted: {:.1}%", 100.0 * summary.conversion_rate);
    for (letter, count) in &summary.wins_by_letter {
        let pct = 100.0 * *count as f64 / summary.games.max(1) as f64;
        info!("  {letter}: {count} ({pct:.1}%)");
    }
}
