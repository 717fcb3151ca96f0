//! Match controller.
//!
//! Drives one match over a line-oriented text channel: announces the rules to
//! every agent, sends each living agent the grid at the start of every turn,
//! collects one reply per living agent, and advances the engine. Every
//! accepted reply and every turn boundary is written to a history log.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::board::{Move, PlayerId};
use crate::engine::{GameOver, SimulationEngine};
use crate::error::EngineError;
use crate::protocol::map::{encode_grid_flat, encode_rules, MapTextError, Rules};
use crate::protocol::messages;
use crate::protocol::parser::{parse_reply, Reply};

/// Errors that abort a match.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad match input: {0}")]
    Input(#[from] MapTextError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("malformed agent reply: '{0}'")]
    Protocol(String),

    #[error("agent channel closed before all moves arrived")]
    UnexpectedEof,
}

/// Final state of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub turns_played: u32,
    pub outcome: Option<GameOver>,
    /// Scores indexed by player id.
    pub scores: Vec<u32>,
    /// Player letters from first place to last.
    pub ranking: String,
}

impl MatchSummary {
    pub fn from_engine(engine: &SimulationEngine) -> Self {
        MatchSummary {
            turns_played: engine.current_turn().saturating_sub(1),
            outcome: engine.status(),
            scores: engine.roster().iter().map(|p| p.score).collect(),
            ranking: engine.roster().ranking().map(|p| p.id.letter()).collect(),
        }
    }
}

/// Runs a match between an engine and a set of agents behind one text channel.
pub struct Controller<R, W, L> {
    engine: SimulationEngine,
    input: R,
    output: W,
    history: L,
}

impl<R: BufRead, W: Write, L: Write> Controller<R, W, L> {
    /// `input` carries agent replies, `output` carries addressed messages to
    /// agents, and `history` receives the match log.
    pub fn new(engine: SimulationEngine, input: R, output: W, history: L) -> Self {
        Controller { engine, input, output, history }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Plays the match to the end.
    pub fn run(&mut self) -> Result<MatchSummary, ControllerError> {
        writeln!(self.history, "{}", self.engine.player_count())?;
        self.send_rules()?;

        while !self.engine.is_over() {
            self.send_state()?;
            self.collect_moves()?;
            writeln!(self.history, "S")?;
            self.engine.advance();
        }

        self.finish()
    }

    fn ids(&self) -> Vec<PlayerId> {
        self.engine.roster().iter().map(|p| p.id).collect()
    }

    fn send_rules(&mut self) -> Result<(), ControllerError> {
        let grid = self.engine.grid_snapshot();
        let (width, height) = (grid.width() as usize, grid.height() as usize);
        for id in self.ids() {
            let rules = Rules {
                width,
                height,
                effect_radius: self.engine.config().effect_radius,
                player_count: self.engine.player_count(),
                me: id,
            };
            writeln!(self.output, "{}", messages::wake(id))?;
            writeln!(self.output, "{}", messages::to_player(id, &encode_rules(&rules)))?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn send_state(&mut self) -> Result<(), ControllerError> {
        let flat = encode_grid_flat(self.engine.grid_snapshot());
        let living: Vec<PlayerId> = self
            .engine
            .roster()
            .iter()
            .filter(|p| p.alive)
            .map(|p| p.id)
            .collect();
        for id in living {
            writeln!(self.output, "{}", messages::wake(id))?;
            writeln!(self.output, "{}", messages::to_player(id, ""))?;
            writeln!(self.output, "{}", messages::to_player(id, &flat))?;
        }
        self.output.flush()?;
        debug!(turn = self.engine.current_turn(), "state sent");
        Ok(())
    }

    fn waiting_for_moves(&self) -> bool {
        self.engine
            .roster()
            .iter()
            .any(|p| p.alive && p.pending_move.is_none())
    }

    /// Reads replies until every living player has a move for this turn.
    fn collect_moves(&mut self) -> Result<(), ControllerError> {
        let mut line = String::new();
        while self.waiting_for_moves() {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ControllerError::UnexpectedEof);
            }
            match parse_reply(&line) {
                None => continue,
                Some(Reply::Timeout { number }) => self.handle_timeout(number)?,
                Some(Reply::Move { number, mv }) => self.handle_move(number, mv)?,
                Some(Reply::Malformed(raw)) => {
                    writeln!(self.history, "U")?;
                    return Err(ControllerError::Protocol(raw));
                }
            }
        }
        Ok(())
    }

    fn living(&self, number: usize) -> Option<PlayerId> {
        let id = PlayerId::from_number(number)?;
        self.engine.player_by_id(id).ok().filter(|p| p.alive).map(|p| p.id)
    }

    fn handle_timeout(&mut self, number: usize) -> Result<(), ControllerError> {
        if let Some(id) = self.living(number) {
            self.engine.kill(id)?;
            writeln!(self.history, "T{}", id.index())?;
            info!(player = %id, "agent timed out");
        }
        Ok(())
    }

    fn handle_move(&mut self, number: usize, mv: Move) -> Result<(), ControllerError> {
        let Some(id) = self.living(number) else {
            warn!(number, "move for unknown or dead player ignored");
            return Ok(());
        };
        match self.engine.submit_move(id, mv) {
            Ok(()) => {
                writeln!(self.history, "{} {}", id.index(), mv.protocol_char())?;
            }
            Err(EngineError::DuplicateMove(_)) => {
                warn!(player = %id, "second move in one turn, disqualifying");
                self.engine.kill(id)?;
                writeln!(self.history, "D{}", id.index())?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<MatchSummary, ControllerError> {
        for id in self.ids() {
            writeln!(self.output, "{}", messages::stop(id))?;
        }
        self.output.flush()?;

        writeln!(self.history, "E")?;
        for player in self.engine.roster().iter() {
            writeln!(self.history, "{}", player.score)?;
        }
        self.history.flush()?;

        let summary = MatchSummary::from_engine(&self.engine);
        info!(
            turns = summary.turns_played,
            ranking = %summary.ranking,
            outcome = ?summary.outcome,
            "match finished"
        );
        Ok(summary)
    }
}
