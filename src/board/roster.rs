//! Player records and the live score ranking.
//!
//! The roster keeps players indexed by id plus a separate rank table
//! (`places[rank] = id`) sorted by descending score. Scores only ever grow by
//! one, so an increment needs at most a single swap to restore the order.

use super::cell::PlayerId;
use super::grid::Coord;
use super::moves::Move;

/// A player and its per-match state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub position: Coord,
    pub score: u32,
    pub alive: bool,
    /// 0-based place in the descending-score ranking.
    pub rank: usize,
    /// Move submitted for the current turn, if any.
    pub pending_move: Option<Move>,
}

impl Player {
    pub fn new(id: PlayerId, position: Coord) -> Self {
        Player {
            id,
            position,
            score: 0,
            alive: true,
            rank: id.index(),
            pending_move: None,
        }
    }
}

/// All players of a match, with ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
    /// Player id index at each rank.
    places: Vec<usize>,
}

impl Roster {
    /// Builds a roster from avatar positions ordered by player id.
    pub fn new(positions: &[Coord]) -> Self {
        let players = positions
            .iter()
            .enumerate()
            .filter_map(|(i, &pos)| PlayerId::new(i).map(|id| Player::new(id, pos)))
            .collect::<Vec<_>>();
        let places = (0..players.len()).collect();
        Roster { players, places }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns the player with the given id, if it exists.
    pub fn by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub(crate) fn by_id_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// Returns the player at the given 0-based rank, if it exists.
    pub fn by_rank(&self, rank: usize) -> Option<&Player> {
        self.places.get(rank).map(|&idx| &self.players[idx])
    }

    /// Iterates over players in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Iterates over players from first place to last.
    pub fn ranking(&self) -> impl Iterator<Item = &Player> {
        self.places.iter().map(move |&idx| &self.players[idx])
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Score of the first-placed player, dead or alive.
    pub fn top_score(&self) -> u32 {
        self.by_rank(0).map_or(0, |p| p.score)
    }

    /// Marks a player dead. Returns true if it was alive before.
    pub fn kill(&mut self, id: PlayerId) -> bool {
        match self.by_id_mut(id) {
            Some(p) if p.alive => {
                p.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Adds one point to `id` and restores the ranking order.
    ///
    /// Players tied at the old score form a contiguous block; the scorer
    /// trades places with the top of that block, which keeps every other
    /// player in order.
    pub fn inc_score(&mut self, id: PlayerId) {
        let idx = id.index();
        self.players[idx].score += 1;
        let new_score = self.players[idx].score;

        let current = self.players[idx].rank;
        let mut target = current;
        while target > 0 && self.players[self.places[target - 1]].score < new_score {
            target -= 1;
        }

        if target != current {
            self.places.swap(target, current);
            let moved_down = self.places[current];
            self.players[idx].rank = target;
            self.players[moved_down].rank = current;
        }
    }

    /// Clears every pending move.
    pub fn clear_moves(&mut self) {
        for p in &mut self.players {
            p.pending_move = None;
        }
    }

    /// Checks the ranking invariants: scores non-increasing by rank and rank
    /// fields agreeing with the rank table.
    pub fn ranking_is_consistent(&self) -> bool {
        let ordered = self
            .places
            .windows(2)
            .all(|w| self.players[w[0]].score >= self.players[w[1]].score);
        let linked = self
            .places
            .iter()
            .enumerate()
            .all(|(rank, &idx)| self.players[idx].rank == rank);
        ordered && linked
    }
}
