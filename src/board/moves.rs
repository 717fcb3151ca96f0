//! Per-turn movement commands.

/// A one-step movement command submitted by a player for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
    Stop,
}

/// All moves, in protocol order.
pub const ALL_MOVES: [Move; 5] = [Move::Left, Move::Right, Move::Up, Move::Down, Move::Stop];

impl Move {
    /// Returns the `(dx, dy)` displacement of this move. `y` grows downward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Stop => (0, 0),
        }
    }

    /// Returns the single-character protocol abbreviation.
    pub const fn protocol_char(self) -> char {
        match self {
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Stop => 'S',
        }
    }

    /// Parses a move from its protocol abbreviation.
    pub fn from_protocol_char(c: char) -> Option<Move> {
        match c {
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            'U' => Some(Move::Up),
            'D' => Some(Move::Down),
            'S' => Some(Move::Stop),
            _ => None,
        }
    }
}
