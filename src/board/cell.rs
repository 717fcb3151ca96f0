//! Cell contents and player identities.
//!
//! A cell holds nothing, a person with an exposure counter, or one player's
//! avatar. Each variant maps to a single character of the wire alphabet:
//! `.` for empty, `0`-`9` for people, `A`-`Z` for avatars.

use std::fmt;

use serde::{Serialize, Serializer};

/// Maximum number of players on one grid (one per uppercase letter).
pub const MAX_PLAYERS: usize = 26;

/// Highest exposure counter a person can carry.
pub const MAX_EXPOSURE: u8 = 9;

/// Identity of a player, also encoding its display letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Creates a player id from a 0-based index. Returns None past `Z`.
    pub const fn new(index: usize) -> Option<PlayerId> {
        if index < MAX_PLAYERS {
            Some(PlayerId(index as u8))
        } else {
            None
        }
    }

    /// Parses a player id from its uppercase letter.
    pub fn from_letter(c: char) -> Option<PlayerId> {
        if c.is_ascii_uppercase() {
            Some(PlayerId(c as u8 - b'A'))
        } else {
            None
        }
    }

    /// Parses a player id from its 1-based protocol number.
    pub fn from_number(n: usize) -> Option<PlayerId> {
        n.checked_sub(1).and_then(PlayerId::new)
    }

    /// Returns the 0-based index of this player.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the 1-based number used to address the player on the wire.
    pub const fn number(self) -> usize {
        self.0 as usize + 1
    }

    /// Returns the display letter (`A` for player 0).
    pub const fn letter(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.letter())
    }
}

/// Contents of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// A convertible person carrying its uninterrupted exposure count.
    Person(u8),
    /// The body of a player's avatar.
    Avatar(PlayerId),
}

impl Cell {
    /// Parses a cell from its wire character.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            '0'..='9' => Some(Cell::Person(c as u8 - b'0')),
            'A'..='Z' => PlayerId::from_letter(c).map(Cell::Avatar),
            _ => None,
        }
    }

    /// Returns the wire character for this cell.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Person(n) => {
                debug_assert!(n <= MAX_EXPOSURE, "exposure {n} out of range");
                char::from(b'0' + n)
            }
            Cell::Avatar(id) => id.letter(),
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub const fn is_person(self) -> bool {
        matches!(self, Cell::Person(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
