//! Agent reply parser.
//!
//! Agents answer each turn with one line routed back to the controller:
//! `<n>#<M>` submits move `M` for player number `n` (1-based), and `<n>T`
//! reports that the agent timed out. Whitespace between tokens is ignored.

use tracing::warn;

use crate::board::Move;

/// A parsed agent-to-controller reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A move for the given 1-based player number.
    Move { number: usize, mv: Move },

    /// The agent behind the given player number timed out.
    Timeout { number: usize },

    /// The line does not follow the reply grammar.
    Malformed(String),
}

/// Parses a move letter. Anything other than `L`, `R`, `U` or `D` stops.
fn parse_move_char(c: char) -> Move {
    match Move::from_protocol_char(c) {
        Some(mv) => mv,
        None => Move::Stop,
    }
}

/// Parses a single reply line.
///
/// Returns `None` for blank lines.
pub fn parse_reply(line: &str) -> Option<Reply> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let number = match trimmed[..digits_end].parse::<usize>() {
        Ok(n) => n,
        Err(_) => {
            warn!(line = trimmed, "reply without player number");
            return Some(Reply::Malformed(trimmed.to_string()));
        }
    };

    let mut rest = trimmed[digits_end..].chars().filter(|c| !c.is_whitespace());
    match rest.next() {
        Some('T') => Some(Reply::Timeout { number }),
        Some('#') => match rest.next() {
            Some(c) => Some(Reply::Move { number, mv: parse_move_char(c) }),
            None => {
                warn!(line = trimmed, "move reply without move letter");
                Some(Reply::Malformed(trimmed.to_string()))
            }
        },
        _ => {
            warn!(line = trimmed, "unknown reply terminator");
            Some(Reply::Malformed(trimmed.to_string()))
        }
    }
}
