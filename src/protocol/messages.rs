//! Controller-to-agent message lines.
//!
//! Every line starts with the addressed player's 1-based number so a router
//! can forward it to the right agent process.

use crate::board::PlayerId;

/// Wakes the agent up: `<n>W#`.
pub fn wake(id: PlayerId) -> String {
    format!("{}W#", id.number())
}

/// Addresses a payload to the agent: `<n>#<payload>`.
pub fn to_player(id: PlayerId, payload: &str) -> String {
    format!("{}#{}", id.number(), payload)
}

/// Tells the agent the match is over: `<n>S#`.
pub fn stop(id: PlayerId) -> String {
    format!("{}S#", id.number())
}

/// Splits an addressed line into its player and payload.
pub fn parse_addressed(line: &str) -> Option<(PlayerId, &str)> {
    let (number, payload) = line.split_once('#')?;
    let id = PlayerId::from_number(number.trim().parse().ok()?)?;
    Some((id, payload))
}
