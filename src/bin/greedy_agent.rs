//! Greedy agent.
//!
//! Speaks the agent side of the match protocol on stdin/stdout with the
//! addressing prefix already stripped: the first line is the rules line, and
//! every later non-empty line holds the flat grid. Answers each grid with one
//! move letter.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use screamfield::board::{parse_layout, GridMap};
use screamfield::protocol::{parse_grid_flat, parse_rules};
use screamfield::search::greedy_move;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut lines = stdin.lock().lines();

    let rules = match lines.next() {
        Some(Ok(line)) => match parse_rules(&line) {
            Ok(rules) => rules,
            Err(e) => {
                error!("bad rules line: {e}");
                return ExitCode::FAILURE;
            }
        },
        _ => return ExitCode::FAILURE,
    };

    for line in lines {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        let grid = match read_grid(&line, rules.width, rules.height) {
            Some(grid) => grid,
            None => {
                error!(line = %line, "unreadable grid");
                return ExitCode::FAILURE;
            }
        };
        let mv = greedy_move(&grid, rules.me);
        debug!(?mv, "move chosen");
        if writeln!(out, "{}", mv.protocol_char()).and_then(|()| out.flush()).is_err() {
            break;
        }
    }
    ExitCode::SUCCESS
}

/// Rebuilds a grid from its flat encoding.
fn read_grid(line: &str, width: usize, height: usize) -> Option<GridMap> {
    let rows = parse_grid_flat(line, width, height).ok()?;
    parse_layout(&rows).ok().map(|layout| layout.grid)
}
