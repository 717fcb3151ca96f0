//! Screamfield match controller.
//!
//! Reads a match input file, then talks to the player agents over stdin and
//! stdout: addressed messages go out on stdout and agent replies come back on
//! stdin, one line each. Diagnostics go to stderr; the match history goes to
//! the file given with `--history`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use screamfield::controller::{Controller, ControllerError};
use screamfield::engine::SimulationEngine;
use screamfield::protocol::parse_game_input;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a screamfield match between external agents")]
struct Cli {
    /// Match input: `<width> <height> <radius> <max_turns>` then the grid.
    input: PathBuf,
    /// Write the match history to this file.
    #[arg(long)]
    history: Option<PathBuf>,
    /// Exposure at which a person converts.
    #[arg(long, default_value_t = 9)]
    threshold: u8,
}

fn run(cli: &Cli) -> Result<(), ControllerError> {
    let text = fs::read_to_string(&cli.input)?;
    let mut input = parse_game_input(&text)?;
    input.config.conversion_threshold = cli.threshold;
    let engine = SimulationEngine::with_config(&input.rows, input.config)?;
    info!(
        width = input.width,
        height = input.height,
        players = engine.player_count(),
        people = engine.total_people(),
        "match loaded"
    );

    let history: Box<dyn Write> = match &cli.history {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::sink()),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut controller = Controller::new(engine, stdin.lock(), BufWriter::new(stdout.lock()), history);
    controller.run()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ (ControllerError::Input(_) | ControllerError::Engine(_))) => {
            error!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
