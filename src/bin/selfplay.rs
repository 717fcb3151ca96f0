//! Self-play match generation CLI.
//!
//! Plays matches between greedy agents on generated maps and outputs one
//! JSON record per match.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use screamfield::engine::GameConfig;
use screamfield::mapgen::MapGenConfig;
use screamfield::selfplay::{self, SelfPlayConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate self-play matches between greedy agents")]
struct Cli {
    /// Number of matches to play.
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Grid width.
    #[arg(long, default_value_t = 20)]
    width: usize,
    /// Grid height.
    #[arg(long, default_value_t = 20)]
    height: usize,
    /// Players per match (1-26).
    #[arg(long, default_value_t = 4)]
    players: usize,
    /// Chance that a free cell starts with a person.
    #[arg(long, default_value_t = 0.15)]
    density: f64,
    /// Scream radius.
    #[arg(long, default_value_t = 2)]
    radius: i32,
    /// Turn limit per match.
    #[arg(long, default_value_t = 100)]
    max_turns: u32,
    /// Exposure at which a person converts.
    #[arg(long, default_value_t = 9)]
    threshold: u8,
    /// Chance of a random move instead of the greedy one.
    #[arg(long, default_value_t = 0.05)]
    exploration: f64,
    /// Number of parallel threads.
    #[arg(long, default_value_t = 4)]
    threads: usize,
    /// Random seed, 0 for entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Leave per-turn records out of the output.
    #[arg(long)]
    no_turns: bool,
    /// Output file path (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Suppress progress and summary logging.
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: self.games,
            map: MapGenConfig {
                width: self.width,
                height: self.height,
                players: self.players,
                people_density: self.density,
            },
            game: GameConfig {
                effect_radius: self.radius,
                max_turns: self.max_turns,
                conversion_threshold: self.threshold,
            },
            exploration: self.exploration,
            threads: self.threads,
            seed: self.seed,
            record_turns: !self.no_turns,
            quiet: self.quiet,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    if !config.quiet {
        info!(
            games = config.num_games,
            width = config.map.width,
            height = config.map.height,
            players = config.map.players,
            radius = config.game.effect_radius,
            max_turns = config.game.max_turns,
            threads = config.threads,
            "self-play starting"
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            error!("self-play failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !config.quiet {
        let elapsed = start.elapsed().as_secs_f64();
        info!("Completed {} games in {:.1}s", games.len(), elapsed);
        selfplay::log_summary(&games);
    }

    let written = match &cli.output {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };

    match written {
        Ok(()) => {
            if let (Some(path), false) = (&cli.output, config.quiet) {
                info!("Wrote {} games to {}", games.len(), path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to write output: {e}");
            ExitCode::FAILURE
        }
    }
}
