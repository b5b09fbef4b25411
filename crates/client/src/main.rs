//! Headless 2048 driver.
//!
//! Plays one game without a screen, either by replaying a scripted list of
//! moves or by letting a greedy policy choose, then prints a JSON summary.
//!
//! ```bash
//! # Replay three moves on seed 7
//! cargo run -p twenty48-client -- --seed 7 replay --moves left,up,right
//!
//! # Autoplay on a 5x5 board, logging every turn to ./logs/twenty48.log
//! TWENTY48_LOG_DIR=./logs cargo run -p twenty48-client -- --width 5 --height 5 autoplay
//! ```
mod config;
mod display;
mod driver;
mod logging;
mod strategy;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ClientConfig;
use display::TraceDisplay;
use game_core::GameSession;
use strategy::{Greedy, Scripted, Strategy};

/// Headless 2048 driver
#[derive(Parser, Debug)]
#[command(name = "twenty48")]
#[command(about = "Play 2048 without a screen and report the result", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Spawn seed (overrides TWENTY48_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Board width (overrides TWENTY48_WIDTH)
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Board height (overrides TWENTY48_HEIGHT)
    #[arg(long, global = true)]
    height: Option<usize>,

    /// Winning tile value (overrides TWENTY48_WIN_VALUE)
    #[arg(long, global = true)]
    win_value: Option<u32>,

    /// Maximum number of submitted moves (overrides TWENTY48_MAX_MOVES)
    #[arg(long, global = true)]
    max_moves: Option<usize>,

    /// Directory for the log file (overrides TWENTY48_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the greedy policy play until the game ends
    Autoplay,

    /// Replay a fixed list of moves
    Replay {
        /// Moves such as `left,up,r,d` (names, initials, or h/j/k)
        #[arg(long, required = true, num_args = 1..)]
        moves: Vec<String>,
    },
}

impl Cli {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.game.width = width;
        }
        if let Some(height) = self.height {
            config.game.height = height;
        }
        if let Some(win_value) = self.win_value {
            config.game.win_value = win_value;
        }
        if let Some(max_moves) = self.max_moves {
            config.max_moves = max_moves.max(1);
        }
        if let Some(log_dir) = &self.log_dir {
            config.log_dir = Some(log_dir.clone());
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    cli.apply(&mut config);

    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let seed = config.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, ?config.game, "Starting game");

    let mut session =
        GameSession::new(config.game.clone(), seed).context("invalid game configuration")?;
    session.add_display(Box::new(TraceDisplay::new()));
    tracing::debug!("Opening board:\n{}", session.state().board);

    let mut strategy: Box<dyn Strategy> = match &cli.command {
        Command::Autoplay => Box::new(Greedy),
        Command::Replay { moves } => Box::new(Scripted::parse(moves)?),
    };

    let summary = driver::run(&mut session, strategy.as_mut(), config.max_moves)?;
    tracing::info!("Final board:\n{}", session.state().board);

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
