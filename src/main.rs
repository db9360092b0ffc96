use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{BoundaryPolicy, Difficulty, GameConfig};
use grid_snake::modes::HumanMode;
use grid_snake::store::{JsonFileStore, KeyValueStore, MemoryStore};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a small grid, in the terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting difficulty: easy, normal, hard or special
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// What the edges do: wall or wrap
    #[arg(long)]
    boundary: Option<BoundaryPolicy>,

    /// Side length of the square board
    #[arg(long)]
    board_size: Option<usize>,

    /// Keep playing the current game when the difficulty changes
    #[arg(long)]
    no_restart_on_difficulty_change: bool,

    /// Where scores are kept between runs
    #[arg(long, default_value = "snake_scores.json")]
    store: PathBuf,

    /// Keep scores in memory only
    #[arg(long, conflicts_with = "store")]
    memory_store: bool,

    /// Write logs here (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(boundary) = self.boundary {
            config.boundary = boundary;
        }
        if let Some(board_size) = self.board_size {
            config.board_size = board_size;
        }
        if self.no_restart_on_difficulty_change {
            config.restart_on_difficulty_change = false;
        }

        config.validate()?;
        Ok(config)
    }

    fn score_store(&self) -> Result<Box<dyn KeyValueStore>> {
        if self.memory_store {
            return Ok(Box::new(MemoryStore::new()));
        }
        Ok(Box::new(JsonFileStore::open(&self.store)?))
    }
}

/// The terminal belongs to the game, so logs only go to a file
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let store = cli.score_store()?;

    let mut human_mode = HumanMode::new(config, store)?;
    human_mode.run().await?;

    Ok(())
}
