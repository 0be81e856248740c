use anyhow::{anyhow, Context, Result};
use clap::Parser;
use classic_snake::game::{GameConfig, GameEngine};
use classic_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classic_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in units
    #[arg(long)]
    width: Option<u32>,

    /// Board height in units
    #[arg(long)]
    height: Option<u32>,

    /// Grid cell size in units
    #[arg(long)]
    cell_size: Option<u32>,

    /// Never place an apple under the snake
    #[arg(long)]
    apple_avoids_snake: bool,

    /// Seed for reproducible apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config = config.with_cell_size(cell_size);
        }
        if self.apple_avoids_snake {
            config.apple_avoids_snake = true;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install log subscriber: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    info!(?config, seed = ?cli.seed, "starting classic_snake");

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await?;

    Ok(())
}
