use anyhow::{Context, Result};
use clap::Parser;
use cube_snake::game::GameConfig;
use cube_snake::modes::HumanMode;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cube_snake")]
#[command(version, about = "Snake on the surface of a cube")]
struct Cli {
    /// TOML file with game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells along each edge of a face
    #[arg(long)]
    grid_size: Option<usize>,

    /// Apples planted per round
    #[arg(long)]
    apples: Option<usize>,

    /// Stones planted per round
    #[arg(long)]
    stones: Option<usize>,

    /// Seed for object placement, for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(apples) = self.apples {
            config.apples_count = apples;
        }
        if let Some(stones) = self.stones {
            config.stones_count = stones;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;
    tracing::info!(?config, "configuration loaded");

    match cli.seed {
        Some(seed) => HumanMode::new(config, StdRng::seed_from_u64(seed))?.run().await?,
        None => HumanMode::new(config, rand::thread_rng())?.run().await?,
    }

    Ok(())
}
