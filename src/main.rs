use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use classic_snake::game::GameConfig;
use classic_snake::modes::HumanMode;
use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "classic_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in board units
    #[arg(long)]
    width: Option<i32>,

    /// Board height in board units
    #[arg(long)]
    height: Option<i32>,

    /// Side length of one cell in board units
    #[arg(long)]
    cell_size: Option<i32>,

    /// Initial speed level (1-6)
    #[arg(long)]
    speed: Option<u8>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal itself is taken by the game
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log debug messages as well
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.initial_speed = speed;
        }

        let resized = self.width.is_some() || self.height.is_some() || self.cell_size.is_some();
        if resized && config.center_start_if_outside() {
            warn!(
                "Start position moved to {:?} to fit the {}x{} board",
                config.default_position, config.board_width, config.board_height
            );
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(level, Config::default(), log_file).context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!(
        "Starting snake on a {}x{} board (cell {})",
        config.board_width, config.board_height, config.cell_size
    );

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}
