//! StageCut CLI
//!
//! Splits a video, given as a directory of frame images, into stable and
//! unstable stages.
//!
//! # Usage
//!
//! ```bash
//! ffmpeg -i demo.mp4 frames/%05d.png
//! stagecut cut --input frames --format json
//! stagecut pick --input frames --to-dir picked --frame-count 3
//! stagecut thumbnail --input frames --to-dir thumbs --vertical
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use stagecut::cli::{commands, Cli, Commands};
use stagecut::config_initialization::initialize_configuration;
use stagecut::utils::logging;

/// Main entry point for the StageCut CLI application
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli).context("Failed to load configuration")?;
    logging::init(&config.log);

    info!("Starting StageCut {}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Cut(args) => commands::cut(args, &config)?,
        Commands::Pick(args) => commands::pick(args, &config)?,
        Commands::Thumbnail(args) => commands::thumbnail(args, &config)?,
    }

    info!("StageCut completed successfully");
    Ok(())
}
