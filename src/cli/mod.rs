//! CLI module for StageCut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

pub use args::{CutArgs, CutterArgs, OutputFormat, PickArgs, StageKind, ThumbnailArgs};

/// StageCut - split a video into stable and unstable stages
///
/// Frames are compared block by block with SSIM; runs of dissimilar frames
/// become unstable stages and everything between them is stable.
#[derive(Parser, Debug)]
#[command(name = "stagecut")]
#[command(about = "StageCut - Split a video into stable and unstable stages")]
#[command(version)]
pub struct Cli {
    /// Logging level
    #[arg(long, value_enum, env = "STAGECUT_LOG_LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Logging format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Config file (default: ./stagecut.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut a video and report its stages
    Cut(CutArgs),
    /// Save a few frames of every stage
    Pick(PickArgs),
    /// Save one thumbnail per unstable stage
    Thumbnail(ThumbnailArgs),
}

impl Commands {
    pub fn cutter_args(&self) -> &CutterArgs {
        match self {
            Commands::Cut(args) => &args.cutter,
            Commands::Pick(args) => &args.cutter,
            Commands::Thumbnail(args) => &args.cutter,
        }
    }
}
