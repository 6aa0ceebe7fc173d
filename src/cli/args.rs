//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use clap_num::number_range;

/// Largest grid side accepted by `--block`
pub const MAX_BLOCK: u32 = 16;

/// Options shared by every command that cuts a video
#[derive(Args, Debug, Clone)]
pub struct CutterArgs {
    /// Directory of frame images (e.g. produced by `ffmpeg -i in.mp4 frames/%05d.png`)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Frame rate of the image sequence
    #[arg(long, value_parser = parse_positive)]
    pub fps: Option<f64>,

    /// Frame stride between compared frames
    #[arg(long, env = "STAGECUT_STEP", value_parser = clap::value_parser!(u64).range(1..))]
    pub step: Option<u64>,

    /// Grid side: frames are compared as BLOCK x BLOCK sub-images
    #[arg(long, env = "STAGECUT_BLOCK", value_parser = parse_block)]
    pub block: Option<u32>,

    /// Resize factor applied before comparing
    #[arg(long, value_parser = parse_positive)]
    pub compress_rate: Option<f64>,

    /// Mean score a range must exceed to be stable (0-1)
    #[arg(long, env = "STAGECUT_THRESHOLD", value_parser = parse_unit)]
    pub threshold: Option<f64>,

    /// Enable the loop filter with this start/end similarity (0-1, default 0.95 when no value is given)
    #[arg(long, env = "STAGECUT_RANGE_THRESHOLD", value_parser = parse_unit)]
    pub range_threshold: Option<Option<f64>>,

    /// Frames of slack tolerated when merging unstable ranges
    #[arg(long, env = "STAGECUT_OFFSET")]
    pub offset: Option<u64>,

    /// Drop ranges shorter than this many frames (0 keeps all)
    #[arg(long, env = "STAGECUT_LIMIT")]
    pub limit: Option<u64>,
}

/// Report output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Which stages `pick` exports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageKind {
    Stable,
    Unstable,
    #[default]
    All,
}

/// Arguments for the cut command
#[derive(Args, Debug)]
pub struct CutArgs {
    #[command(flatten)]
    pub cutter: CutterArgs,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the pick command
#[derive(Args, Debug)]
pub struct PickArgs {
    #[command(flatten)]
    pub cutter: CutterArgs,

    /// Output directory (default: a timestamp named directory)
    #[arg(long)]
    pub to_dir: Option<PathBuf>,

    /// Frames picked per stage
    #[arg(long)]
    pub frame_count: Option<usize>,

    /// Pick frames at random instead of evenly
    #[arg(long)]
    pub random: bool,

    /// Stages to export
    #[arg(long, value_enum, default_value_t = StageKind::All)]
    pub which: StageKind,
}

/// Arguments for the thumbnail command
#[derive(Args, Debug)]
pub struct ThumbnailArgs {
    #[command(flatten)]
    pub cutter: CutterArgs,

    /// Output directory
    #[arg(long)]
    pub to_dir: PathBuf,

    /// Stack frames top to bottom instead of side by side
    #[arg(long)]
    pub vertical: bool,

    /// Resize factor of each stacked frame
    #[arg(long, value_parser = parse_positive)]
    pub rate: Option<f64>,
}

fn parse_block(s: &str) -> Result<u32, String> {
    number_range(s, 1, MAX_BLOCK)
}

fn parse_unit(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("`{}` is not a number: {}", s, e))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not within 0..=1", value))
    }
}

fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("`{}` is not a number: {}", s, e))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} must be positive", value))
    }
}
