//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::{AppConfig, ImageSequenceSource, PngExporter, SsimMetric};
use crate::app::{CutInteractor, CutReport, ExportInteractor, PickOptions};
use crate::cli::args::{CutArgs, CutterArgs, OutputFormat, PickArgs, StageKind, ThumbnailArgs};
use crate::domain::model::FrameRange;
use crate::engine::VideoCutter;

/// Execute the cut command
pub fn cut(args: &CutArgs, config: &AppConfig) -> Result<()> {
    let (report, _) = run_cut(&args.cutter, config)?;

    let rendered = match args.format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)
            .context("Failed to serialize report to JSON")?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(&report).context("Failed to serialize report to YAML")?
        }
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Execute the pick command
pub fn pick(args: &PickArgs, config: &AppConfig) -> Result<()> {
    let (report, mut source) = run_cut(&args.cutter, config)?;

    let ranges: Vec<FrameRange> = match args.which {
        StageKind::Stable => report.stable.clone(),
        StageKind::Unstable => report.unstable.clone(),
        StageKind::All => report
            .stages()
            .into_iter()
            .map(|(_, range)| range.clone())
            .collect(),
    };
    info!("Picking frames from {} {:?} stages", ranges.len(), args.which);

    let options = PickOptions {
        frame_count: config.export.frame_count,
        random: config.export.random,
        compress: None,
    };
    let exporter = ExportInteractor::new(Box::new(PngExporter::new()));
    let dir = exporter
        .pick_and_save(&ranges, &options, args.to_dir.as_deref(), &mut source)
        .context("Failed to save picked frames")?;

    println!("{}", dir.display());
    Ok(())
}

/// Execute the thumbnail command
pub fn thumbnail(args: &ThumbnailArgs, config: &AppConfig) -> Result<()> {
    let (report, mut source) = run_cut(&args.cutter, config)?;

    let exporter = ExportInteractor::new(Box::new(PngExporter::new()));
    for range in &report.unstable {
        exporter
            .thumbnail(
                range,
                &mut source,
                Some(args.to_dir.as_path()),
                config.export.thumbnail_rate,
                config.export.vertical,
            )
            .with_context(|| format!("Failed to build thumbnail of {}", range))?;
    }

    println!(
        "{} thumbnails written to {}",
        report.unstable.len(),
        args.to_dir.display()
    );
    Ok(())
}

/// Open the frame directory and run cut + classify on it
fn run_cut(args: &CutterArgs, config: &AppConfig) -> Result<(CutReport, ImageSequenceSource)> {
    info!("Input: {}", args.input.display());

    let mut source = ImageSequenceSource::open(&args.input, config.cut.fps)
        .with_context(|| format!("Failed to open frames in {}", args.input.display()))?;

    let cutter = VideoCutter::new(config.cut.cutter()).context("Invalid cutter configuration")?;
    let interactor = CutInteractor::new(cutter, Box::new(SsimMetric::new()), config.range.clone());
    let report = interactor
        .execute(&mut source)
        .context("Failed to cut video")?;

    Ok((report, source))
}
