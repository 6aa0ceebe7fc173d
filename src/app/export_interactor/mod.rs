// Export interactor - Picks frames out of stages and writes them to disk

use std::path::{Path, PathBuf};

use chrono::Local;
use image::{imageops, GrayImage};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::error::StageCutResult;
use crate::ports::*;

/// Default thumbnail resize factor
pub const DEFAULT_THUMBNAIL_RATE: f64 = 0.1;

/// How frames are picked out of each range
#[derive(Debug, Clone, PartialEq)]
pub struct PickOptions {
    pub frame_count: usize,
    pub random: bool,
    /// Resize before saving; `None` keeps the full frame in grayscale
    pub compress: Option<CompressOptions>,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            frame_count: 3,
            random: false,
            compress: None,
        }
    }
}

/// Interactor for the pick-and-save and thumbnail use cases
pub struct ExportInteractor {
    exporter: Box<dyn ArtifactExporter>,
}

impl ExportInteractor {
    /// Create new export interactor with injected exporter
    pub fn new(exporter: Box<dyn ArtifactExporter>) -> Self {
        Self { exporter }
    }

    /// Directory name used when the caller gives none, e.g. `20240131093000`
    pub fn timestamp_dir() -> PathBuf {
        PathBuf::from(Local::now().format("%Y%m%d%H%M%S").to_string())
    }

    /// Pick frames from every range and save them as `<to_dir>/<stage id>/*.png`.
    ///
    /// The stage id is the index of the range in `ranges`. Frame id 0 stands
    /// for the video start and is read as the first frame. Returns the
    /// directory everything was written to.
    pub fn pick_and_save(
        &self,
        ranges: &[FrameRange],
        options: &PickOptions,
        to_dir: Option<&Path>,
        source: &mut dyn FrameSource,
    ) -> StageCutResult<PathBuf> {
        let stages: Vec<(usize, Vec<FrameId>)> = ranges
            .iter()
            .enumerate()
            .map(|(index, range)| {
                let picked = range.pick(options.frame_count, options.random);
                info!("pick {:?} in range {}", picked, range);
                (index, picked)
            })
            .collect();

        let to_dir = to_dir.map(Path::to_path_buf).unwrap_or_else(Self::timestamp_dir);
        std::fs::create_dir_all(&to_dir)?;

        for (stage_id, frame_ids) in stages {
            let stage_dir = to_dir.join(stage_id.to_string());
            std::fs::create_dir_all(&stage_dir)?;

            for frame_id in frame_ids {
                let frame = source.get_frame(readable_frame_id(frame_id))?;
                let image = match &options.compress {
                    Some(compress) => compress.apply(&frame.image),
                    None => frame.image.to_luma8(),
                };
                self.exporter.save_frame(&stage_dir, frame_id, &image)?;
            }
        }

        info!("picked frames saved to {}", to_dir.display());
        Ok(to_dir)
    }

    /// Stack every frame of `range`, resized by `rate`, into one image.
    ///
    /// Frames are laid side by side, or top to bottom when `vertical`. The
    /// image is written as `thumbnail_<start>-<end>.png` only when `to_dir`
    /// is given.
    pub fn thumbnail(
        &self,
        range: &FrameRange,
        source: &mut dyn FrameSource,
        to_dir: Option<&Path>,
        rate: f64,
        vertical: bool,
    ) -> StageCutResult<GrayImage> {
        if rate <= 0.0 {
            return Err(DomainError::BadArgs(format!("thumbnail rate must be positive, got {}", rate)).into());
        }
        let compress = CompressOptions::with_rate(rate);

        let first_id = readable_frame_id(range.start());
        let wanted = (range.end() + 1).saturating_sub(first_id);

        source.seek(first_id)?;
        let mut frames = Vec::new();
        while (frames.len() as u64) < wanted {
            let Some(frame) = source.read_next()? else {
                break;
            };
            frames.push(compress.apply(&frame.image));
        }

        let merged = Self::stack(&frames, vertical).ok_or_else(|| {
            DomainError::SourceFail(format!("no frame could be read for {}", range))
        })?;
        debug!(
            "thumbnail of {} frames: {}x{}",
            frames.len(),
            merged.width(),
            merged.height()
        );

        if let Some(dir) = to_dir {
            std::fs::create_dir_all(dir)?;
            self.exporter.save_thumbnail(dir, range, &merged)?;
        }
        Ok(merged)
    }

    fn stack(frames: &[GrayImage], vertical: bool) -> Option<GrayImage> {
        let first = frames.first()?;
        let (width, height) = first.dimensions();
        let count = frames.len() as u32;

        let mut canvas = if vertical {
            GrayImage::new(width, height * count)
        } else {
            GrayImage::new(width * count, height)
        };
        for (index, frame) in frames.iter().enumerate() {
            let offset = index as i64;
            if vertical {
                imageops::replace(&mut canvas, frame, 0, offset * height as i64);
            } else {
                imageops::replace(&mut canvas, frame, offset * width as i64, 0);
            }
        }
        Some(canvas)
    }
}
