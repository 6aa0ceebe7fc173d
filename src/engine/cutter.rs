//! Video cutter: frame pairs to elementary ranges

use std::time::Instant;

use image::GrayImage;
use tracing::{debug, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::segmentation::SegmentationResult;
use crate::engine::splitter::split_blocks;
use crate::engine::CutterConfig;
use crate::ports::{FrameSource, SimilarityMetric};

/// Walks a frame source `step` frames at a time and scores each pair
pub struct VideoCutter {
    config: CutterConfig,
}

impl VideoCutter {
    /// Create a cutter, rejecting a zero step or grid
    pub fn new(config: CutterConfig) -> Result<Self, DomainError> {
        if config.step == 0 {
            return Err(DomainError::BadArgs("step must be at least 1".to_string()));
        }
        if config.block == 0 {
            return Err(DomainError::BadArgs("block must be at least 1".to_string()));
        }
        if config.target_size.is_none() && config.compress_rate <= 0.0 {
            return Err(DomainError::BadArgs(format!(
                "compress_rate must be positive, got {}",
                config.compress_rate
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &CutterConfig {
        &self.config
    }

    /// Cut the whole source into a [`SegmentationResult`]
    pub fn cut(
        &self,
        source: &mut dyn FrameSource,
        metric: &dyn SimilarityMetric,
    ) -> Result<SegmentationResult, DomainError> {
        let started = Instant::now();
        info!("start cutting: {}", source.video_id());

        // with 100 frames: [S(1-2), S(2-3) ... S(99-100)], 99 ranges
        let ranges = self.convert_to_ranges(source, metric)?;

        info!(
            "cut finished: {} ({} ranges in {:.2?})",
            source.video_id(),
            ranges.len(),
            started.elapsed()
        );
        Ok(SegmentationResult::new(source.video_id().clone(), ranges))
    }

    /// Build the ordered elementary ranges of the source.
    ///
    /// Each range spans two frames `step` apart and carries the lowest
    /// block similarity between them. The scan stops at the first read
    /// past the end of the source.
    pub fn convert_to_ranges(
        &self,
        source: &mut dyn FrameSource,
        metric: &dyn SimilarityMetric,
    ) -> Result<Vec<FrameRange>, DomainError> {
        let (width, height) = source.frame_size();
        debug!(
            "total frame count: {}, size: {}x{}",
            source.frame_count(),
            width,
            height
        );

        let compress = self.config.compress();
        let video_id = source.video_id().clone();

        source.seek(1)?;
        let Some(first) = source.read_next()? else {
            warn!("no frame could be read from {}", video_id);
            return Ok(Vec::new());
        };

        let mut start_id = first.id;
        let mut start_time = first.timestamp;
        let first_image = compress.apply(&first.image);
        let shape = first_image.dimensions();
        let mut start_parts = split_blocks(&first_image, self.config.block)?;

        let mut ranges = Vec::new();
        loop {
            source.seek(start_id + self.config.step)?;
            let Some(end) = source.read_next()? else {
                break;
            };

            let end_image = compress.apply(&end.image);
            if end_image.dimensions() != shape {
                return Err(DomainError::ShapeMismatch(format!(
                    "frame {} is {:?} after compression, frame {} was {:?}",
                    end.id,
                    end_image.dimensions(),
                    first.id,
                    shape
                )));
            }
            let end_parts = split_blocks(&end_image, self.config.block)?;
            let score = Self::min_block_similarity(&start_parts, &end_parts, metric)?;
            debug!("similarity between {} & {}: {:.4}", start_id, end.id, score);

            ranges.push(FrameRange::new(
                video_id.clone(),
                start_id,
                end.id,
                vec![score],
                start_time,
                end.timestamp,
            ));

            start_id = end.id;
            start_time = end.timestamp;
            start_parts = end_parts;
        }

        Ok(ranges)
    }

    /// Lowest similarity over corresponding blocks
    fn min_block_similarity(
        start_parts: &[GrayImage],
        end_parts: &[GrayImage],
        metric: &dyn SimilarityMetric,
    ) -> Result<f64, DomainError> {
        let mut score = 1.0;
        for (index, (start, end)) in start_parts.iter().zip(end_parts).enumerate() {
            let part = metric.similarity(start, end)?;
            debug!("part {}: {:.4}", index, part);
            if part < score {
                score = part;
            }
        }
        Ok(score)
    }
}
