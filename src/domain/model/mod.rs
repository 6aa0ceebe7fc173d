// Domain models - Core types and data structures

use std::fmt;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::ports::{FrameSource, SimilarityMetric, TemplateMatcher};

/// Frame index inside one video. Decoded frames start at 1; 0 marks the video start.
pub type FrameId = u64;

/// Mean score a range must exceed to count as stable
pub const DEFAULT_STABLE_THRESHOLD: f64 = 0.95;
/// Start/end similarity a merged range must exceed to count as a loop
pub const DEFAULT_LOOP_THRESHOLD: f64 = 0.95;
/// Template similarity `contain_image` must exceed
pub const DEFAULT_CONTAIN_THRESHOLD: f64 = 0.99;
/// Resize factor applied before comparing frames
pub const DEFAULT_COMPRESS_RATE: f64 = 0.2;

/// Frame a source can actually read for `frame_id`.
///
/// Id 0 is the virtual video start and maps to the first decoded frame.
pub fn readable_frame_id(frame_id: FrameId) -> FrameId {
    frame_id.max(1)
}

/// Opaque identity of a source video, compared by equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded frame with its position in the video
#[derive(Debug, Clone)]
pub struct Frame {
    pub id: FrameId,
    /// Seconds since the start of the video
    pub timestamp: f64,
    pub image: DynamicImage,
}

/// Grayscale conversion and downscaling applied before any comparison.
///
/// Every image handed to a [`SimilarityMetric`] must pass through the same
/// options, otherwise the metric sees frames of different shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressOptions {
    /// before * compress_rate = after
    pub compress_rate: f64,
    /// Exact output size, takes precedence over `compress_rate`
    pub target_size: Option<(u32, u32)>,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            compress_rate: DEFAULT_COMPRESS_RATE,
            target_size: None,
        }
    }
}

impl CompressOptions {
    pub fn with_rate(compress_rate: f64) -> Self {
        Self {
            compress_rate,
            target_size: None,
        }
    }

    /// Convert to grayscale and resize
    pub fn apply(&self, image: &DynamicImage) -> GrayImage {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();
        let (target_w, target_h) = match self.target_size {
            Some(size) => size,
            None => (
                Self::scale(width, self.compress_rate),
                Self::scale(height, self.compress_rate),
            ),
        };

        if (target_w, target_h) == (width, height) {
            return gray;
        }
        imageops::resize(&gray, target_w, target_h, FilterType::Triangle)
    }

    fn scale(side: u32, rate: f64) -> u32 {
        ((side as f64 * rate).round() as u32).max(1)
    }
}

/// Parameters of one classification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    /// Stability threshold on the mean score of a range
    pub threshold: f64,
    /// Loop threshold; `None` disables the loop filter
    pub range_threshold: Option<f64>,
    /// Frame slack tolerated when merging unstable ranges
    pub offset: u64,
    /// Ranges shorter than this are dropped, 0 keeps everything
    pub limit: u64,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_STABLE_THRESHOLD,
            range_threshold: None,
            offset: 0,
            limit: 0,
        }
    }
}

/// Parameters of the peripheral template check
#[derive(Debug, Clone, PartialEq)]
pub struct ContainOptions {
    pub threshold: f64,
    pub frame_count: usize,
    pub random: bool,
}

impl Default for ContainOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONTAIN_THRESHOLD,
            frame_count: 1,
            random: false,
        }
    }
}

/// Inclusive interval of frames inside one video.
///
/// `start <= end` always holds; a reversed pair given to [`FrameRange::new`]
/// is swapped together with its timestamps. Ranges are values: merging
/// builds a new range and never touches the operands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRange {
    video_id: VideoId,
    start: FrameId,
    end: FrameId,
    start_time: f64,
    end_time: f64,
    scores: Vec<f64>,
}

impl FrameRange {
    pub fn new(
        video_id: VideoId,
        start: FrameId,
        end: FrameId,
        scores: Vec<f64>,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        // a one-frame gap between two unstable ranges arrives reversed
        let (start, end, start_time, end_time) = if start > end {
            (end, start, end_time, start_time)
        } else {
            (start, end, start_time, end_time)
        };

        Self {
            video_id,
            start,
            end,
            start_time,
            end_time,
            scores,
        }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn start(&self) -> FrameId {
        self.start
    }

    pub fn end(&self) -> FrameId {
        self.end
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Number of frames covered, both ends included
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Arithmetic mean of the collected scores, NaN when there are none
    pub fn mean_score(&self) -> f64 {
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }

    /// Check whether `other` continues this range.
    ///
    /// With `offset == 0` the ranges must touch (`self.end >= other.start`);
    /// a positive offset bridges up to `offset` missing frames.
    pub fn can_merge(&self, other: &FrameRange, offset: u64) -> bool {
        self.video_id == other.video_id && self.end + offset >= other.start
    }

    /// Build `[self.start, other.end]` carrying both score lists in order
    pub fn merge(&self, other: &FrameRange, offset: u64) -> Result<FrameRange, DomainError> {
        if !self.can_merge(other, offset) {
            return Err(DomainError::RangeMismatch(format!(
                "{} cannot be followed by {} (offset {})",
                self, other, offset
            )));
        }

        let mut scores = Vec::with_capacity(self.scores.len() + other.scores.len());
        scores.extend_from_slice(&self.scores);
        scores.extend_from_slice(&other.scores);

        Ok(FrameRange::new(
            self.video_id.clone(),
            self.start,
            other.end,
            scores,
            self.start_time,
            other.end_time,
        ))
    }

    pub fn contains_frame(&self, frame_id: FrameId) -> bool {
        self.start <= frame_id && frame_id <= self.end
    }

    /// Stable when the mean score is strictly above `threshold`
    pub fn is_stable(&self, threshold: f64) -> bool {
        self.mean_score() > threshold
    }

    /// Compare the first and last frame of the range.
    ///
    /// An unstable range that comes back to its starting picture is an
    /// animation loop rather than a change of stage.
    pub fn is_loop(
        &self,
        threshold: f64,
        source: &mut dyn FrameSource,
        metric: &dyn SimilarityMetric,
        compress: &CompressOptions,
    ) -> Result<bool, DomainError> {
        let start_frame = source.get_frame(readable_frame_id(self.start))?;
        let end_frame = source.get_frame(self.end)?;

        let start_image = compress.apply(&start_frame.image);
        let end_image = compress.apply(&end_frame.image);
        let similarity = metric.similarity(&start_image, &end_image)?;
        debug!(
            "loop check [{}-{}]: similarity {:.4}",
            self.start, self.end, similarity
        );
        Ok(similarity > threshold)
    }

    /// Pick `frame_count` frame ids from the range.
    ///
    /// A count of 0 is treated as 1. See [`FrameRange::pick_evenly`] and
    /// [`FrameRange::pick_random`].
    pub fn pick(&self, frame_count: usize, random: bool) -> Vec<FrameId> {
        if random {
            self.pick_random(frame_count, &mut rand::thread_rng())
        } else {
            self.pick_evenly(frame_count)
        }
    }

    /// `start + floor(length / count * i)` for each `i` in `0..count`.
    ///
    /// Never yields `end`, and repeats ids once `count` nears `length`.
    pub fn pick_evenly(&self, frame_count: usize) -> Vec<FrameId> {
        let count = frame_count.max(1);
        let step = self.length() as f64 / count as f64;
        (0..count)
            .map(|i| self.start + (step * i as f64) as FrameId)
            .collect()
    }

    /// Distinct ids drawn uniformly from `[start, end)`, returned sorted.
    ///
    /// The count is clamped to the number of available ids.
    pub fn pick_random<R: Rng + ?Sized>(&self, frame_count: usize, rng: &mut R) -> Vec<FrameId> {
        let population = (self.end - self.start) as usize;
        let amount = frame_count.max(1).min(population);

        let mut picked: Vec<FrameId> = rand::seq::index::sample(rng, population, amount)
            .into_iter()
            .map(|offset| self.start + offset as FrameId)
            .collect();
        picked.sort_unstable();
        picked
    }

    /// Look for `template` in one picked frame of the range
    pub fn contain_image(
        &self,
        template: &GrayImage,
        options: &ContainOptions,
        source: &mut dyn FrameSource,
        matcher: &dyn TemplateMatcher,
    ) -> Result<bool, DomainError> {
        let target_id = self
            .pick(options.frame_count, options.random)
            .first()
            .copied()
            .unwrap_or(self.start);

        let frame = source.get_frame(readable_frame_id(target_id))?;
        let found = matcher.find(template, &frame.image.to_luma8())?;
        debug!(
            "template in frame {}: position {:?}, similarity {:.4}",
            target_id, found.position, found.similarity
        );
        Ok(found.similarity > options.threshold)
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<FrameRange [{}-{}] scores={:?}>",
            self.start, self.end, self.scores
        )
    }
}

#[cfg(test)]
mod tests;
