// Segmentation - Stable and unstable stages of one video

use tracing::{debug, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::rules::{LengthFilter, RangeMerger};
use crate::ports::{FrameSource, SimilarityMetric};

/// Score given to every reconstructed stable range
const STABLE_SENTINEL_SCORE: f64 = 1.0;

/// Collaborators needed to re-check merged ranges for loops
pub struct LoopCheck<'a> {
    pub source: &'a mut dyn FrameSource,
    pub metric: &'a dyn SimilarityMetric,
    pub compress: &'a CompressOptions,
}

/// Which timestamp of the looked-up elementary range to use
#[derive(Debug, Clone, Copy)]
enum Edge {
    Start,
    End,
}

/// Elementary ranges of one video and the classification built on them.
///
/// The elementary list is never modified; every call recomputes its
/// output from it, so the same result can be classified repeatedly with
/// different [`RangeOptions`].
#[derive(Debug, Clone)]
pub struct SegmentationResult {
    video_id: VideoId,
    ranges: Vec<FrameRange>,
}

impl SegmentationResult {
    pub fn new(video_id: VideoId, ranges: Vec<FrameRange>) -> Self {
        Self { video_id, ranges }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    /// Elementary ranges in frame order
    pub fn ranges(&self) -> &[FrameRange] {
        &self.ranges
    }

    pub fn last_frame_id(&self) -> Option<FrameId> {
        self.ranges.last().map(|range| range.end())
    }

    /// First elementary range containing `frame_id`
    pub fn get_target_range_by_id(&self, frame_id: FrameId) -> Result<&FrameRange, DomainError> {
        self.ranges
            .iter()
            .find(|range| range.contains_frame(frame_id))
            .ok_or(DomainError::FrameNotFound(frame_id))
    }

    /// Merged unstable ranges, sorted by start.
    ///
    /// Ranges shorter than `options.limit` are dropped. When
    /// `options.range_threshold` is set every merged range is checked with
    /// [`FrameRange::is_loop`] and loops are dropped; that requires `loop_check`.
    pub fn get_unstable_range(
        &self,
        options: &RangeOptions,
        loop_check: Option<&mut LoopCheck<'_>>,
    ) -> Result<Vec<FrameRange>, DomainError> {
        let mut candidates: Vec<FrameRange> = self
            .ranges
            .iter()
            .filter(|range| !range.is_stable(options.threshold))
            .cloned()
            .collect();
        candidates.sort_by_key(|range| range.start());

        let merged = RangeMerger::merge_sorted(&candidates, options.offset)?;
        let mut unstable = LengthFilter::apply(merged, options.limit);

        if let Some(range_threshold) = options.range_threshold {
            let loop_check = loop_check.ok_or_else(|| {
                DomainError::ConfigFail(
                    "loop filter needs a frame source and a similarity metric".to_string(),
                )
            })?;

            let mut kept = Vec::with_capacity(unstable.len());
            for range in unstable {
                if range.is_loop(range_threshold, &mut *loop_check.source, loop_check.metric, loop_check.compress)? {
                    debug!("drop loop range {}", range);
                } else {
                    kept.push(range);
                }
            }
            unstable = kept;
        }

        debug!("unstable range of [{}]: {:?}", self.video_id, unstable);
        Ok(unstable)
    }

    /// Stable and unstable ranges, each sorted by start.
    ///
    /// Stable ranges fill what the unstable ones leave uncovered between
    /// frame 0 and the last frame. The trailing stable range starts on the
    /// last unstable frame. A video without unstable ranges yields one
    /// stable range over the whole video.
    pub fn get_range(
        &self,
        options: &RangeOptions,
        loop_check: Option<&mut LoopCheck<'_>>,
    ) -> Result<(Vec<FrameRange>, Vec<FrameRange>), DomainError> {
        let unstable = self.get_unstable_range(options, loop_check)?;

        let Some(last) = self.ranges.last() else {
            warn!("no elementary range in [{}], nothing to classify", self.video_id);
            return Ok((Vec::new(), unstable));
        };
        let video_end_id = last.end();
        let video_end_time = last.end_time();

        let mut stable = Vec::with_capacity(unstable.len() + 1);
        match (unstable.first(), unstable.last()) {
            (Some(first), Some(last_unstable)) => {
                if first.start() > 0 {
                    let end_id = first.start() - 1;
                    stable.push(self.stable_range(
                        0,
                        end_id,
                        0.0,
                        self.time_before(end_id, Edge::Start)?,
                    ));
                }

                for pair in unstable.windows(2) {
                    let start_id = pair[0].end() + 1;
                    let end_id = pair[1].start().saturating_sub(1);
                    stable.push(self.stable_range(
                        start_id,
                        end_id,
                        self.time_before(start_id, Edge::Start)?,
                        self.time_before(end_id, Edge::End)?,
                    ));
                }

                let start_id = last_unstable.end();
                stable.push(self.stable_range(
                    start_id,
                    video_end_id,
                    self.time_before(start_id, Edge::End)?,
                    video_end_time,
                ));
            }
            _ => {
                debug!("no unstable range in [{}], whole video is stable", self.video_id);
                stable.push(self.stable_range(0, video_end_id, 0.0, video_end_time));
            }
        }

        let mut stable = LengthFilter::apply(stable, options.limit);
        stable.sort_by_key(|range| range.start());
        debug!("stable range of [{}]: {:?}", self.video_id, stable);
        Ok((stable, unstable))
    }

    pub fn get_stable_range(
        &self,
        options: &RangeOptions,
        loop_check: Option<&mut LoopCheck<'_>>,
    ) -> Result<Vec<FrameRange>, DomainError> {
        Ok(self.get_range(options, loop_check)?.0)
    }

    fn stable_range(&self, start: FrameId, end: FrameId, start_time: f64, end_time: f64) -> FrameRange {
        FrameRange::new(
            self.video_id.clone(),
            start,
            end,
            vec![STABLE_SENTINEL_SCORE],
            start_time,
            end_time,
        )
    }

    /// Timestamp recorded on the elementary range holding `frame_id - 1`.
    ///
    /// Ids before the first elementary range map to the video start.
    fn time_before(&self, frame_id: FrameId, edge: Edge) -> Result<f64, DomainError> {
        let first_start = match self.ranges.first() {
            Some(first) => first.start(),
            None => return Ok(0.0),
        };

        match frame_id.checked_sub(1) {
            Some(id) if id >= first_start => {
                let range = self.get_target_range_by_id(id)?;
                Ok(match edge {
                    Edge::Start => range.start_time(),
                    Edge::End => range.end_time(),
                })
            }
            _ => Ok(0.0),
        }
    }
}
