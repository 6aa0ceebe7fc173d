// Cut interactor - Orchestrates the cut and classify use case

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::segmentation::{LoopCheck, SegmentationResult};
use crate::engine::VideoCutter;
use crate::ports::*;

/// Outcome of one cut: the stages of a video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutReport {
    pub video_id: VideoId,
    pub frame_count: u64,
    pub stable: Vec<FrameRange>,
    pub unstable: Vec<FrameRange>,
}

impl CutReport {
    /// Stages in video order, each tagged stable or not
    pub fn stages(&self) -> Vec<(bool, &FrameRange)> {
        let mut stages: Vec<(bool, &FrameRange)> = self
            .stable
            .iter()
            .map(|range| (true, range))
            .chain(self.unstable.iter().map(|range| (false, range)))
            .collect();
        stages.sort_by_key(|(_, range)| range.start());
        stages
    }
}

impl fmt::Display for CutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Video: {}", self.video_id)?;
        writeln!(f, "Frames: {}", self.frame_count)?;
        writeln!(
            f,
            "Stages: {} stable, {} unstable",
            self.stable.len(),
            self.unstable.len()
        )?;
        for (stable, range) in self.stages() {
            let kind = if stable { "stable" } else { "unstable" };
            write!(
                f,
                "  {:<8} [{}-{}] {:.3}s - {:.3}s",
                kind,
                range.start(),
                range.end(),
                range.start_time(),
                range.end_time()
            )?;
            if stable {
                writeln!(f)?;
            } else {
                writeln!(f, " mean score {:.4}", range.mean_score())?;
            }
        }
        Ok(())
    }
}

/// Interactor for the cut and classify use case
pub struct CutInteractor {
    cutter: VideoCutter,
    metric: Box<dyn SimilarityMetric>,
    options: RangeOptions,
}

impl CutInteractor {
    /// Create new cut interactor with injected collaborators
    pub fn new(cutter: VideoCutter, metric: Box<dyn SimilarityMetric>, options: RangeOptions) -> Self {
        Self {
            cutter,
            metric,
            options,
        }
    }

    pub fn options(&self) -> &RangeOptions {
        &self.options
    }

    /// Cut then classify in one go
    pub fn execute(&self, source: &mut dyn FrameSource) -> Result<CutReport, DomainError> {
        let result = self.cut(source)?;
        let (stable, unstable) = self.classify(&result, source)?;

        info!(
            "{}: {} stable and {} unstable stages",
            result.video_id(),
            stable.len(),
            unstable.len()
        );
        Ok(CutReport {
            video_id: result.video_id().clone(),
            frame_count: source.frame_count(),
            stable,
            unstable,
        })
    }

    /// Build the elementary ranges of `source`
    pub fn cut(&self, source: &mut dyn FrameSource) -> Result<SegmentationResult, DomainError> {
        self.cutter.cut(source, self.metric.as_ref())
    }

    /// Split an existing result into (stable, unstable).
    ///
    /// `source` must be the video `result` was cut from; the loop filter
    /// reads frames back from it.
    pub fn classify(
        &self,
        result: &SegmentationResult,
        source: &mut dyn FrameSource,
    ) -> Result<(Vec<FrameRange>, Vec<FrameRange>), DomainError> {
        if source.video_id() != result.video_id() {
            return Err(DomainError::BadArgs(format!(
                "result of {} classified against {}",
                result.video_id(),
                source.video_id()
            )));
        }

        let compress = self.cutter.config().compress();
        let mut loop_check = LoopCheck {
            source,
            metric: self.metric.as_ref(),
            compress: &compress,
        };
        result.get_range(&self.options, Some(&mut loop_check))
    }
}
