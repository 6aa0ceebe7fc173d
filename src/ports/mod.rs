// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use image::GrayImage;

use crate::domain::errors::DomainError;
use crate::domain::model::*;

/// Port for ordered and random access to the frames of one video
pub trait FrameSource {
    /// Identity of the video behind this source
    fn video_id(&self) -> &VideoId;

    /// Total number of decodable frames
    fn frame_count(&self) -> u64;

    /// Frame dimensions as (width, height)
    fn frame_size(&self) -> (u32, u32);

    /// Position the source so that the next read returns `frame_id`.
    ///
    /// Seeking past the last frame is allowed; the next read then yields `None`.
    fn seek(&mut self, frame_id: FrameId) -> Result<(), DomainError>;

    /// Read the frame at the current position and advance by one
    fn read_next(&mut self) -> Result<Option<Frame>, DomainError>;

    /// Random access helper: seek then read
    fn get_frame(&mut self, frame_id: FrameId) -> Result<Frame, DomainError> {
        self.seek(frame_id)?;
        self.read_next()?
            .ok_or(DomainError::FrameNotFound(frame_id))
    }
}

/// Port for the pixel-level similarity between two frames
pub trait SimilarityMetric {
    /// Similarity in [0, 1] of two equal-shaped grayscale images
    fn similarity(&self, a: &GrayImage, b: &GrayImage) -> Result<f64, DomainError>;
}

/// Best placement of a template inside a frame
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Top-left corner (x, y) of the best placement
    pub position: (u32, u32),
    pub similarity: f64,
}

/// Port for template matching
pub trait TemplateMatcher {
    fn find(&self, template: &GrayImage, target: &GrayImage) -> Result<MatchResult, DomainError>;
}

/// Port for persisting picked frames and thumbnails
pub trait ArtifactExporter {
    /// Write one picked frame into `dir`, returning the written path
    fn save_frame(
        &self,
        dir: &Path,
        frame_id: FrameId,
        image: &GrayImage,
    ) -> Result<PathBuf, DomainError>;

    /// Write the thumbnail of `range` into `dir`, returning the written path
    fn save_thumbnail(
        &self,
        dir: &Path,
        range: &FrameRange,
        image: &GrayImage,
    ) -> Result<PathBuf, DomainError>;
}
