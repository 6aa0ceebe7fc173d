// In-memory frame source - Frames already decoded by the caller

use image::{DynamicImage, GenericImageView};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::FrameSource;

/// Frame source over a vector of decoded images
pub struct MemoryFrameSource {
    video_id: VideoId,
    frames: Vec<DynamicImage>,
    fps: f64,
    /// 0-based index of the next frame to read
    cursor: usize,
}

impl MemoryFrameSource {
    /// Frame `i` of `frames` gets id `i + 1` and timestamp `(i + 1) / fps`
    pub fn new(video_id: VideoId, frames: Vec<DynamicImage>, fps: f64) -> Self {
        Self {
            video_id,
            frames,
            fps,
            cursor: 0,
        }
    }
}

impl FrameSource for MemoryFrameSource {
    fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }

    fn frame_size(&self) -> (u32, u32) {
        self.frames
            .first()
            .map(|frame| frame.dimensions())
            .unwrap_or((0, 0))
    }

    fn seek(&mut self, frame_id: FrameId) -> Result<(), DomainError> {
        if frame_id == 0 {
            return Err(DomainError::BadArgs("Frame ids start at 1".to_string()));
        }
        self.cursor = (frame_id - 1) as usize;
        Ok(())
    }

    fn read_next(&mut self) -> Result<Option<Frame>, DomainError> {
        let Some(image) = self.frames.get(self.cursor) else {
            return Ok(None);
        };

        let id = self.cursor as FrameId + 1;
        self.cursor += 1;
        Ok(Some(Frame {
            id,
            timestamp: id as f64 / self.fps,
            image: image.clone(),
        }))
    }
}
