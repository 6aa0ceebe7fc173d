// Image sequence adapter - Frames stored as one image file each

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::error::{StageCutError, StageCutResult};
use crate::ports::FrameSource;

const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Frame source over a directory of frame images.
///
/// Files are ordered by name, so `ffmpeg -i in.mp4 frames/%05d.png`
/// produces a usable directory. Images are decoded on read.
pub struct ImageSequenceSource {
    video_id: VideoId,
    paths: Vec<PathBuf>,
    fps: f64,
    frame_size: (u32, u32),
    cursor: usize,
}

impl ImageSequenceSource {
    /// Index the frame images of `dir`
    pub fn open(dir: impl AsRef<Path>, fps: f64) -> StageCutResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StageCutError::InputNotFound {
                path: dir.display().to_string(),
            });
        }
        if fps <= 0.0 {
            return Err(StageCutError::ConfigError {
                message: format!("fps must be positive, got {}", fps),
            });
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && Self::is_frame_file(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        let Some(first) = paths.first() else {
            return Err(StageCutError::EmptyInput {
                path: dir.display().to_string(),
            });
        };
        let frame_size = image::image_dimensions(first)?;

        info!(
            "Indexed {} frames of {}x{} in {}",
            paths.len(),
            frame_size.0,
            frame_size.1,
            dir.display()
        );

        Ok(Self {
            video_id: VideoId::new(dir.display().to_string()),
            paths,
            fps,
            frame_size,
            cursor: 0,
        })
    }

    /// Path of the image behind `frame_id`
    pub fn frame_path(&self, frame_id: FrameId) -> Option<&Path> {
        let index = frame_id.checked_sub(1)? as usize;
        self.paths.get(index).map(PathBuf::as_path)
    }

    fn is_frame_file(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.as_str()))
    }
}

impl FrameSource for ImageSequenceSource {
    fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    fn frame_count(&self) -> u64 {
        self.paths.len() as u64
    }

    fn frame_size(&self) -> (u32, u32) {
        self.frame_size
    }

    fn seek(&mut self, frame_id: FrameId) -> Result<(), DomainError> {
        if frame_id == 0 {
            return Err(DomainError::BadArgs("Frame ids start at 1".to_string()));
        }
        self.cursor = (frame_id - 1) as usize;
        Ok(())
    }

    fn read_next(&mut self) -> Result<Option<Frame>, DomainError> {
        let Some(path) = self.paths.get(self.cursor) else {
            return Ok(None);
        };

        let image = image::open(path).map_err(|e| {
            DomainError::SourceFail(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        let id = self.cursor as FrameId + 1;
        self.cursor += 1;
        debug!("read frame {} from {}", id, path.display());

        Ok(Some(Frame {
            id,
            timestamp: id as f64 / self.fps,
            image,
        }))
    }
}
