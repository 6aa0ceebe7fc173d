// PNG export adapter - Writes picked frames and thumbnails to disk

use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::debug;
use uuid::Uuid;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::ArtifactExporter;

/// Exporter writing PNG files
#[derive(Debug, Clone, Default)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }

    fn write(path: &Path, image: &GrayImage) -> Result<(), DomainError> {
        image.save(path).map_err(|e| {
            DomainError::ExportFail(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

impl ArtifactExporter for PngExporter {
    fn save_frame(
        &self,
        dir: &Path,
        frame_id: FrameId,
        image: &GrayImage,
    ) -> Result<PathBuf, DomainError> {
        let path = dir.join(format!("{}_{}.png", frame_id, Uuid::new_v4()));
        Self::write(&path, image)?;
        debug!("frame [{}] saved to {}", frame_id, path.display());
        Ok(path)
    }

    fn save_thumbnail(
        &self,
        dir: &Path,
        range: &FrameRange,
        image: &GrayImage,
    ) -> Result<PathBuf, DomainError> {
        let path = dir.join(format!("thumbnail_{}-{}.png", range.start(), range.end()));
        Self::write(&path, image)?;
        debug!("save thumbnail to {}", path.display());
        Ok(path)
    }
}
