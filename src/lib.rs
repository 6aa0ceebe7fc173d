//! StageCut Library
//!
//! Splits a video into stable and unstable stages. Consecutive frames are
//! compared block by block; low-similarity runs are merged into unstable
//! ranges and the gaps between them become stable ranges.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use adapters::{ImageSequenceSource, MemoryFrameSource, SsimMetric};
pub use app::{CutInteractor, CutReport, ExportInteractor};
pub use domain::errors::DomainError;
pub use domain::model::{FrameId, FrameRange, RangeOptions, VideoId};
pub use domain::segmentation::SegmentationResult;
pub use engine::{CutterConfig, VideoCutter};
pub use error::{StageCutError, StageCutResult};
