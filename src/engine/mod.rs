//! Block-wise similarity pipeline

use serde::{Deserialize, Serialize};

use crate::domain::model::{CompressOptions, DEFAULT_COMPRESS_RATE};

pub mod cutter;
pub mod splitter;

pub use cutter::VideoCutter;

/// Cutter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutterConfig {
    /// Frame stride between the two frames of one elementary range
    pub step: u64,
    /// Grid side; frames are compared as block x block sub-images
    pub block: u32,
    /// Resize factor applied before comparing
    pub compress_rate: f64,
    /// Exact comparison size, wins over `compress_rate`
    pub target_size: Option<(u32, u32)>,
}

impl Default for CutterConfig {
    fn default() -> Self {
        Self {
            step: 1,
            block: 2,
            compress_rate: DEFAULT_COMPRESS_RATE,
            target_size: None,
        }
    }
}

impl CutterConfig {
    pub fn compress(&self) -> CompressOptions {
        CompressOptions {
            compress_rate: self.compress_rate,
            target_size: self.target_size,
        }
    }
}
