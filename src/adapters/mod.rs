// Adapters - External system implementations

pub mod image_sequence;
pub mod memory_source;
pub mod ncc_matcher;
pub mod png_export;
pub mod ssim_metric;
pub mod toml_config;

// Re-export adapters
pub use image_sequence::ImageSequenceSource;
pub use memory_source::MemoryFrameSource;
pub use ncc_matcher::NccTemplateMatcher;
pub use png_export::PngExporter;
pub use ssim_metric::SsimMetric;
pub use toml_config::{AppConfig, TomlConfigAdapter};
