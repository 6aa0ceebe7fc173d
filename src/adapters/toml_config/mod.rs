// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::export_interactor::DEFAULT_THUMBNAIL_RATE;
use crate::domain::model::*;
use crate::engine::CutterConfig;
use crate::error::{StageCutError, StageCutResult};
use crate::utils::logging::LoggingConfig;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "stagecut.toml";

/// `[cut]` section: how frames are compared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutSection {
    pub step: u64,
    pub block: u32,
    pub compress_rate: f64,
    /// `[width, height]`, wins over `compress_rate`
    pub target_size: Option<(u32, u32)>,
    /// Frame rate of image sequences
    pub fps: f64,
}

impl Default for CutSection {
    fn default() -> Self {
        let cutter = CutterConfig::default();
        Self {
            step: cutter.step,
            block: cutter.block,
            compress_rate: cutter.compress_rate,
            target_size: cutter.target_size,
            fps: 30.0,
        }
    }
}

impl CutSection {
    pub fn cutter(&self) -> CutterConfig {
        CutterConfig {
            step: self.step,
            block: self.block,
            compress_rate: self.compress_rate,
            target_size: self.target_size,
        }
    }
}

/// `[export]` section: picked frames and thumbnails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub frame_count: usize,
    pub random: bool,
    pub thumbnail_rate: f64,
    pub vertical: bool,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            frame_count: 3,
            random: false,
            thumbnail_rate: DEFAULT_THUMBNAIL_RATE,
            vertical: false,
        }
    }
}

/// Whole application configuration, every field defaulted
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cut: CutSection,
    pub range: RangeOptions,
    pub export: ExportSection,
    pub log: LoggingConfig,
}

impl AppConfig {
    /// Reject values no run can work with
    pub fn validate(&self) -> StageCutResult<()> {
        if self.cut.step == 0 {
            return Err(config_error("cut.step must be at least 1"));
        }
        if self.cut.block == 0 {
            return Err(config_error("cut.block must be at least 1"));
        }
        if self.cut.compress_rate <= 0.0 {
            return Err(config_error(format!(
                "cut.compress_rate must be positive, got {}",
                self.cut.compress_rate
            )));
        }
        if self.cut.fps <= 0.0 {
            return Err(config_error(format!(
                "cut.fps must be positive, got {}",
                self.cut.fps
            )));
        }
        if let Some((width, height)) = self.cut.target_size {
            if width == 0 || height == 0 {
                return Err(config_error("cut.target_size must not have a zero side"));
            }
        }

        check_unit("range.threshold", self.range.threshold)?;
        if let Some(range_threshold) = self.range.range_threshold {
            check_unit("range.range_threshold", range_threshold)?;
        }
        if self.export.thumbnail_rate <= 0.0 {
            return Err(config_error(format!(
                "export.thumbnail_rate must be positive, got {}",
                self.export.thumbnail_rate
            )));
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> StageCutError {
    StageCutError::ConfigError {
        message: message.into(),
    }
}

fn check_unit(name: &str, value: f64) -> StageCutResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(config_error(format!("{} must be within [0, 1], got {}", name, value)))
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_str(content: &str) -> StageCutResult<AppConfig> {
        Ok(toml::from_str(content)?)
    }

    /// Load and parse a config file
    pub fn load(path: &Path) -> StageCutResult<AppConfig> {
        if !path.is_file() {
            return Err(StageCutError::InputNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Explicit file if given, else `stagecut.toml` when present, else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> StageCutResult<AppConfig> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = Self::default_config_path();
        if fallback.is_file() {
            Self::load(&fallback)
        } else {
            debug!("No config file found, using defaults");
            Ok(AppConfig::default())
        }
    }

    pub fn default_config_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    pub fn to_string(config: &AppConfig) -> StageCutResult<String> {
        toml::to_string(config).map_err(|e| config_error(format!("Failed to serialize config: {}", e)))
    }
}
