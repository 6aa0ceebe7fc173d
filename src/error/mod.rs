//! Error handling module for StageCut

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for StageCut operations
#[derive(Error, Debug)]
pub enum StageCutError {
    /// Frame directory missing or not a directory
    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    /// Frame directory holds no decodable image
    #[error("No frame images found in {path}")]
    EmptyInput { path: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Domain contract violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// Directory traversal error
    #[error("Directory walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    /// Configuration file parse error
    #[error("Failed to parse TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for StageCut operations
pub type StageCutResult<T> = std::result::Result<T, StageCutError>;
