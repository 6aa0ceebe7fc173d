// Domain errors - Error types for the domain layer

use std::fmt;

use crate::domain::model::FrameId;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Two ranges that cannot be merged were asked to merge
    RangeMismatch(String),
    /// No elementary range contains the frame id
    FrameNotFound(FrameId),
    /// Similarity inputs do not share a shape
    ShapeMismatch(String),
    /// Frame source could not deliver a frame
    SourceFail(String),
    /// Artifact could not be written
    ExportFail(String),
    /// Configuration is inconsistent
    ConfigFail(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::RangeMismatch(msg) => write!(f, "Ranges cannot be merged: {}", msg),
            DomainError::FrameNotFound(id) => write!(f, "Frame {} not found in video", id),
            DomainError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            DomainError::SourceFail(msg) => write!(f, "Frame source failure: {}", msg),
            DomainError::ExportFail(msg) => write!(f, "Export failure: {}", msg),
            DomainError::ConfigFail(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
