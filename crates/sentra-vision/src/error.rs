//! Error types for frame processing.

use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while processing a frame.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("frame has zero area ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
}
