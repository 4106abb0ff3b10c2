//! Frame error classification.
//!
//! The stream handler folds payload and decode failures into one enum so it
//! can tell a bad frame (recoverable, drop it and keep the session) from a
//! transport failure (fatal, close the session). Transport failures never
//! reach this type; they end the receive loop directly.

use sentra_models::ProtocolError;
use sentra_vision::VisionError;
use thiserror::Error;

/// A failure tied to one inbound frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame of {size} bytes exceeds the {limit} byte limit")]
    Oversized { size: usize, limit: usize },

    #[error("malformed payload: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("frame processing failed: {0}")]
    Vision(#[from] VisionError),
}

impl FrameError {
    /// Stable label for the frame-error metric.
    pub fn kind(&self) -> &'static str {
        match self {
            FrameError::Oversized { .. } => "oversized",
            FrameError::Protocol(ProtocolError::MissingSeparator) => "missing_separator",
            FrameError::Protocol(ProtocolError::EmptyImage) => "empty_image",
            FrameError::Protocol(ProtocolError::InvalidBase64(_)) => "invalid_base64",
            FrameError::Vision(VisionError::Decode(_)) => "image_decode",
            FrameError::Vision(VisionError::EmptyFrame { .. }) => "empty_frame",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable_labels() {
        let err: FrameError = ProtocolError::MissingSeparator.into();
        assert_eq!(err.kind(), "missing_separator");

        let err = FrameError::Oversized { size: 11, limit: 10 };
        assert_eq!(err.kind(), "oversized");
    }
}
