//! Motion detection over grayscale frames.
//!
//! This crate provides:
//! - An adaptive mixture-of-Gaussians background subtractor
//! - Outer-contour extraction with area estimation
//! - A per-stream motion detector with an externalized configuration

pub mod contour;
pub mod decode;
pub mod detector;
pub mod error;
pub mod subtractor;

// Re-export common types
pub use contour::{find_motion_regions, MotionRegion};
pub use decode::decode_frame;
pub use detector::{Detection, DetectorConfig, MotionDetector};
pub use error::VisionError;
pub use subtractor::{BackgroundSubtractor, MogSubtractor, SubtractorParams};
