//! Per-stream motion detection.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::contour::find_motion_regions;
use crate::subtractor::{BackgroundSubtractor, MogSubtractor, SubtractorParams};

/// Detector configuration.
///
/// Every knob the detector uses lives here; nothing is a compile-time
/// constant. The server builds one of these from its environment and clones
/// it into each connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum outer-contour area, in pixels squared, for a region to count
    /// as motion.
    pub min_contour_area: f64,
    /// Background model parameters.
    pub params: SubtractorParams,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_contour_area: 500.0,
            params: SubtractorParams::default(),
        }
    }
}

/// Outcome of judging one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// True iff any foreground region's area exceeds the configured minimum.
    pub motion: bool,
    /// Area of the largest foreground region, zero when the mask is empty.
    pub largest_area: f64,
    /// Number of foreground regions in the mask.
    pub regions: usize,
    /// Frames fed to the background model so far, this one included.
    pub frames_seen: u64,
}

/// Stateful motion detector: one background model plus area thresholding.
///
/// Instances are scoped to a single stream. Sharing one detector across
/// streams would interleave unrelated scenes into the same statistics, so
/// the server creates a detector per connection and drops it on close.
pub struct MotionDetector {
    subtractor: MogSubtractor,
    config: DetectorConfig,
}

impl MotionDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            subtractor: MogSubtractor::new(config.params),
            config,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Judge one grayscale frame. Every frame is judged independently; no
    /// temporal smoothing is applied, so per-frame flicker is expected.
    pub fn detect(&mut self, frame: &GrayImage) -> Detection {
        let mask = self.subtractor.apply(frame);
        let regions = find_motion_regions(&mask);

        let largest_area = regions.iter().map(|r| r.area).fold(0.0, f64::max);
        Detection {
            motion: largest_area > self.config.min_contour_area,
            largest_area,
            regions: regions.len(),
            frames_seen: self.subtractor.frames_seen(),
        }
    }
}
